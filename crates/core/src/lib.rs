//! `greedible-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the back-office
//! crates (no IO, no clock reads).

pub mod date;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use date::{format_dmy, format_iso, parse_calendar_date};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{IngredientId, OrderId, RecipeId, RestockId, ScheduleId, StaffId, SupplierId};
pub use money::Money;
pub use value_object::ValueObject;
