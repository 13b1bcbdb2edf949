//! `greedible-client`: typed access to the Greedible REST backends.
//!
//! Every call takes the caller's [`greedible_auth::Session`]; the client
//! itself holds only configuration and a connection pool.

mod client;
pub mod config;
pub mod envelope;
pub mod error;
mod resources;
pub mod views;

pub use client::ApiClient;
pub use config::{Backend, ClientConfig};
pub use error::ApiError;
pub use views::ScheduleBoard;
