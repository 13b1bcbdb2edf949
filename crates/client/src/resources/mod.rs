//! One module per backend resource, each adding methods to [`ApiClient`].
//!
//! [`ApiClient`]: crate::ApiClient

mod analytics;
mod auth;
mod ingredients;
mod orders;
mod recipes;
mod restocks;
mod schedules;
mod staff;
