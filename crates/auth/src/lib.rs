//! `greedible-auth`: sessions and the screen access policy.
//!
//! Decoupled from HTTP: the client crate produces sessions, this crate only
//! describes them and decides what a signed-in user may open.

pub mod authorize;
pub mod roles;
pub mod session;

pub use authorize::{AuthzError, Screen, authorize, can_delete_shifts, can_manage_shifts};
pub use roles::Role;
pub use session::{LoginRequest, LoginResponse, Session, StaffProfile};
