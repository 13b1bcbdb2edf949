pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod recipes;
pub mod restocks;
pub mod schedule;
pub mod staff;
