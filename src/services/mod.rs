//! Business logic services.

pub mod auth;
pub mod department;
pub mod list_state;
pub mod user_admin;
