//! Database models and DTOs for all domain entities.

pub mod department;
pub mod pagination;
pub mod query;
pub mod user;
