//! Core value objects shared across the domain

pub mod error;
pub mod model;
pub mod query;

pub use error::DomainError;
pub use model::Model;
pub use query::Query;
