//! Deliberation transcript types

pub mod value_objects;

pub use value_objects::{DeliberationOutcome, RoundResult, Transcript};
