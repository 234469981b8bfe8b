//! Application-layer configuration types

pub mod params;

pub use params::DeliberationParams;
