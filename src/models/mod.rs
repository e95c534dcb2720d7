//! Core data models for project generation

pub mod artifact;
pub mod error;
pub mod manifest;
pub mod request;

pub use artifact::*;
pub use error::*;
pub use manifest::*;
pub use request::*;
