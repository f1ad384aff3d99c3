//! Core contracts for Autofixture.
//!
//! This crate defines the template value model, the field classification
//! used to drive population, and conversions to and from `serde_json`.

pub mod category;
pub mod error;
pub mod path;
pub mod value;

pub use category::{Category, classify_field};
pub use error::{Error, Result};
pub use path::FieldPath;
pub use value::{DATE_FORMAT, FixtureValue};
