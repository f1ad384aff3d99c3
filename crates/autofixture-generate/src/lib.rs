//! Template-driven fixture generation for Autofixture.
//!
//! This crate walks a template (`FixtureValue`), classifies every field, and
//! replaces each leaf with a random value of the same kind, honoring per-field
//! spec strings from an override tree.

pub mod engine;
pub mod errors;
pub mod logging;
pub mod model;
pub mod primitives;
pub mod resolve;

pub use engine::Autofixture;
pub use errors::GenerationError;
pub use logging::init_logging;
pub use model::{
    DEFAULT_COUNT, DEFAULT_ELEMENT_COUNT, DEFAULT_WINDOW, FixtureOptions, options_json_schema,
};
pub use resolve::{SpecGenerator, resolve_generator, resolve_generator_within};

pub use autofixture_core::{Category, FixtureValue};
pub use autofixture_spec::{Override, Overrides};
