use std::path::Path;

use schemars::JsonSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Default number of elements produced for array fields.
pub const DEFAULT_ELEMENT_COUNT: usize = 3;
/// Default width of the range used by bare and one-sided numeric specs.
pub const DEFAULT_WINDOW: u32 = 1000;
/// Default number of fixtures built by `create_default_many`.
pub const DEFAULT_COUNT: usize = 3;

/// Options for the population engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FixtureOptions {
    /// Number of elements generated for every array-of-objects and
    /// array-of-primitives field.
    pub element_count: usize,
    /// Width of the range for `integer`, `decimal`, and one-sided specs.
    pub window: u32,
    /// Fail when an override names a field that is not in the template.
    pub strict_overrides: bool,
    /// Seed for the default random source; a fresh seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            element_count: DEFAULT_ELEMENT_COUNT,
            window: DEFAULT_WINDOW,
            strict_overrides: false,
            seed: None,
        }
    }
}

impl FixtureOptions {
    pub fn from_toml_str(content: &str) -> Result<Self, GenerationError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads options from a TOML file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, GenerationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_element_count(mut self, element_count: usize) -> Self {
        self.element_count = element_count;
        self
    }

    pub fn with_window(mut self, window: u32) -> Self {
        self.window = window;
        self
    }

    pub fn strict(mut self, strict_overrides: bool) -> Self {
        self.strict_overrides = strict_overrides;
        self
    }
}

/// Emit the JSON Schema for option files.
pub fn options_json_schema() -> RootSchema {
    schema_for!(FixtureOptions)
}
