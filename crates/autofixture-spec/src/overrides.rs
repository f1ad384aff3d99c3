use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SpecError;
use crate::grammar::{SpecRule, parse_spec};

/// Per-field override: a spec string for scalar and primitive-array fields,
/// or a nested tree for object and object-array fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Override {
    Spec(String),
    Tree(Overrides),
}

impl Override {
    pub fn as_spec(&self) -> Option<&str> {
        match self {
            Override::Spec(spec) => Some(spec.as_str()),
            Override::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Overrides> {
        match self {
            Override::Tree(tree) => Some(tree),
            Override::Spec(_) => None,
        }
    }

    /// True for the `skip` spec, which removes the field from the result.
    pub fn is_skip(&self) -> bool {
        self.as_spec()
            .is_some_and(|spec| matches!(parse_spec(spec), Ok(SpecRule::Skip)))
    }
}

impl From<&str> for Override {
    fn from(spec: &str) -> Self {
        Override::Spec(spec.to_string())
    }
}

impl From<String> for Override {
    fn from(spec: String) -> Self {
        Override::Spec(spec)
    }
}

impl From<Overrides> for Override {
    fn from(tree: Overrides) -> Self {
        Override::Tree(tree)
    }
}

/// Override tree mirroring (a subset of) a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Overrides(BTreeMap<String, Override>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a spec string for `name`.
    pub fn spec(mut self, name: impl Into<String>, spec: impl Into<String>) -> Self {
        self.0.insert(name.into(), Override::Spec(spec.into()));
        self
    }

    /// Adds a nested override tree for `name`.
    pub fn tree(mut self, name: impl Into<String>, tree: Overrides) -> Self {
        self.0.insert(name.into(), Override::Tree(tree));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Override>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Override> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Override)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads an override tree from JSON; every leaf must be a string.
    pub fn from_json(value: Value) -> Result<Self, SpecError> {
        serde_json::from_value(value).map_err(|err| SpecError::InvalidOverrides(err.to_string()))
    }
}

impl<K: Into<String>, V: Into<Override>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
