use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::FixtureValue;

/// Structural classification of a template field.
///
/// Computed fresh for every field on every traversal; the template is the
/// only source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Boolean,
    String,
    Number,
    Date,
    /// A placeholder leaf with no inferable kind.
    Null,
    Object,
    ArrayOfObjects,
    ArrayOfPrimitives,
    EmptyArray,
}

impl Category {
    /// Classifies a single value; `field` is only used for error reporting.
    pub fn of(value: &FixtureValue, field: &str) -> Result<Self> {
        let category = match value {
            FixtureValue::Array(values) => match values.first() {
                None => Category::EmptyArray,
                Some(FixtureValue::Array(_)) => {
                    return Err(Error::UnsupportedStructure {
                        field: field.to_string(),
                    });
                }
                Some(FixtureValue::Object(_)) => Category::ArrayOfObjects,
                Some(_) => Category::ArrayOfPrimitives,
            },
            FixtureValue::Object(_) => Category::Object,
            FixtureValue::Bool(_) => Category::Boolean,
            FixtureValue::Text(_) => Category::String,
            FixtureValue::Integer(_) | FixtureValue::Decimal(_) => Category::Number,
            FixtureValue::Date(_) => Category::Date,
            FixtureValue::Null => Category::Null,
        };
        Ok(category)
    }

    /// Categories whose overrides are nested trees rather than spec strings.
    pub fn takes_nested_overrides(self) -> bool {
        matches!(self, Category::Object | Category::ArrayOfObjects)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Boolean => "boolean",
            Category::String => "string",
            Category::Number => "number",
            Category::Date => "date",
            Category::Null => "null",
            Category::Object => "actual_object",
            Category::ArrayOfObjects => "array_of_objects",
            Category::ArrayOfPrimitives => "array_of_primitives",
            Category::EmptyArray => "empty_array",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the field `name` of `container`.
///
/// A missing field classifies as `Null`.
pub fn classify_field(container: &BTreeMap<String, FixtureValue>, name: &str) -> Result<Category> {
    match container.get(name) {
        Some(value) => Category::of(value, name),
        None => Ok(Category::Null),
    }
}
