use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// Text representation of `FixtureValue::Date` in JSON.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A node of a fixture template or of a generated fixture.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
    /// Placeholder leaf; only populated when an override spec is supplied.
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
    Date(NaiveDate),
    Array(Vec<FixtureValue>),
    Object(BTreeMap<String, FixtureValue>),
}

impl FixtureValue {
    /// Builds an empty object node.
    pub fn object() -> Self {
        FixtureValue::Object(BTreeMap::new())
    }

    /// Inserts a field when `self` is an object; other nodes are returned unchanged.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FixtureValue>) -> Self {
        if let FixtureValue::Object(fields) = &mut self {
            fields.insert(name.into(), value.into());
        }
        self
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FixtureValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FixtureValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FixtureValue::Integer(value) => Some(*value as f64),
            FixtureValue::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FixtureValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FixtureValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FixtureValue]> {
        match self {
            FixtureValue::Array(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, FixtureValue>> {
        match self {
            FixtureValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a field of an object node.
    pub fn get(&self, name: &str) -> Option<&FixtureValue> {
        self.as_object().and_then(|fields| fields.get(name))
    }

    /// Converts the tree into JSON, rendering dates as `YYYY-MM-DD`.
    pub fn to_json(&self) -> Result<Value> {
        let value = match self {
            FixtureValue::Null => Value::Null,
            FixtureValue::Bool(value) => Value::Bool(*value),
            FixtureValue::Integer(value) => Value::Number((*value).into()),
            FixtureValue::Decimal(value) => {
                Value::Number(Number::from_f64(*value).ok_or(Error::NonFiniteNumber)?)
            }
            FixtureValue::Text(value) => Value::String(value.clone()),
            FixtureValue::Date(value) => Value::String(value.format(DATE_FORMAT).to_string()),
            FixtureValue::Array(values) => Value::Array(
                values
                    .iter()
                    .map(FixtureValue::to_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            FixtureValue::Object(fields) => {
                let mut map = Map::new();
                for (name, value) in fields {
                    map.insert(name.clone(), value.to_json()?);
                }
                Value::Object(map)
            }
        };
        Ok(value)
    }

    /// Builds a template from any serializable value.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Deserializes the tree into a typed value.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json()?)?)
    }
}

/// Converts JSON into a template.
///
/// Strings of exactly `YYYY-MM-DD` shape that name a real day become
/// `Date` leaves, so they are regenerated as dates unless a string spec
/// overrides them. All other strings stay `Text`.
impl From<Value> for FixtureValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FixtureValue::Null,
            Value::Bool(value) => FixtureValue::Bool(value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => FixtureValue::Integer(value),
                None => FixtureValue::Decimal(number.as_f64().unwrap_or_default()),
            },
            Value::String(text) => match parse_date(&text) {
                Some(date) => FixtureValue::Date(date),
                None => FixtureValue::Text(text),
            },
            Value::Array(values) => {
                FixtureValue::Array(values.into_iter().map(FixtureValue::from).collect())
            }
            Value::Object(map) => FixtureValue::Object(
                map.into_iter()
                    .map(|(name, value)| (name, FixtureValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for FixtureValue {
    fn from(value: bool) -> Self {
        FixtureValue::Bool(value)
    }
}

impl From<i64> for FixtureValue {
    fn from(value: i64) -> Self {
        FixtureValue::Integer(value)
    }
}

impl From<f64> for FixtureValue {
    fn from(value: f64) -> Self {
        FixtureValue::Decimal(value)
    }
}

impl From<&str> for FixtureValue {
    fn from(value: &str) -> Self {
        FixtureValue::Text(value.to_string())
    }
}

impl From<String> for FixtureValue {
    fn from(value: String) -> Self {
        FixtureValue::Text(value)
    }
}

impl From<NaiveDate> for FixtureValue {
    fn from(value: NaiveDate) -> Self {
        FixtureValue::Date(value)
    }
}

impl From<Vec<FixtureValue>> for FixtureValue {
    fn from(values: Vec<FixtureValue>) -> Self {
        FixtureValue::Array(values)
    }
}

impl Serialize for FixtureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FixtureValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FixtureValue::from)
    }
}

// Only the exact `YYYY-MM-DD` shape is treated as a date.
fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}
