use rand::RngCore;

use autofixture_core::FixtureValue;
use autofixture_spec::{Range, SpecError, SpecRule, parse_spec};

use crate::errors::GenerationError;
use crate::model::DEFAULT_WINDOW;
use crate::primitives;

/// A parsed spec ready to produce values.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecGenerator {
    rule: SpecRule,
    window: u32,
}

impl SpecGenerator {
    /// The default generator for a scalar template value, if its kind has one.
    pub fn implicit_for(value: &FixtureValue, window: u32) -> Option<Self> {
        let rule = match value {
            FixtureValue::Bool(_) => SpecRule::Boolean,
            FixtureValue::Text(_) => SpecRule::String { length: None },
            FixtureValue::Integer(_) => SpecRule::Integer(Range::Any),
            FixtureValue::Decimal(_) => SpecRule::Decimal(Range::Any),
            FixtureValue::Date(_) => SpecRule::Date,
            FixtureValue::Null | FixtureValue::Array(_) | FixtureValue::Object(_) => return None,
        };
        Some(Self { rule, window })
    }

    pub fn rule(&self) -> &SpecRule {
        &self.rule
    }

    /// Produces one value.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<FixtureValue, GenerationError> {
        let value = match &self.rule {
            SpecRule::Boolean => FixtureValue::Bool(primitives::create_boolean(rng)),
            SpecRule::Date => FixtureValue::Date(primitives::create_date(rng)),
            SpecRule::String { length } => {
                FixtureValue::Text(primitives::create_string(rng, *length))
            }
            SpecRule::Integer(range) => FixtureValue::Integer(match *range {
                Range::Any => primitives::create_integer_within(rng, self.window),
                Range::Below(upper) => {
                    primitives::create_integer_below_within(rng, upper, self.window)?
                }
                Range::Above(lower) => {
                    primitives::create_integer_above_within(rng, lower, self.window)?
                }
                Range::Between(lower, upper) => {
                    primitives::create_integer_between(rng, lower, upper)?
                }
            }),
            SpecRule::Decimal(range) => FixtureValue::Decimal(match *range {
                Range::Any => primitives::create_decimal_within(rng, self.window),
                Range::Below(upper) => {
                    primitives::create_decimal_below_within(rng, upper, self.window)?
                }
                Range::Above(lower) => {
                    primitives::create_decimal_above_within(rng, lower, self.window)?
                }
                Range::Between(lower, upper) => {
                    primitives::create_decimal_between(rng, lower, upper)?
                }
            }),
            SpecRule::Skip => return Err(GenerationError::SkipRule),
        };
        Ok(value)
    }
}

/// Resolves a spec string into a generator using the default window.
pub fn resolve_generator(spec: &str) -> Result<SpecGenerator, SpecError> {
    resolve_generator_within(spec, DEFAULT_WINDOW)
}

/// Resolves a spec string into a generator; `skip` produces no values and is rejected.
pub fn resolve_generator_within(spec: &str, window: u32) -> Result<SpecGenerator, SpecError> {
    let rule = parse_spec(spec)?;
    if rule.is_skip() {
        return Err(SpecError::InvalidSpecGrammar {
            spec: spec.to_string(),
            reason: "'skip' does not generate values".to_string(),
        });
    }
    Ok(SpecGenerator { rule, window })
}
