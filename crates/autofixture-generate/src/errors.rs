use thiserror::Error;

use autofixture_core::Category;
use autofixture_spec::SpecError;

/// Errors emitted by the population engine and primitive generators.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] autofixture_core::Error),
    #[error("field '{field}': {source}")]
    Spec {
        field: String,
        #[source]
        source: SpecError,
    },
    #[error("cannot generate values of type '{category}' for field '{field}'")]
    UnsupportedFieldType { field: String, category: Category },
    #[error("override specifies field '{field}' that is not in the template")]
    UnknownOverrideField { field: String },
    #[error("override for field '{field}' must be {expected}")]
    MisshapedOverride {
        field: String,
        expected: &'static str,
    },
    #[error("lower bound {lower} must be lower than upper bound {upper}")]
    BoundOrder { lower: f64, upper: f64 },
    #[error("no value fits between {lower} and {upper}")]
    EmptyRange { lower: i64, upper: i64 },
    #[error("no decimal fits strictly between {lower} and {upper}")]
    EmptyDecimalRange { lower: f64, upper: f64 },
    #[error("no finite decimal lies beyond {bound}")]
    DecimalOverflow { bound: f64 },
    #[error("'skip' does not generate values")]
    SkipRule,
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

impl GenerationError {
    pub(crate) fn spec(field: impl ToString, source: SpecError) -> Self {
        GenerationError::Spec {
            field: field.to_string(),
            source,
        }
    }
}
