use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::overrides::Overrides;

/// Emit the JSON Schema for override documents.
pub fn overrides_json_schema() -> RootSchema {
    schema_for!(Overrides)
}
