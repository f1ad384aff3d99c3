//! Spec strings and override trees for Autofixture.
//!
//! A spec string such as `10 < integer < 20` or `string[5]` describes how a
//! single field is generated. Override trees attach spec strings to fields of
//! a template, nesting where the template nests.

pub mod errors;
pub mod grammar;
pub mod overrides;
pub mod schema;
pub mod validate;

pub use errors::{IssueSeverity, SpecError, ValidationIssue, ValidationReport};
pub use grammar::{Range, SpecRule, Token, check_compatible, lex, parse_spec};
pub use overrides::{Override, Overrides};
pub use schema::overrides_json_schema;
pub use validate::validate_overrides;
