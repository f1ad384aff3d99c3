use std::collections::BTreeMap;

use autofixture_core::{Category, FieldPath, FixtureValue};

use crate::errors::{IssueSeverity, ValidationIssue, ValidationReport};
use crate::grammar::{check_compatible, parse_spec};
use crate::overrides::{Override, Overrides};

/// Checks an override tree against a template without generating anything.
///
/// Unknown fields are warnings unless `strict` is set.
pub fn validate_overrides(
    template: &FixtureValue,
    overrides: &Overrides,
    strict: bool,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_level(template, overrides, &FieldPath::root(), strict, &mut report);
    report
}

fn validate_level(
    template: &FixtureValue,
    overrides: &Overrides,
    path: &FieldPath,
    strict: bool,
    report: &mut ValidationReport,
) {
    let Some(fields) = object_fields(template) else {
        if !overrides.is_empty() {
            report.push(ValidationIssue::new(
                IssueSeverity::Error,
                "misshaped_override",
                path.as_str(),
                "nested overrides given for a node without fields",
            ));
        }
        return;
    };

    for (name, entry) in overrides.iter() {
        let field_path = path.child(name);
        let Some(value) = fields.get(name) else {
            let severity = if strict {
                IssueSeverity::Error
            } else {
                IssueSeverity::Warning
            };
            report.push(ValidationIssue::new(
                severity,
                "unknown_field",
                field_path.as_str(),
                format!("override specifies field '{name}' that is not in the template"),
            ));
            continue;
        };

        let category = match Category::of(value, field_path.as_str()) {
            Ok(category) => category,
            Err(err) => {
                report.push(ValidationIssue::new(
                    IssueSeverity::Error,
                    "unsupported_structure",
                    field_path.as_str(),
                    err.to_string(),
                ));
                continue;
            }
        };

        match entry {
            Override::Tree(_) if !category.takes_nested_overrides() => {
                report.push(ValidationIssue::new(
                    IssueSeverity::Error,
                    "misshaped_override",
                    field_path.as_str(),
                    format!("nested overrides given for {category} field"),
                ));
            }
            Override::Tree(tree) if category == Category::ArrayOfObjects => {
                if let Some(element) = value.as_array().and_then(<[FixtureValue]>::first) {
                    validate_level(element, tree, &field_path.element(), strict, report);
                }
            }
            Override::Tree(tree) => validate_level(value, tree, &field_path, strict, report),
            Override::Spec(spec) => validate_spec(spec, value, category, &field_path, report),
        }
    }
}

fn validate_spec(
    spec: &str,
    value: &FixtureValue,
    category: Category,
    path: &FieldPath,
    report: &mut ValidationReport,
) {
    let rule = match parse_spec(spec) {
        Ok(rule) => rule,
        Err(err) => {
            report.push(ValidationIssue::new(
                IssueSeverity::Error,
                "invalid_spec",
                path.as_str(),
                err.to_string(),
            ));
            return;
        }
    };
    if rule.is_skip() {
        return;
    }

    let target = match category {
        nested if nested.takes_nested_overrides() => {
            report.push(ValidationIssue::new(
                IssueSeverity::Error,
                "misshaped_override",
                path.as_str(),
                format!("spec '{spec}' given for {nested} field"),
            ));
            return;
        }
        Category::EmptyArray => {
            report.push(ValidationIssue::new(
                IssueSeverity::Warning,
                "ignored_override",
                path.as_str(),
                format!("spec '{spec}' ignored: empty arrays stay empty"),
            ));
            return;
        }
        Category::ArrayOfPrimitives => value
            .as_array()
            .and_then(<[FixtureValue]>::first)
            .and_then(|first| Category::of(first, path.as_str()).ok())
            .unwrap_or(Category::Null),
        scalar => scalar,
    };

    if let Err(err) = check_compatible(spec, &rule, target) {
        report.push(ValidationIssue::new(
            IssueSeverity::Error,
            "incompatible_spec",
            path.as_str(),
            err.to_string(),
        ));
    }
}

fn object_fields(template: &FixtureValue) -> Option<&BTreeMap<String, FixtureValue>> {
    match template {
        FixtureValue::Object(fields) => Some(fields),
        FixtureValue::Array(values) => values.first().and_then(FixtureValue::as_object),
        _ => None,
    }
}
