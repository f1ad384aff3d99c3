use autofixture_core::Category;
use autofixture_spec::{Range, SpecError, SpecRule, check_compatible, parse_spec};
use proptest::prelude::*;

#[test]
fn keywords_parse_to_default_rules() {
    assert_eq!(parse_spec("skip"), Ok(SpecRule::Skip));
    assert_eq!(parse_spec("boolean"), Ok(SpecRule::Boolean));
    assert_eq!(parse_spec("date"), Ok(SpecRule::Date));
    assert_eq!(parse_spec("string"), Ok(SpecRule::String { length: None }));
    assert_eq!(parse_spec("number"), Ok(SpecRule::Decimal(Range::Any)));
    assert_eq!(parse_spec("integer"), Ok(SpecRule::Integer(Range::Any)));
    assert_eq!(parse_spec("decimal"), Ok(SpecRule::Decimal(Range::Any)));
}

#[test]
fn fixed_length_strings_tolerate_whitespace() {
    assert_eq!(
        parse_spec("  string [ 12 ]  "),
        Ok(SpecRule::String { length: Some(12) })
    );
    assert_eq!(parse_spec("string[0]"), Ok(SpecRule::String { length: Some(0) }));
}

#[test]
fn string_length_must_be_a_non_negative_integer() {
    for spec in ["string[-1]", "string[2.5]", "string[]", "string[3"] {
        assert!(
            matches!(parse_spec(spec), Err(SpecError::InvalidSpecGrammar { .. })),
            "{spec}"
        );
    }
}

#[test]
fn one_sided_bounds() {
    assert_eq!(parse_spec("integer > 5"), Ok(SpecRule::Integer(Range::Above(5))));
    assert_eq!(parse_spec("integer<5"), Ok(SpecRule::Integer(Range::Below(5))));
    assert_eq!(parse_spec("decimal > 1.5"), Ok(SpecRule::Decimal(Range::Above(1.5))));
    assert_eq!(parse_spec("decimal < 7"), Ok(SpecRule::Decimal(Range::Below(7.0))));
    assert_eq!(parse_spec("integer > -20"), Ok(SpecRule::Integer(Range::Above(-20))));
}

#[test]
fn two_sided_bounds() {
    assert_eq!(
        parse_spec("10 < integer < 20"),
        Ok(SpecRule::Integer(Range::Between(10, 20)))
    );
    assert_eq!(
        parse_spec(".5 < decimal < 1"),
        Ok(SpecRule::Decimal(Range::Between(0.5, 1.0)))
    );
}

#[test]
fn inverted_or_equal_bounds_fail_with_bound_order() {
    for spec in ["2 < integer < 1", "3 < integer < 3", "2.5 < decimal < 2.5"] {
        assert!(
            matches!(parse_spec(spec), Err(SpecError::BoundOrder { .. })),
            "{spec}"
        );
    }
}

#[test]
fn integer_bounds_reject_decimal_points() {
    let err = parse_spec("integer > 1.5").expect_err("real bound");
    assert_eq!(
        err,
        SpecError::NonIntegerBound {
            spec: "integer > 1.5".to_string(),
            literal: "1.5".to_string(),
        }
    );
    assert!(matches!(
        parse_spec("1 < integer < 4.0"),
        Err(SpecError::NonIntegerBound { .. })
    ));
}

#[test]
fn adjacent_integer_bounds_leave_an_empty_range() {
    assert!(matches!(
        parse_spec("10 < integer < 11"),
        Err(SpecError::EmptyRange { .. })
    ));
    assert!(parse_spec("10 < integer < 12").is_ok());
}

#[test]
fn grammar_is_case_sensitive() {
    for spec in ["Integer", "BOOLEAN", "String[3]", "integer > 5 extra", "> 5", "skip skip"] {
        assert!(
            matches!(parse_spec(spec), Err(SpecError::InvalidSpecGrammar { .. })),
            "{spec}"
        );
    }
}

#[test]
fn only_numeric_kinds_take_bounds() {
    let err = parse_spec("string > 3").expect_err("string bound");
    assert!(matches!(err, SpecError::InvalidSpecGrammar { ref reason, .. } if reason.contains("string")));
}

#[test]
fn compatibility_follows_the_field_category() {
    let cases = [
        ("boolean", Category::Boolean, true),
        ("integer", Category::Boolean, false),
        ("string[3]", Category::String, true),
        ("string", Category::Number, false),
        ("integer > 3", Category::Number, true),
        ("0.5 < decimal < 1", Category::Number, true),
        ("date", Category::Date, true),
        ("date", Category::String, false),
        ("string[5]", Category::Date, true),
        ("integer", Category::Date, false),
        ("decimal", Category::Null, true),
    ];
    for (spec, category, ok) in cases {
        let rule = parse_spec(spec).expect("parse");
        let result = check_compatible(spec, &rule, category);
        assert_eq!(result.is_ok(), ok, "{spec} on {category}");
    }
}

#[test]
fn incompatible_spec_names_spec_and_type() {
    let rule = parse_spec("integer").expect("parse");
    let err = check_compatible("integer", &rule, Category::Boolean).expect_err("incompatible");
    assert_eq!(err.to_string(), "spec 'integer' not compatible with type 'boolean'");
}

proptest! {
    #[test]
    fn ordered_integer_bounds_always_parse(lower in -10_000i64..10_000, gap in 2i64..10_000) {
        let upper = lower + gap;
        let spec = format!("{lower} < integer < {upper}");
        prop_assert_eq!(parse_spec(&spec), Ok(SpecRule::Integer(Range::Between(lower, upper))));
    }

    #[test]
    fn reversed_bounds_never_parse(lower in -10_000i64..10_000, gap in 0i64..10_000) {
        let spec = format!("{} < decimal < {}", lower + gap, lower);
        prop_assert!(
            matches!(parse_spec(&spec), Err(SpecError::BoundOrder { .. })),
            "reversed bounds parsed"
        );
    }
}
