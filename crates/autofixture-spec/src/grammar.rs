//! Spec string grammar.
//!
//! ```text
//! spec     := "skip" | "boolean" | "date" | "string" | "string" "[" UINT "]"
//!           | numkind
//!           | numkind ("<" | ">") literal
//!           | literal "<" numkind "<" literal
//! numkind  := "number" | "integer" | "decimal"
//! literal  := ["-"] DIGITS ["." DIGITS] | ["-"] "." DIGITS
//! ```
//!
//! Keywords are case-sensitive and whitespace is allowed between tokens.
//! `number` is an alias of `decimal`.

use std::fmt;

use autofixture_core::Category;

use crate::errors::SpecError;

/// Lexical unit of a spec string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    /// Numeric literal, kept as written so integer checks see the source text.
    Literal(String),
    Less,
    Greater,
    OpenBracket,
    CloseBracket,
}

/// Bounds of a numeric spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Range<T> {
    /// The default `[0, window)` range.
    Any,
    /// Strictly below the bound.
    Below(T),
    /// Strictly above the bound.
    Above(T),
    /// Strictly between the bounds.
    Between(T, T),
}

/// Parsed form of a spec string.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecRule {
    Skip,
    Boolean,
    Date,
    /// Random alphanumeric text; `None` uses the generator's default length.
    String { length: Option<usize> },
    Integer(Range<i64>),
    Decimal(Range<f64>),
}

impl SpecRule {
    /// Name of the kind the rule produces, as used in compatibility errors.
    pub fn kind(&self) -> &'static str {
        match self {
            SpecRule::Skip => "skip",
            SpecRule::Boolean => "boolean",
            SpecRule::Date => "date",
            SpecRule::String { .. } => "string",
            SpecRule::Integer(_) | SpecRule::Decimal(_) => "number",
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, SpecRule::Skip)
    }
}

impl fmt::Display for SpecRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecRule::Skip => f.write_str("skip"),
            SpecRule::Boolean => f.write_str("boolean"),
            SpecRule::Date => f.write_str("date"),
            SpecRule::String { length: None } => f.write_str("string"),
            SpecRule::String {
                length: Some(length),
            } => write!(f, "string[{length}]"),
            SpecRule::Integer(range) => write_range(f, "integer", range),
            SpecRule::Decimal(range) => write_range(f, "decimal", range),
        }
    }
}

fn write_range<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    kind: &str,
    range: &Range<T>,
) -> fmt::Result {
    match range {
        Range::Any => f.write_str(kind),
        Range::Below(upper) => write!(f, "{kind} < {upper}"),
        Range::Above(lower) => write!(f, "{kind} > {lower}"),
        Range::Between(lower, upper) => write!(f, "{lower} < {kind} < {upper}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericKind {
    Integer,
    Decimal,
}

impl NumericKind {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "integer" => Some(NumericKind::Integer),
            "number" | "decimal" => Some(NumericKind::Decimal),
            _ => None,
        }
    }
}

/// Splits a spec string into tokens.
pub fn lex(spec: &str) -> Result<Vec<Token>, SpecError> {
    let mut tokens = Vec::new();
    let mut chars = spec.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '<' => {
                chars.next();
                tokens.push(Token::Less);
            }
            '>' => {
                chars.next();
                tokens.push(Token::Greater);
            }
            '[' => {
                chars.next();
                tokens.push(Token::OpenBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::CloseBracket);
            }
            c if c.is_ascii_alphabetic() => {
                let mut end = start;
                while let Some(&(idx, c)) = chars.peek() {
                    if !(c.is_ascii_alphanumeric() || c == '_') {
                        break;
                    }
                    end = idx + c.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Word(spec[start..end].to_string()));
            }
            c if c.is_ascii_digit() || c == '.' || c == '-' => {
                let mut end = start;
                while let Some(&(idx, c)) = chars.peek() {
                    let sign = c == '-' && idx == start;
                    if !(c.is_ascii_digit() || c == '.' || sign) {
                        break;
                    }
                    end = idx + c.len_utf8();
                    chars.next();
                }
                let literal = &spec[start..end];
                if !is_well_formed_literal(literal) {
                    return Err(SpecError::grammar(
                        spec,
                        format!("malformed number literal '{literal}'"),
                    ));
                }
                tokens.push(Token::Literal(literal.to_string()));
            }
            other => {
                return Err(SpecError::grammar(
                    spec,
                    format!("unexpected character '{other}'"),
                ));
            }
        }
    }

    Ok(tokens)
}

fn is_well_formed_literal(literal: &str) -> bool {
    let unsigned = literal.strip_prefix('-').unwrap_or(literal);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && digits(whole),
        Some(fraction) => digits(whole) && !fraction.is_empty() && digits(fraction),
    }
}

/// Parses a spec string into a [`SpecRule`].
pub fn parse_spec(spec: &str) -> Result<SpecRule, SpecError> {
    let tokens = lex(spec)?;

    match tokens.as_slice() {
        [Token::Word(word)] => parse_keyword(spec, word),
        [
            Token::Word(word),
            Token::OpenBracket,
            Token::Literal(length),
            Token::CloseBracket,
        ] if word == "string" => parse_string_length(spec, length),
        [
            Token::Word(word),
            op @ (Token::Less | Token::Greater),
            Token::Literal(bound),
        ] => {
            let kind = NumericKind::from_word(word)
                .ok_or_else(|| SpecError::grammar(spec, format!("'{word}' cannot be bounded")))?;
            parse_one_sided(spec, kind, *op == Token::Less, bound)
        }
        [
            Token::Literal(lower),
            Token::Less,
            Token::Word(word),
            Token::Less,
            Token::Literal(upper),
        ] => {
            let kind = NumericKind::from_word(word)
                .ok_or_else(|| SpecError::grammar(spec, format!("'{word}' cannot be bounded")))?;
            parse_two_sided(spec, kind, lower, upper)
        }
        [] => Err(SpecError::grammar(spec, "empty spec")),
        _ => Err(SpecError::grammar(spec, "unrecognized spec")),
    }
}

fn parse_keyword(spec: &str, word: &str) -> Result<SpecRule, SpecError> {
    let rule = match word {
        "skip" => SpecRule::Skip,
        "boolean" => SpecRule::Boolean,
        "date" => SpecRule::Date,
        "string" => SpecRule::String { length: None },
        "integer" => SpecRule::Integer(Range::Any),
        "number" | "decimal" => SpecRule::Decimal(Range::Any),
        other => {
            return Err(SpecError::grammar(spec, format!("unknown kind '{other}'")));
        }
    };
    Ok(rule)
}

fn parse_string_length(spec: &str, literal: &str) -> Result<SpecRule, SpecError> {
    let length = literal
        .parse::<usize>()
        .map_err(|_| SpecError::grammar(spec, format!("invalid string length '{literal}'")))?;
    Ok(SpecRule::String {
        length: Some(length),
    })
}

fn parse_one_sided(
    spec: &str,
    kind: NumericKind,
    is_upper_bound: bool,
    bound: &str,
) -> Result<SpecRule, SpecError> {
    match kind {
        NumericKind::Decimal => {
            let bound = parse_decimal(spec, bound)?;
            Ok(SpecRule::Decimal(if is_upper_bound {
                Range::Below(bound)
            } else {
                Range::Above(bound)
            }))
        }
        NumericKind::Integer => {
            let bound = parse_integer(spec, bound)?;
            Ok(SpecRule::Integer(if is_upper_bound {
                Range::Below(bound)
            } else {
                Range::Above(bound)
            }))
        }
    }
}

fn parse_two_sided(
    spec: &str,
    kind: NumericKind,
    lower: &str,
    upper: &str,
) -> Result<SpecRule, SpecError> {
    let lower_value = parse_decimal(spec, lower)?;
    let upper_value = parse_decimal(spec, upper)?;
    if lower_value >= upper_value {
        return Err(SpecError::BoundOrder {
            lower: lower.to_string(),
            upper: upper.to_string(),
        });
    }

    match kind {
        NumericKind::Decimal => Ok(SpecRule::Decimal(Range::Between(lower_value, upper_value))),
        NumericKind::Integer => {
            let lower = parse_integer(spec, lower)?;
            let upper = parse_integer(spec, upper)?;
            if upper.saturating_sub(lower) < 2 {
                return Err(SpecError::EmptyRange {
                    spec: spec.to_string(),
                });
            }
            Ok(SpecRule::Integer(Range::Between(lower, upper)))
        }
    }
}

fn parse_integer(spec: &str, literal: &str) -> Result<i64, SpecError> {
    if literal.contains('.') {
        return Err(SpecError::NonIntegerBound {
            spec: spec.to_string(),
            literal: literal.to_string(),
        });
    }
    literal
        .parse::<i64>()
        .map_err(|_| SpecError::grammar(spec, format!("integer literal '{literal}' out of range")))
}

fn parse_decimal(spec: &str, literal: &str) -> Result<f64, SpecError> {
    literal
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SpecError::grammar(spec, format!("number literal '{literal}' out of range")))
}

/// Rejects specs whose kind cannot describe a field of `category`.
///
/// `Null` placeholders accept any spec. Date fields also accept string rules,
/// since a date template value is `YYYY-MM-DD` text in JSON.
pub fn check_compatible(spec: &str, rule: &SpecRule, category: Category) -> Result<(), SpecError> {
    let compatible = match (category, rule) {
        (_, SpecRule::Skip) | (Category::Null, _) => true,
        (Category::Boolean, SpecRule::Boolean) => true,
        (Category::String | Category::Date, SpecRule::String { .. }) => true,
        (Category::Number, SpecRule::Integer(_) | SpecRule::Decimal(_)) => true,
        (Category::Date, SpecRule::Date) => true,
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(SpecError::IncompatibleSpec {
            spec: spec.to_string(),
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_two_sided_spec() {
        let tokens = lex(" 10<integer < -2.5 ").expect("lex");
        assert_eq!(
            tokens,
            vec![
                Token::Literal("10".to_string()),
                Token::Less,
                Token::Word("integer".to_string()),
                Token::Less,
                Token::Literal("-2.5".to_string()),
            ]
        );
    }

    #[test]
    fn lexer_rejects_malformed_literals() {
        for spec in ["integer > 1.", "integer > -", "integer > 1.2.3"] {
            assert!(
                matches!(lex(spec), Err(SpecError::InvalidSpecGrammar { .. })),
                "{spec}"
            );
        }
    }

    #[test]
    fn lexer_rejects_unknown_characters() {
        assert!(lex("integer >= 3").is_err());
        let err = lex("integer = 3").expect_err("unknown char");
        assert!(matches!(err, SpecError::InvalidSpecGrammar { ref reason, .. } if reason.contains("'='")));
    }

    #[test]
    fn number_is_a_decimal_alias() {
        assert_eq!(parse_spec("number"), Ok(SpecRule::Decimal(Range::Any)));
        assert_eq!(parse_spec("number > 3"), Ok(SpecRule::Decimal(Range::Above(3.0))));
        assert_eq!(parse_spec("number < -2"), Ok(SpecRule::Decimal(Range::Below(-2.0))));
        assert_eq!(parse_spec("number > 3.5"), Ok(SpecRule::Decimal(Range::Above(3.5))));
        assert_eq!(
            parse_spec("1 < number < 2.5"),
            Ok(SpecRule::Decimal(Range::Between(1.0, 2.5)))
        );
    }

    #[test]
    fn display_renders_canonical_grammar() {
        for spec in [
            "boolean",
            "string[4]",
            "integer > 5",
            "integer < -5",
            "10 < integer < 20",
            "decimal > 1.5",
            "0.5 < decimal < 2",
        ] {
            let rule = parse_spec(spec).expect("parse");
            assert_eq!(rule.to_string(), spec);
            assert_eq!(parse_spec(&rule.to_string()), Ok(rule));
        }
    }
}
