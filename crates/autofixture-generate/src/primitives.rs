//! Primitive value generators.
//!
//! Every generator draws from an explicit random source. Bare and one-sided
//! numeric generators work inside a window (1000 by default):
//!
//! - `create_integer` / `create_decimal`: `[0, window)`
//! - `*_below(upper)`: `[upper - window, upper)`
//! - `*_above(lower)`: `(lower, lower + window]`
//! - `*_between(lower, upper)`: `(lower, upper)`, both endpoints excluded

use chrono::NaiveDate;
use rand::{Rng, RngCore};

use crate::errors::GenerationError;
use crate::model::DEFAULT_WINDOW;

pub const DEFAULT_STRING_LENGTH: usize = 10;
pub const STRING_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUV1234567890";

const DATE_FIRST_YEAR: i32 = 2001;
const DATE_END_YEAR: i32 = 2018;
// Zero-based; January through November.
const DATE_END_MONTH: u32 = 11;
const MAX_OPEN_INTERVAL_DRAWS: usize = 64;

pub fn create_boolean(rng: &mut dyn RngCore) -> bool {
    rng.random_bool(0.5)
}

/// Random alphanumeric text of `length` characters (10 when `None`).
pub fn create_string(rng: &mut dyn RngCore, length: Option<usize>) -> String {
    let alphabet = STRING_ALPHABET.as_bytes();
    let length = length.unwrap_or(DEFAULT_STRING_LENGTH);
    (0..length)
        .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
        .collect()
}

pub fn create_decimal(rng: &mut dyn RngCore) -> f64 {
    create_decimal_within(rng, DEFAULT_WINDOW)
}

pub fn create_decimal_within(rng: &mut dyn RngCore, window: u32) -> f64 {
    rng.random_range(0.0..window_f64(window))
}

pub fn create_decimal_below(rng: &mut dyn RngCore, upper: f64) -> Result<f64, GenerationError> {
    create_decimal_below_within(rng, upper, DEFAULT_WINDOW)
}

/// Fails only when no finite decimal lies below `upper`.
pub fn create_decimal_below_within(
    rng: &mut dyn RngCore,
    upper: f64,
    window: u32,
) -> Result<f64, GenerationError> {
    let value = upper - positive_offset(rng, window);
    // Large bounds absorb the offset when rounding.
    let value = if value < upper { value } else { upper.next_down() };
    if !value.is_finite() {
        return Err(GenerationError::DecimalOverflow { bound: upper });
    }
    Ok(value)
}

pub fn create_decimal_above(rng: &mut dyn RngCore, lower: f64) -> Result<f64, GenerationError> {
    create_decimal_above_within(rng, lower, DEFAULT_WINDOW)
}

/// Fails only when no finite decimal lies above `lower`.
pub fn create_decimal_above_within(
    rng: &mut dyn RngCore,
    lower: f64,
    window: u32,
) -> Result<f64, GenerationError> {
    let value = lower + positive_offset(rng, window);
    let value = if value > lower { value } else { lower.next_up() };
    if !value.is_finite() {
        return Err(GenerationError::DecimalOverflow { bound: lower });
    }
    Ok(value)
}

pub fn create_decimal_between(
    rng: &mut dyn RngCore,
    lower: f64,
    upper: f64,
) -> Result<f64, GenerationError> {
    let ordered = lower < upper && lower.is_finite() && upper.is_finite();
    if !ordered {
        return Err(GenerationError::BoundOrder { lower, upper });
    }
    for _ in 0..MAX_OPEN_INTERVAL_DRAWS {
        let t: f64 = rng.random();
        // Interpolates without `upper - lower`, which overflows for wide bounds.
        let value = lower * (1.0 - t) + upper * t;
        if value > lower && value < upper {
            return Ok(value);
        }
    }
    let midpoint = lower / 2.0 + upper / 2.0;
    if midpoint > lower && midpoint < upper {
        Ok(midpoint)
    } else {
        Err(GenerationError::EmptyDecimalRange { lower, upper })
    }
}

pub fn create_integer(rng: &mut dyn RngCore) -> i64 {
    create_integer_within(rng, DEFAULT_WINDOW)
}

pub fn create_integer_within(rng: &mut dyn RngCore, window: u32) -> i64 {
    rng.random_range(0..i64::from(window.max(1)))
}

pub fn create_integer_below(rng: &mut dyn RngCore, upper: i64) -> Result<i64, GenerationError> {
    create_integer_below_within(rng, upper, DEFAULT_WINDOW)
}

pub fn create_integer_below_within(
    rng: &mut dyn RngCore,
    upper: i64,
    window: u32,
) -> Result<i64, GenerationError> {
    let lower = upper.saturating_sub(i64::from(window.max(1)));
    if lower >= upper {
        return Err(GenerationError::EmptyRange { lower, upper });
    }
    Ok(rng.random_range(lower..upper))
}

pub fn create_integer_above(rng: &mut dyn RngCore, lower: i64) -> Result<i64, GenerationError> {
    create_integer_above_within(rng, lower, DEFAULT_WINDOW)
}

pub fn create_integer_above_within(
    rng: &mut dyn RngCore,
    lower: i64,
    window: u32,
) -> Result<i64, GenerationError> {
    let upper = lower.saturating_add(i64::from(window.max(1)));
    if upper <= lower {
        return Err(GenerationError::EmptyRange { lower, upper });
    }
    Ok(rng.random_range(lower + 1..=upper))
}

pub fn create_integer_between(
    rng: &mut dyn RngCore,
    lower: i64,
    upper: i64,
) -> Result<i64, GenerationError> {
    if upper.saturating_sub(lower) < 2 {
        return Err(GenerationError::EmptyRange { lower, upper });
    }
    Ok(rng.random_range(lower + 1..upper))
}

/// First day of a random month between January 2001 and November 2017.
pub fn create_date(rng: &mut dyn RngCore) -> NaiveDate {
    let year = rng.random_range(DATE_FIRST_YEAR..DATE_END_YEAR);
    let month = rng.random_range(0..DATE_END_MONTH) + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn window_f64(window: u32) -> f64 {
    f64::from(window.max(1))
}

// Uniform in (0, window].
fn positive_offset(rng: &mut dyn RngCore, window: u32) -> f64 {
    let window = window_f64(window);
    window - rng.random_range(0.0..window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn decimal_offsets_stay_inside_the_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..2_000 {
            let offset = positive_offset(&mut rng, 10);
            assert!(offset > 0.0 && offset <= 10.0, "{offset}");
        }
    }

    #[test]
    fn zero_window_is_treated_as_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(create_integer_within(&mut rng, 0), 0);
        assert_eq!(create_integer_above_within(&mut rng, 7, 0).ok(), Some(8));
        assert_eq!(create_integer_below_within(&mut rng, 7, 0).ok(), Some(6));
    }

    #[test]
    fn integer_limits_report_empty_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(matches!(
            create_integer_above(&mut rng, i64::MAX),
            Err(GenerationError::EmptyRange { .. })
        ));
        assert!(matches!(
            create_integer_below(&mut rng, i64::MIN),
            Err(GenerationError::EmptyRange { .. })
        ));
        assert_eq!(create_integer_above(&mut rng, i64::MAX - 1).ok(), Some(i64::MAX));
    }

    #[test]
    fn decimal_limits_report_overflow() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        assert!(matches!(
            create_decimal_above(&mut rng, f64::MAX),
            Err(GenerationError::DecimalOverflow { .. })
        ));
        assert!(matches!(
            create_decimal_below(&mut rng, f64::MIN),
            Err(GenerationError::DecimalOverflow { .. })
        ));
    }
}
