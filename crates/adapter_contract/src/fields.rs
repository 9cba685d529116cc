//! Field-level coercion of raw text into typed values.
//!
//! Numeric fields apply a fixed precedence: emptiness, then parseability,
//! then sign. Each failure yields the single message the client sees.

use crate::spec::{ExerciseStyle, ExoticType, OptionSide, PositiveFloat};

/// Coerces one named raw field at a time.
///
/// # Examples
/// ```
/// use adapter_contract::FieldValidator;
///
/// assert_eq!(FieldValidator::positive_float("STRIKE", " 1.25 ").unwrap().get(), 1.25);
/// assert_eq!(FieldValidator::positive_float("STRIKE", "").unwrap_err(), "STRIKE is empty");
/// assert_eq!(
///     FieldValidator::positive_float("STRIKE", "abc").unwrap_err(),
///     "Invalid STRIKE. Must be a float."
/// );
/// assert_eq!(FieldValidator::positive_float("STRIKE", "-1").unwrap_err(), "STRIKE must be > 0.");
/// ```
pub struct FieldValidator;

impl FieldValidator {
    /// Parses a finite number strictly greater than zero.
    pub fn positive_float(field: &str, raw: &str) -> Result<PositiveFloat, String> {
        let value = Self::float(field, raw)?;
        PositiveFloat::new(value).ok_or_else(|| format!("{} must be > 0.", field))
    }

    /// Parses a finite number of any sign.
    pub fn float(field: &str, raw: &str) -> Result<f64, String> {
        let text = Self::text(field, raw)?;
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(format!("Invalid {}. Must be a float.", field)),
        }
    }

    /// Trimmed non-empty text.
    pub fn text<'a>(field: &str, raw: &'a str) -> Result<&'a str, String> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(format!("{} is empty", field));
        }
        Ok(text)
    }

    /// `CALL` or `PUT`, case-insensitive.
    pub fn option_side(field: &str, raw: &str) -> Result<OptionSide, String> {
        Self::text(field, raw)?.parse()
    }

    /// `E`/`EUROPEAN` or `A`/`AMERICAN`, case-insensitive.
    pub fn exercise_style(field: &str, raw: &str) -> Result<ExerciseStyle, String> {
        Self::text(field, raw)?.parse()
    }

    /// One of the exotic type literals, case-insensitive.
    pub fn exotic_type(field: &str, raw: &str) -> Result<ExoticType, String> {
        Self::text(field, raw)?.parse()
    }
}
