use serde::{Deserialize, Serialize};
use serde_json::Number as JsonNumber;

use crate::CanonicalizeError;

/// A JSON number held as a finite IEEE-754 double.
#[derive(Clone, Copy, Debug, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(f64);

impl Number {
    /// Creates a new [`Number`] after validating finiteness.
    ///
    /// ```
    /// # use contains_core::Number;
    /// let num = Number::new(42.0)?;
    /// assert_eq!(num.get(), 42.0);
    /// assert!(Number::new(f64::NAN).is_err());
    /// # Ok::<(), contains_core::CanonicalizeError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, CanonicalizeError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(CanonicalizeError::NotFinite { value })
        }
    }

    /// Returns the raw floating-point value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Converts the number into a `serde_json::Number`, preferring an integer
    /// representation when the value has no fractional part.
    #[must_use]
    pub fn to_json_number(self) -> JsonNumber {
        if self.0.fract() == 0.0 && !(self.0 == 0.0 && self.0.is_sign_negative()) {
            if (i64::MIN as f64) <= self.0 && self.0 <= (i64::MAX as f64) {
                return JsonNumber::from(self.0 as i64);
            }
            if self.0 >= 0.0 && self.0 <= (u64::MAX as f64) {
                return JsonNumber::from(self.0 as u64);
            }
        }
        // Finiteness is checked on construction, so this only falls back on
        // values serde_json refuses, which cannot happen for finite input.
        JsonNumber::from_f64(self.0).unwrap_or_else(|| JsonNumber::from(0))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_render_without_fraction() {
        let num = Number::new(5.0).unwrap();
        assert_eq!(num.to_json_number().to_string(), "5");
    }

    #[test]
    fn negative_zero_keeps_sign() {
        let num = Number::new(-0.0).unwrap();
        assert_eq!(num.to_json_number().to_string(), "-0.0");
    }

    #[test]
    fn zero_and_negative_zero_are_equal() {
        assert_eq!(Number::new(0.0).unwrap(), Number::new(-0.0).unwrap());
    }

    #[test]
    fn infinity_is_rejected() {
        let err = Number::new(f64::INFINITY).unwrap_err();
        assert!(matches!(err, CanonicalizeError::NotFinite { .. }));
    }
}
