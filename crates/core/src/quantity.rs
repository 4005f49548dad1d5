//! Quantities and locale-aware numeric text.
//!
//! Quantities are plain `f64` values. Entry surfaces show them with a fixed
//! number of decimals (`QTY_SCALE`) using the user's separators, and parse the
//! user's text back with the same separators.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Decimal places shown for quantities.
pub const QTY_SCALE: usize = 2;

/// Tolerance used when comparing accumulated quantities.
pub const QTY_EPSILON: f64 = 1e-9;

/// `a <= b`, allowing for floating point accumulation error.
pub fn qty_le(a: f64, b: f64) -> bool {
    a <= b + QTY_EPSILON
}

/// Separators used to render and read numbers for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    pub decimal_separator: char,
    /// `None` disables digit grouping.
    pub group_separator: Option<char>,
}

impl ValueObject for NumberLocale {}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl NumberLocale {
    pub const fn en_us() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: Some(','),
        }
    }

    pub const fn de_de() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: Some('.'),
        }
    }

    /// Format `value` with exactly `scale` decimals, grouping the integer part.
    ///
    /// Values that round to zero never carry a minus sign.
    pub fn format(&self, value: f64, scale: usize) -> String {
        let fixed = format!("{:.*}", scale, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + 4);
        let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }

        let digits = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                if let Some(sep) = self.group_separator {
                    out.push(sep);
                }
            }
            out.push(ch);
        }

        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    /// Parse user-entered numeric text.
    ///
    /// Group separators are ignored wherever they appear; the decimal separator
    /// may appear at most once. Empty, non-numeric and non-finite input is a
    /// validation error.
    pub fn parse(&self, text: &str) -> DomainResult<f64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("quantity is required"));
        }

        let mut normalized = String::with_capacity(trimmed.len());
        let mut seen_decimal = false;
        for ch in trimmed.chars() {
            if Some(ch) == self.group_separator {
                continue;
            }
            if ch == self.decimal_separator {
                if seen_decimal {
                    return Err(DomainError::validation(format!(
                        "not a number: {trimmed:?}"
                    )));
                }
                seen_decimal = true;
                normalized.push('.');
                continue;
            }
            match ch {
                '0'..='9' | '+' | '-' => normalized.push(ch),
                _ => {
                    return Err(DomainError::validation(format!(
                        "not a number: {trimmed:?}"
                    )));
                }
            }
        }

        let value: f64 = normalized
            .parse()
            .map_err(|_| DomainError::validation(format!("not a number: {trimmed:?}")))?;
        if !value.is_finite() {
            return Err(DomainError::validation("quantity must be finite"));
        }
        Ok(value)
    }
}
