//! Density scale multipliers.
//!
//! A [`Scale`] names a density bucket relative to the base width:
//!
//! ```text
//! base_width = 300
//! 1.0 → dest/icon.png        (300px, implicit base)
//! 2.0 → dest/2.0x/icon.png   (600px)
//! 3.0 → dest/3.0x/icon.png   (900px)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing a scale or a delimited scale list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error("scale must be a finite positive number, got {0}")]
    NotPositive(f64),
}

/// A positive density multiplier (e.g. 2.0 for `2.0x`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scale(f64);

impl Scale {
    /// Create a scale, rejecting zero, negative and non-finite values.
    pub fn new(value: f64) -> Result<Self, ScaleError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ScaleError::NotPositive(value))
        }
    }

    /// Wrap a value without validation.
    ///
    /// Config deserialization goes through this path; `validate` reports
    /// bad values with field context instead of failing the parse.
    #[inline]
    pub const fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Whether the wrapped value is a usable multiplier.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Directory name for this density bucket, always one decimal digit.
    ///
    /// `2.0` → `"2.0x"`, `1.5` → `"1.5x"`, `3` → `"3.0x"`.
    pub fn dir_name(self) -> String {
        format!("{:.1}x", self.0)
    }

    /// Pixel width of this variant for the given base width.
    ///
    /// Signed so that degenerate scales produce a non-positive width that
    /// callers can skip rather than wrap.
    #[allow(clippy::cast_possible_truncation)]
    pub fn target_width(self, base_width: u32) -> i64 {
        (f64::from(base_width) * self.0).round() as i64
    }

    /// Parse a delimited scale list such as `"2,3,4"` or `"1.5, 2"`.
    ///
    /// Empty segments are ignored, so `"2,3,"` yields two scales.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ScaleError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for Scale {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix('x').unwrap_or(trimmed);
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ScaleError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}

/// Check whether a directory name looks like a density bucket (`2.0x`, `3x`).
pub fn is_density_dir_name(name: &str) -> bool {
    name.strip_suffix('x')
        .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit() || c == '.'))
        .and_then(|n| n.parse::<f64>().ok())
        .is_some_and(|v| v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_name_one_decimal() {
        assert_eq!(Scale::new(2.0).unwrap().dir_name(), "2.0x");
        assert_eq!(Scale::new(3.0).unwrap().dir_name(), "3.0x");
        assert_eq!(Scale::new(1.5).unwrap().dir_name(), "1.5x");
    }

    #[test]
    fn test_target_width_rounds() {
        let scale = Scale::new(1.5).unwrap();
        assert_eq!(scale.target_width(301), 452); // 451.5 rounds up
        assert_eq!(Scale::new(2.0).unwrap().target_width(300), 600);
    }

    #[test]
    fn test_target_width_can_collapse_to_zero() {
        let tiny = Scale::new(0.001).unwrap();
        assert_eq!(tiny.target_width(300), 0);
    }

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(Scale::new(0.0).is_err());
        assert!(Scale::new(-2.0).is_err());
        assert!(Scale::new(f64::NAN).is_err());
        assert!(Scale::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_list() {
        let scales = Scale::parse_list("2,3,4").unwrap();
        assert_eq!(
            scales.iter().map(|s| s.get()).collect::<Vec<_>>(),
            vec![2.0, 3.0, 4.0]
        );

        let scales = Scale::parse_list(" 1.5 , 2x ,").unwrap();
        assert_eq!(scales.len(), 2);
        assert_eq!(scales[1].get(), 2.0);
    }

    #[test]
    fn test_parse_list_errors() {
        assert_eq!(
            Scale::parse_list("2,abc"),
            Err(ScaleError::NotANumber("abc".to_string()))
        );
        assert_eq!(Scale::parse_list("2,-1"), Err(ScaleError::NotPositive(-1.0)));
        assert!(Scale::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_is_density_dir_name() {
        assert!(is_density_dir_name("2.0x"));
        assert!(is_density_dir_name("3x"));
        assert!(!is_density_dir_name("x"));
        assert!(!is_density_dir_name("icons"));
        assert!(!is_density_dir_name("0x"));
        assert!(!is_density_dir_name("box"));
    }
}
