//! Dotted config field paths used in diagnostics.

use owo_colors::{OwoColorize, Stream};
use std::fmt;

/// Location of a config value, e.g. `variants.base_width`.
///
/// Field paths are compile-time constants so every diagnostic points at
/// a key that actually exists in `densify.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted = format!("`{}`", self.0);
        write!(
            f,
            "{}",
            quoted.if_supports_color(Stream::Stderr, |s| s.bright_blue())
        )
    }
}
