//! Pluralized counts for log lines.

/// `""` for exactly one, `"s"` otherwise (including zero).
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `plural_count(3, "variant")` → `"3 variants"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}
