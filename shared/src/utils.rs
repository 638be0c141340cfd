// Stateless numeric helpers shared by the engine and any export front end.

const VERSION: &str = "v4.1.11";

/// Current cut-list release string.
pub fn version() -> &'static str {
    VERSION
}

/// Rounds `value` to `digits` decimal places.
///
/// Halfway cases round away from zero, applied to the scaled binary value. So
/// `round_to(2.5, 0)` is `3.0`, but `round_to(1.005, 2)` is `1.0` because
/// `1.005 * 100.0` is already just below `100.5` in binary.
///
/// When `value * 10^digits` is no longer finite (digits past the f64 range),
/// `value` is returned unchanged: it already has fewer decimals than asked for.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Renders `value` as a zero-padded decimal of exactly `width` characters.
///
/// Values whose natural rendering is wider than `width` keep their rightmost
/// `width` characters.
pub fn fixed_width_integer(width: usize, value: i64) -> String {
    let padded = format!("{:0width$}", value, width = width);
    let excess = padded.len().saturating_sub(width);
    padded[excess..].to_string()
}
