pub fn clamp_channel(value: i64) -> u8 {
    u8::try_from(value.clamp(0, i64::from(u8::MAX))).unwrap_or(u8::MAX)
}

/// Round to 6 fractional digits for text output.
pub fn rounded_micros(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
