use std::ops::Range;

use super::Rgb;
use crate::util::clamp_channel;

/// Returned by [`channels_to_hex`] when any channel is missing.
const MISSING_CHANNEL_HEX: &str = "#000000";

fn strip_hash(text: &str) -> &str {
    text.strip_prefix('#').unwrap_or(text)
}

fn is_six_hex_digits(digits: &str) -> bool {
    digits.len() == 6 && digits.bytes().all(|byte| byte.is_ascii_hexdigit())
}

/// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (any case) into an RGB triple.
///
/// Shorthand digits are duplicated (`"ABC"` reads as `"AABBCC"`). Anything
/// that is not exactly six hex digits after expansion yields `None`.
pub fn hex_to_rgb(text: &str) -> Option<Rgb> {
    let digits = strip_hash(text);
    let expanded: String;
    let digits = if digits.chars().count() == 3 {
        expanded = digits.chars().flat_map(|c| [c, c]).collect();
        expanded.as_str()
    } else {
        digits
    };
    if !is_six_hex_digits(digits) {
        return None;
    }
    let channel = |range: Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Canonical uppercase `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Format loosely typed channels, clamping each to `0..=255`.
///
/// A missing channel produces `#000000` instead of an error.
pub fn channels_to_hex(r: Option<i64>, g: Option<i64>, b: Option<i64>) -> String {
    let (Some(r), Some(g), Some(b)) = (r, g, b) else {
        return MISSING_CHANNEL_HEX.to_string();
    };
    rgb_to_hex(Rgb::new(clamp_channel(r), clamp_channel(g), clamp_channel(b)))
}

/// Strict check: exactly six hex digits after an optional `#`.
///
/// Shorthand is rejected here even though [`hex_to_rgb`] accepts it.
pub fn is_valid_hex_color(text: &str) -> bool {
    is_six_hex_digits(strip_hash(text))
}

pub fn normalize_hex(text: &str) -> Option<String> {
    hex_to_rgb(text).map(rgb_to_hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_hex_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#FF8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("#aBcDeF"), Some(Rgb::new(0xAB, 0xCD, 0xEF)));
    }

    #[test]
    fn expands_shorthand() {
        let red = Some(Rgb::new(255, 0, 0));
        assert_eq!(hex_to_rgb("F00"), red);
        assert_eq!(hex_to_rgb("#f00"), red);
        assert_eq!(hex_to_rgb("FF0000"), red);
        assert_eq!(hex_to_rgb("ABC"), hex_to_rgb("AABBCC"));
    }

    #[test]
    fn rejects_malformed_hex() {
        for text in [
            "", "#", "ZZZZZZ", "#FF00", "#FF00000", "##FF0000", "+F0000", " FF0000", "FF 000",
            "FFéFF", "#GGG",
        ] {
            assert_eq!(hex_to_rgb(text), None, "{text:?} should not parse");
        }
    }

    #[test]
    fn formats_uppercase_with_hash() {
        assert_eq!(rgb_to_hex(Rgb::new(10, 171, 255)), "#0AABFF");
        assert_eq!(Rgb::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn hex_roundtrip_normalizes() {
        for text in ["#00ff7f", "00FF7F", "#123abc", "FFFFFF"] {
            let rgb = hex_to_rgb(text).expect("valid hex");
            let expected = format!("#{}", text.trim_start_matches('#').to_ascii_uppercase());
            assert_eq!(rgb_to_hex(rgb), expected);
        }
    }

    #[test]
    fn channels_clamp_and_fall_back_to_black() {
        assert_eq!(channels_to_hex(Some(300), Some(-5), Some(128)), "#FF0080");
        assert_eq!(channels_to_hex(Some(255), None, Some(0)), "#000000");
        assert_eq!(channels_to_hex(None, None, None), "#000000");
    }

    #[test]
    fn validation_rejects_shorthand_that_parsing_accepts() {
        assert!(is_valid_hex_color("#FF0000"));
        assert!(is_valid_hex_color("ff0000"));
        assert!(!is_valid_hex_color("ZZZZZZ"));
        // Parsing accepts shorthand, validation does not.
        assert!(hex_to_rgb("F00").is_some());
        assert!(!is_valid_hex_color("F00"));
        assert!(!is_valid_hex_color("#F00"));
    }

    #[test]
    fn normalize_expands_and_uppercases() {
        assert_eq!(normalize_hex("#abc").as_deref(), Some("#AABBCC"));
        assert_eq!(normalize_hex("nope"), None);
    }
}
