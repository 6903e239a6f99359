//! Payload parsing primitives
//!
//! All wire payloads funnel through these helpers so no adapter repeats
//! validation logic. Numeric parsing is invariant: ASCII digits with an
//! optional leading `-`, no `+` sign, no grouping separators, no locale
//! forms. Out-of-range values are clamped to their domain rather than
//! rejected, a deliberate leniency for lossy wire encodings; malformed
//! tokens fail outright.

use zonehub_state::{MAX_LATENCY_MS, MAX_VOLUME};

/// Smallest accepted relative step
pub const MIN_STEP: u8 = 1;
/// Largest accepted relative step
pub const MAX_STEP: u8 = 50;
/// Step used when a relative payload omits the magnitude
pub const DEFAULT_STEP: u8 = 5;

/// Direction of a relative adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Strict invariant integer: optional leading `-`, then ASCII digits only
///
/// Surrounding whitespace is tolerated; anything else (including a leading
/// `+`, which is reserved for relative payloads) is a parse failure.
pub fn parse_int(payload: &str) -> Option<i64> {
    let token = payload.trim();
    if token.is_empty() {
        return None;
    }
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<i64>().ok()
}

/// Strict invariant decimal: optional leading `-`, digits, at most one `.`
pub fn parse_decimal(payload: &str) -> Option<f64> {
    let token = payload.trim();
    if token.is_empty() {
        return None;
    }
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    let mut dots = 0;
    for b in unsigned.bytes() {
        match b {
            b'0'..=b'9' => {}
            b'.' => dots += 1,
            _ => return None,
        }
    }
    if unsigned.is_empty() || unsigned == "." || dots > 1 {
        return None;
    }
    token.parse::<f64>().ok()
}

/// Boolean tokens: `{true,1,on,yes}` / `{false,0,off,no}`, case-insensitive
///
/// Any other token is a parse failure, never a default.
pub fn parse_bool(payload: &str) -> Option<bool> {
    match payload.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Relative adjustment: `+`, `-`, `+<n>`, `-<n>`
///
/// The magnitude defaults to 5 when omitted and is clamped to 1-50. Callers
/// apply the numeric rule first, so a bare `-<n>` normally never reaches
/// here; it is still accepted for paths with no absolute form.
pub fn parse_relative(payload: &str) -> Option<(Direction, u8)> {
    let token = payload.trim();
    let (direction, rest) = match token.as_bytes().first()? {
        b'+' => (Direction::Up, &token[1..]),
        b'-' => (Direction::Down, &token[1..]),
        _ => return None,
    };
    if rest.is_empty() {
        return Some((direction, DEFAULT_STEP));
    }
    if !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = rest.parse::<i64>().ok()?;
    Some((direction, clamp_step(magnitude)))
}

/// Clamp a parsed value to the volume domain
pub fn clamp_volume(value: i64) -> u8 {
    value.clamp(0, MAX_VOLUME as i64) as u8
}

/// Clamp a parsed value to the relative-step domain
pub fn clamp_step(value: i64) -> u8 {
    value.clamp(MIN_STEP as i64, MAX_STEP as i64) as u8
}

/// Clamp a parsed value to the latency domain
pub fn clamp_latency(value: i64) -> u32 {
    value.clamp(0, MAX_LATENCY_MS as i64) as u32
}

/// Clamp a parsed value to the progress domain
pub fn clamp_progress(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Positive 1-based index, as used for tracks and playlists
pub fn parse_index(payload: &str) -> Option<u32> {
    let value = parse_int(payload)?;
    if value >= 1 && value <= u32::MAX as i64 {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_strict() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" 42 "), Some(42));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+5"), None); // '+' belongs to the relative rule
        assert_eq!(parse_int("1_000"), None);
        assert_eq!(parse_int("1,5"), None);
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("   "), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn test_parse_decimal_strict() {
        assert_eq!(parse_decimal("0.75"), Some(0.75));
        assert_eq!(parse_decimal("1"), Some(1.0));
        assert_eq!(parse_decimal("-0.5"), Some(-0.5));
        assert_eq!(parse_decimal("0,75"), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("+0.5"), None);
    }

    #[test]
    fn test_parse_bool_tokens() {
        for token in ["true", "TRUE", "1", "on", "On", "yes"] {
            assert_eq!(parse_bool(token), Some(true), "{token}");
        }
        for token in ["false", "0", "off", "OFF", "no", "No"] {
            assert_eq!(parse_bool(token), Some(false), "{token}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn test_parse_relative() {
        assert_eq!(parse_relative("+"), Some((Direction::Up, 5)));
        assert_eq!(parse_relative("-"), Some((Direction::Down, 5)));
        assert_eq!(parse_relative("+12"), Some((Direction::Up, 12)));
        assert_eq!(parse_relative("-3"), Some((Direction::Down, 3)));
        assert_eq!(parse_relative("+99"), Some((Direction::Up, 50)));
        assert_eq!(parse_relative("+0"), Some((Direction::Up, 1)));
        assert_eq!(parse_relative("++"), None);
        assert_eq!(parse_relative("+1.5"), None);
        assert_eq!(parse_relative("5"), None);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_volume(150), 100);
        assert_eq!(clamp_volume(-3), 0);
        assert_eq!(clamp_step(0), 1);
        assert_eq!(clamp_step(200), 50);
        assert_eq!(clamp_latency(20_000), 10_000);
        assert_eq!(clamp_latency(-1), 0);
        assert_eq!(clamp_progress(1.5), 1.0);
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("1"), Some(1));
        assert_eq!(parse_index("17"), Some(17));
        assert_eq!(parse_index("0"), None);
        assert_eq!(parse_index("-2"), None);
    }
}
