use std::time::Duration;

/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, or plain seconds.
///
/// `0` is accepted and yields a zero duration.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let mut chars = value.chars();
    let unit = chars.next_back();

    let (number_raw, multiplier) = match unit {
        Some('s') | Some('S') => (chars.as_str(), 1_u64),
        Some('m') | Some('M') => (chars.as_str(), 60_u64),
        Some('h') | Some('H') => (chars.as_str(), 60_u64 * 60),
        Some('d') | Some('D') => (chars.as_str(), 60_u64 * 60 * 24),
        Some(last) if last.is_ascii_digit() => (value, 1_u64),
        _ => return None,
    };

    let number = number_raw.parse::<u64>().ok()?;
    number.checked_mul(multiplier).map(Duration::from_secs)
}

/// Parse a boolean flag such as `true`, `yes`, `1`, `off`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
