//! Parser for compact duration strings used in token expiry configuration.
//!
//! The accepted grammar is a positive integer followed by a single unit
//! suffix: `s` (seconds), `m` (minutes), `h` (hours), or `d` (days).
//! Examples: `15m`, `7d`, `30s`, `12h`.

use chrono::Duration;

/// Parse a duration string of the form `<integer><s|m|h|d>`.
///
/// Returns a human-readable error message for malformed input so callers
/// can surface it directly in startup panics.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();

    // Split on the last char, not the last byte, so a multi-byte unit
    // (e.g. "5é") is an error rather than a slice panic.
    let unit = input.chars().last().ok_or_else(|| {
        format!("Invalid duration '{input}': expected <integer><s|m|h|d>")
    })?;
    let value = &input[..input.len() - unit.len_utf8()];

    let n: i64 = value
        .parse()
        .map_err(|_| format!("Invalid duration '{input}': '{value}' is not an integer"))?;
    if n <= 0 {
        return Err(format!("Invalid duration '{input}': must be positive"));
    }

    match unit {
        's' => Ok(Duration::seconds(n)),
        'm' => Ok(Duration::minutes(n)),
        'h' => Ok(Duration::hours(n)),
        'd' => Ok(Duration::days(n)),
        other => Err(format!(
            "Invalid duration '{input}': unknown unit '{other}' (expected s, m, h, or d)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::seconds(30));
        assert_eq!(parse_duration("15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_duration("12h").unwrap(), Duration::hours(12));
        assert_eq!(parse_duration("7d").unwrap(), Duration::days(7));
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(parse_duration(" 15m ").unwrap(), Duration::minutes(15));
    }

    #[test]
    fn test_rejects_missing_unit() {
        assert!(parse_duration("15").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn test_rejects_multi_byte_unit() {
        // Must return Err, never panic on a non-ASCII final char.
        assert!(parse_duration("5é").is_err());
        assert!(parse_duration("15µs").is_err());
    }

    #[test]
    fn test_rejects_unknown_unit() {
        let err = parse_duration("15w").unwrap_err();
        assert!(err.contains("unknown unit"), "got: {err}");
    }

    #[test]
    fn test_rejects_non_integer_value() {
        assert!(parse_duration("1.5h").is_err());
        assert!(parse_duration("m").is_err());
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(parse_duration("0m").is_err());
        assert!(parse_duration("-5m").is_err());
    }
}
