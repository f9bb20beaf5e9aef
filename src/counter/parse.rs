//! Counter text parsing.

use tracing::warn;

use crate::error::CounterError;

/// Longest excerpt of the offending content carried in error messages.
const MAX_SNIPPET_CHARS: usize = 32;

/// Parse the leading integer of a version file.
///
/// Leading whitespace, a byte order mark, and a `+` sign are accepted. The
/// longest run of ASCII digits is the value; anything after it is ignored.
/// Content that does not start with digits, negative values, and values beyond
/// `u64` are rejected. Hex-prefixed content (`0x10`) is rejected too: the
/// counter is decimal, and reading it as `0` would silently reset it.
pub fn parse_counter(text: &str) -> Result<u64, CounterError> {
    let trimmed = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (digits, rest) = unsigned.split_at(digits_end);

    if digits.is_empty() {
        return Err(CounterError::NotANumber(snippet(text)));
    }

    if digits == "0" && rest.starts_with(['x', 'X']) {
        return Err(CounterError::NotANumber(snippet(text)));
    }

    // "-0" is still zero
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(CounterError::Negative(snippet(text)));
    }

    let value = digits
        .parse::<u64>()
        .map_err(|_| CounterError::Overflow(snippet(text)))?;

    let rest = rest.trim();
    if !rest.is_empty() {
        warn!(
            "Ignoring trailing content after version {}: {:?}",
            value,
            snippet(rest)
        );
    }

    Ok(value)
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    let mut out: String = trimmed.chars().take(MAX_SNIPPET_CHARS).collect();
    if trimmed.chars().count() > MAX_SNIPPET_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_counter("41").unwrap(), 41);
        assert_eq!(parse_counter("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_tolerates_trailing_newline() {
        assert_eq!(parse_counter("41\n").unwrap(), 41);
        assert_eq!(parse_counter("41\r\n").unwrap(), 41);
    }

    #[test]
    fn test_parse_skips_leading_whitespace_and_plus() {
        assert_eq!(parse_counter("  \t7").unwrap(), 7);
        assert_eq!(parse_counter("+7").unwrap(), 7);
    }

    #[test]
    fn test_parse_ignores_trailing_garbage() {
        assert_eq!(parse_counter("12abc").unwrap(), 12);
        assert_eq!(parse_counter("3.9").unwrap(), 3);
    }

    #[test]
    fn test_parse_leading_zeros() {
        assert_eq!(parse_counter("007").unwrap(), 7);
    }

    #[test]
    fn test_parse_skips_byte_order_mark() {
        assert_eq!(parse_counter("\u{feff}41").unwrap(), 41);
        assert_eq!(parse_counter("\u{feff} 41\n").unwrap(), 41);
    }

    #[test]
    fn test_parse_rejects_hex_prefix() {
        assert!(matches!(
            parse_counter("0x10"),
            Err(CounterError::NotANumber(_))
        ));
        assert!(matches!(
            parse_counter("0X1f"),
            Err(CounterError::NotANumber(_))
        ));
        // a plain zero followed by other text is still zero
        assert_eq!(parse_counter("0 build").unwrap(), 0);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = parse_counter("abc").unwrap_err();
        assert!(matches!(err, CounterError::NotANumber(ref s) if s == "abc"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            parse_counter(""),
            Err(CounterError::NotANumber(_))
        ));
        assert!(matches!(
            parse_counter("   \n"),
            Err(CounterError::NotANumber(_))
        ));
        assert!(matches!(parse_counter("+"), Err(CounterError::NotANumber(_))));
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(parse_counter("-3"), Err(CounterError::Negative(_))));
    }

    #[test]
    fn test_parse_negative_zero_is_zero() {
        assert_eq!(parse_counter("-0").unwrap(), 0);
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let max = u64::MAX.to_string();
        assert_eq!(parse_counter(&max).unwrap(), u64::MAX);

        let too_big = format!("{}0", max);
        assert!(matches!(
            parse_counter(&too_big),
            Err(CounterError::Overflow(_))
        ));
    }

    #[test]
    fn test_snippet_truncates_long_content() {
        let long = "x".repeat(100);
        let s = snippet(&long);
        assert_eq!(s.chars().count(), MAX_SNIPPET_CHARS + 1);
        assert!(s.ends_with('…'));
    }
}
