//! Lenient integer coercion for text fields such as `duration` and `limit`.

/// Parses the leading integer of `input`.
///
/// Leading and trailing whitespace is ignored, an optional `+`/`-` sign is
/// honoured, and parsing stops at the first non-digit, so `"45min"` yields 45
/// and `"30.7"` yields 30. Returns `None` when no digit follows the sign or
/// the value overflows `i64`.
#[must_use]
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let text = input.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
