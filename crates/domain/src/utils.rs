//! Text helpers shared by the error types and the response decoders

/// Parse the leading base-10 integer of `text`.
///
/// Leading whitespace and a sign are accepted and trailing text is ignored.
/// Returns `None` when no digit follows or the value does not fit an `i64`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let value: i64 = unsigned[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}
