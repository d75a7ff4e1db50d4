use crate::decode::{decode_bounded, PercentDecode};

/// Worst-case growth of a value under percent-encoding: one byte becomes
/// `%XY`. Callers size raw-value limits as `capacity * ESCAPE_EXPANSION` so
/// that any value fitting the decoded capacity is accepted by
/// [`extract_param`].
pub const ESCAPE_EXPANSION: usize = 3;

/// Extract and decode one query parameter.
///
/// `name` is the literal key including its trailing `=` (e.g. `"user="`).
/// The first occurrence that begins a key is used: one at the very start of
/// `source` or directly after `?` or `&`. The raw value runs up to the next
/// `&`, or failing that the next space, or failing that the end of `source`.
///
/// Returns `None` when the key is missing or the raw value is `max_len`
/// bytes or longer. Otherwise returns the decoded value, truncated to
/// `max_len - 1` bytes.
///
/// # Examples
///
/// ```
/// use board_codec::extract_param;
///
/// let line = "GET /post?user=alice&message=hi+there HTTP/1.1";
/// assert_eq!(extract_param(line, "user=", 16).as_deref(), Some("alice"));
/// assert_eq!(extract_param(line, "message=", 256).as_deref(), Some("hi there"));
/// assert_eq!(extract_param(line, "id=", 16), None);
/// ```
pub fn extract_param(source: &str, name: &str, max_len: usize) -> Option<String> {
    raw_value(source, name, max_len).map(|raw| decode_bounded(raw, max_len - 1))
}

/// Like [`extract_param`], but returns the decoded bytes without UTF-8
/// repair, so callers can measure and validate exactly what the client sent.
///
/// ```
/// use board_codec::extract_param_bytes;
///
/// let line = "GET /react?message=%FF%FE&id=1 HTTP/1.1";
/// assert_eq!(extract_param_bytes(line, "message=", 48), Some(vec![0xFF, 0xFE]));
/// ```
pub fn extract_param_bytes(source: &str, name: &str, max_len: usize) -> Option<Vec<u8>> {
    raw_value(source, name, max_len)
        .map(|raw| PercentDecode::new(raw).take(max_len - 1).collect())
}

/// The still-encoded value of `name`, if present and shorter than `max_len`.
fn raw_value<'a>(source: &'a str, name: &str, max_len: usize) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    let start = find_key(source, name)? + name.len();
    let rest = &source[start..];
    let end = rest
        .find('&')
        .or_else(|| rest.find(' '))
        .unwrap_or(rest.len());
    let raw = &rest[..end];
    if raw.len() >= max_len {
        return None;
    }
    Some(raw)
}

fn find_key(source: &str, name: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    source
        .match_indices(name)
        .map(|(at, _)| at)
        .find(|&at| at == 0 || matches!(bytes[at - 1], b'?' | b'&'))
}
