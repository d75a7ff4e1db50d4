use std::iter::FusedIterator;

/// Lazy percent-decoder over the bytes of an encoded string.
///
/// - `%XY` with two hex digits (either case) yields the byte `0xXY`.
/// - `+` yields a space.
/// - Everything else, including a `%` that does not start a valid escape,
///   is yielded unchanged.
///
/// The iterator borrows its input and is `Clone`, so a decode can be
/// restarted or replayed without copying the source.
#[derive(Clone, Debug)]
pub struct PercentDecode<'a> {
    bytes: &'a [u8],
}

impl<'a> PercentDecode<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { bytes: raw.as_bytes() }
    }
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

impl Iterator for PercentDecode<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let (&first, rest) = self.bytes.split_first()?;
        match first {
            b'%' => {
                if let [hi, lo, tail @ ..] = rest {
                    if let (Some(hi), Some(lo)) = (hex_value(*hi), hex_value(*lo)) {
                        self.bytes = tail;
                        return Some(hi << 4 | lo);
                    }
                }
                self.bytes = rest;
                Some(b'%')
            }
            b'+' => {
                self.bytes = rest;
                Some(b' ')
            }
            other => {
                self.bytes = rest;
                Some(other)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bytes.len();
        (len.div_ceil(3), Some(len))
    }
}

impl FusedIterator for PercentDecode<'_> {}

/// Decode `raw` completely.
///
/// Bytes that do not form valid UTF-8 after decoding are replaced with
/// U+FFFD.
pub fn decode(raw: &str) -> String {
    let bytes: Vec<u8> = PercentDecode::new(raw).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Decode `raw`, keeping at most `capacity` bytes of output.
///
/// Decoding stops silently once the capacity is reached. If lossy UTF-8
/// repair grows the text past `capacity`, it is cut back on a char boundary,
/// so the result never exceeds `capacity` bytes.
pub fn decode_bounded(raw: &str, capacity: usize) -> String {
    let bytes: Vec<u8> = PercentDecode::new(raw).take(capacity).collect();
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.len() > capacity {
        let mut cut = capacity;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}
