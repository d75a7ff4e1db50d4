//! Query-string decoding for the chat board.
//!
//! Turns the raw, URL-encoded request target of a board request into plain
//! strings. Two layers:
//!
//! - [`PercentDecode`] / [`decode`] -- form-style percent-decoding (`%XY`
//!   escapes and `+` as space). Never fails: malformed escapes pass through
//!   literally and bounded decoding truncates silently.
//! - [`extract_param`] -- finds one `key=value` pair in a query and decodes
//!   its value under a length limit. [`extract_param_bytes`] does the same
//!   but leaves the decoded bytes unrepaired.

pub mod decode;
pub mod params;

pub use decode::{decode, decode_bounded, PercentDecode};
pub use params::{extract_param, extract_param_bytes, ESCAPE_EXPANSION};
