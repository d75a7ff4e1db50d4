//! Request-line classification and parameter parsing.

use thiserror::Error;

use board_codec::{extract_param_bytes, ESCAPE_EXPANSION};
use board_types::limits::{AUTHOR_CAPACITY, CHAT_TEXT_CAPACITY, REACTION_TEXT_CAPACITY};
use board_types::ChatId;

const POST_CHAT_PREFIX: &str = "GET /post?";
const POST_REACTION_PREFIX: &str = "GET /react?";
const LIST_PREFIX: &str = "GET /chats";
const RESET_PREFIX: &str = "GET /reset";

const USER_PARAM: &str = "user=";
const MESSAGE_PARAM: &str = "message=";
const ID_PARAM: &str = "id=";

// Raw (encoded) value limits. Sized so any value within the decoded
// capacity passes extraction; the store enforces the decoded bound.
const USER_RAW_LIMIT: usize = AUTHOR_CAPACITY * ESCAPE_EXPANSION;
const CHAT_TEXT_RAW_LIMIT: usize = CHAT_TEXT_CAPACITY * ESCAPE_EXPANSION;
const REACTION_TEXT_RAW_LIMIT: usize = REACTION_TEXT_CAPACITY * ESCAPE_EXPANSION;
// u64::MAX has 20 digits.
const ID_RAW_LIMIT: usize = 21;

/// What a request asks the board to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    PostChat,
    PostReaction,
    List,
    Reset,
    Unrecognized,
}

impl Route {
    /// Classify a request line by its method and path prefix.
    pub fn classify(line: &str) -> Self {
        if line.starts_with(POST_CHAT_PREFIX) {
            Self::PostChat
        } else if line.starts_with(POST_REACTION_PREFIX) {
            Self::PostReaction
        } else if line.starts_with(LIST_PREFIX) {
            Self::List
        } else if line.starts_with(RESET_PREFIX) {
            Self::Reset
        } else {
            Self::Unrecognized
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PostChat => "post-chat",
            Self::PostReaction => "post-reaction",
            Self::List => "list",
            Self::Reset => "reset",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// The first line of a raw request, without its line terminator.
pub fn request_line(request: &str) -> &str {
    request.split(['\r', '\n']).next().unwrap_or_default()
}

/// Why the parameters of a request were rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("missing or oversized parameter: {0}")]
    Missing(&'static str),

    #[error("parameter is not valid UTF-8 after decoding: {0}")]
    NotUtf8(&'static str),

    #[error("invalid chat id: {0:?}")]
    InvalidId(String),
}

// Decoded bytes are checked as sent: lossy repair would change their length.
fn required(line: &str, name: &'static str, raw_limit: usize) -> Result<String, ParamError> {
    let key = name.trim_end_matches('=');
    let bytes = extract_param_bytes(line, name, raw_limit).ok_or(ParamError::Missing(key))?;
    String::from_utf8(bytes).map_err(|_| ParamError::NotUtf8(key))
}

/// Parameters of `GET /post?user=..&message=..`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatParams {
    pub user: String,
    pub message: String,
}

impl ChatParams {
    pub fn parse(line: &str) -> Result<Self, ParamError> {
        Ok(Self {
            user: required(line, USER_PARAM, USER_RAW_LIMIT)?,
            message: required(line, MESSAGE_PARAM, CHAT_TEXT_RAW_LIMIT)?,
        })
    }
}

/// Parameters of `GET /react?user=..&message=..&id=..`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionParams {
    pub user: String,
    pub message: String,
    pub id: ChatId,
}

impl ReactionParams {
    pub fn parse(line: &str) -> Result<Self, ParamError> {
        let user = required(line, USER_PARAM, USER_RAW_LIMIT)?;
        let message = required(line, MESSAGE_PARAM, REACTION_TEXT_RAW_LIMIT)?;
        let raw_id = required(line, ID_PARAM, ID_RAW_LIMIT)?;
        let id = raw_id
            .parse::<ChatId>()
            .map_err(|_| ParamError::InvalidId(raw_id))?;
        Ok(Self { user, message, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_routes() {
        assert_eq!(Route::classify("GET /post?user=a&message=b HTTP/1.1"), Route::PostChat);
        assert_eq!(Route::classify("GET /react?user=a HTTP/1.1"), Route::PostReaction);
        assert_eq!(Route::classify("GET /chats HTTP/1.1"), Route::List);
        assert_eq!(Route::classify("GET /reset HTTP/1.1"), Route::Reset);
    }

    #[test]
    fn classify_rejects_other_requests() {
        for line in [
            "POST /post?user=a HTTP/1.1",
            "GET /post HTTP/1.1",
            "GET / HTTP/1.1",
            "get /chats HTTP/1.1",
            "",
        ] {
            assert_eq!(Route::classify(line), Route::Unrecognized, "{line:?}");
        }
    }

    #[test]
    fn classification_is_by_prefix() {
        assert_eq!(Route::classify("GET /chats/extra HTTP/1.1"), Route::List);
        assert_eq!(Route::classify("GET /resetall"), Route::Reset);
    }

    #[test]
    fn request_line_strips_headers() {
        let raw = "GET /chats HTTP/1.1\r\nHost: localhost\r\n\r\n";
        assert_eq!(request_line(raw), "GET /chats HTTP/1.1");
        assert_eq!(request_line("GET /chats"), "GET /chats");
        assert_eq!(request_line(""), "");
    }

    #[test]
    fn chat_params() {
        let p = ChatParams::parse("GET /post?user=alice&message=hello+world HTTP/1.1").unwrap();
        assert_eq!(p.user, "alice");
        assert_eq!(p.message, "hello world");
    }

    #[test]
    fn chat_params_in_any_order() {
        let p = ChatParams::parse("GET /post?message=hi&user=bob HTTP/1.1").unwrap();
        assert_eq!(p.user, "bob");
        assert_eq!(p.message, "hi");
    }

    #[test]
    fn missing_chat_params() {
        assert_eq!(
            ChatParams::parse("GET /post?user=alice HTTP/1.1"),
            Err(ParamError::Missing("message"))
        );
        assert_eq!(
            ChatParams::parse("GET /post?message=hi HTTP/1.1"),
            Err(ParamError::Missing("user"))
        );
    }

    #[test]
    fn oversized_raw_value_is_missing() {
        let line = format!("GET /post?user={}&message=hi HTTP/1.1", "a".repeat(USER_RAW_LIMIT));
        assert_eq!(ChatParams::parse(&line), Err(ParamError::Missing("user")));
    }

    #[test]
    fn decoded_value_may_exceed_field_capacity() {
        // Accepted here; the store rejects it as too long.
        let line = format!("GET /post?user={}&message=hi HTTP/1.1", "a".repeat(20));
        assert_eq!(ChatParams::parse(&line).unwrap().user.len(), 20);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let line = "GET /react?user=bob&message=%FF%FF%FF%FF%FF%FF&id=1 HTTP/1.1";
        assert_eq!(ReactionParams::parse(line), Err(ParamError::NotUtf8("message")));
        assert_eq!(
            ChatParams::parse("GET /post?user=%C3&message=hi HTTP/1.1"),
            Err(ParamError::NotUtf8("user"))
        );
    }

    #[test]
    fn multibyte_values_keep_their_length() {
        let p = ChatParams::parse("GET /post?user=%C3%A9%C3%A9&message=hi HTTP/1.1").unwrap();
        assert_eq!(p.user, "éé");
        assert_eq!(p.user.len(), 4);
    }

    #[test]
    fn reaction_params() {
        let p = ReactionParams::parse("GET /react?user=bob&message=lol&id=1 HTTP/1.1").unwrap();
        assert_eq!(p.user, "bob");
        assert_eq!(p.message, "lol");
        assert_eq!(p.id, ChatId::new(1));
    }

    #[test]
    fn reaction_id_must_be_numeric() {
        assert_eq!(
            ReactionParams::parse("GET /react?user=bob&message=lol&id=abc HTTP/1.1"),
            Err(ParamError::InvalidId("abc".into()))
        );
        assert_eq!(
            ReactionParams::parse("GET /react?user=bob&message=lol HTTP/1.1"),
            Err(ParamError::Missing("id"))
        );
    }

    #[test]
    fn reaction_id_zero_parses() {
        // Zero is a valid number; the store reports it as not found.
        let p = ReactionParams::parse("GET /react?user=bob&message=lol&id=0 HTTP/1.1").unwrap();
        assert!(p.id.is_zero());
    }
}
