//! HTTP front end for the chat board.
//!
//! Speaks just enough HTTP/1.1 for browsers and `curl`: one GET request
//! per connection, a plain-text response, then the connection closes.
//!
//! | Request | Effect |
//! |---|---|
//! | `GET /post?user=U&message=M` | add a chat, return the history |
//! | `GET /react?user=U&message=M&id=N` | react to chat `N`, return the history |
//! | `GET /chats` | return the history |
//! | `GET /reset` | clear the history |

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use request::{ChatParams, ParamError, ReactionParams, Route};
pub use response::Status;
pub use router::BoardRouter;
pub use server::BoardServer;
