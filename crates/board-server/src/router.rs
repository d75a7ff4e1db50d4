use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info, warn};

use board_render::ChatRenderer;
use board_store::{ChatStore, StoreError};

use crate::error::ServerResult;
use crate::request::{request_line, ChatParams, ParamError, ReactionParams, Route};
use crate::response::{write_head, write_response, Status};

const RESET_BODY: &str = "chats cleared\n";
const NOT_FOUND_BODY: &str = "not found\n";

/// Maps one raw request onto the store and writes the response.
///
/// The router is synchronous and writes straight to its output, so the
/// history streams out through the renderer buffer without being held
/// in memory as one string.
pub struct BoardRouter<S: ChatStore + ?Sized> {
    store: Arc<S>,
    renderer: ChatRenderer,
}

impl<S: ChatStore + ?Sized> Clone for BoardRouter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            renderer: self.renderer.clone(),
        }
    }
}

impl<S: ChatStore + ?Sized> BoardRouter<S> {
    pub fn new(store: Arc<S>, renderer: ChatRenderer) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn renderer(&self) -> &ChatRenderer {
        &self.renderer
    }

    /// Handle `request` (the raw head, or just its first line) and write a
    /// complete response to `out`. Returns the status that was sent.
    ///
    /// Errors are I/O failures on `out`; the response may be partial.
    pub fn handle<W: Write + ?Sized>(&self, request: &str, out: &mut W) -> ServerResult<Status> {
        let line = request_line(request);
        debug!(request = line, "received request");

        let route = Route::classify(line);
        let status = match route {
            Route::PostChat => match ChatParams::parse(line) {
                Ok(p) => {
                    let result = self.store.add_chat(&p.user, &p.message).map(|id| {
                        debug!(%id, author = %p.user, "chat added");
                    });
                    self.respond_with_history(result, out)?
                }
                Err(err) => bad_request(err, out)?,
            },
            Route::PostReaction => match ReactionParams::parse(line) {
                Ok(p) => {
                    let result = self.store.add_reaction(&p.user, &p.message, p.id).map(|()| {
                        debug!(chat = %p.id, author = %p.user, "reaction added");
                    });
                    self.respond_with_history(result, out)?
                }
                Err(err) => bad_request(err, out)?,
            },
            Route::List => self.respond_with_history(Ok(()), out)?,
            Route::Reset => {
                self.store.reset();
                debug!("store reset");
                write_response(out, Status::Ok, RESET_BODY)?;
                Status::Ok
            }
            Route::Unrecognized => {
                write_response(out, Status::NotFound, NOT_FOUND_BODY)?;
                Status::NotFound
            }
        };

        info!(route = route.name(), status = status.code(), "request handled");
        Ok(status)
    }

    fn respond_with_history<W: Write + ?Sized>(
        &self,
        result: Result<(), StoreError>,
        out: &mut W,
    ) -> ServerResult<Status> {
        if let Err(err) = result {
            return store_failure(err, out);
        }
        write_head(out, Status::Ok)?;
        let stats = self.renderer.render(self.store.list_all(), out)?;
        debug!(
            lines = stats.lines,
            flushes = stats.flushes,
            bytes = stats.bytes,
            "history rendered"
        );
        Ok(Status::Ok)
    }
}

fn bad_request<W: Write + ?Sized>(err: ParamError, out: &mut W) -> ServerResult<Status> {
    debug!(%err, "rejected parameters");
    write_response(out, Status::BadRequest, &format!("{err}\n"))?;
    Ok(Status::BadRequest)
}

fn store_failure<W: Write + ?Sized>(err: StoreError, out: &mut W) -> ServerResult<Status> {
    // Every store rejection is a 500; the body names the cause.
    let status = Status::InternalServerError;
    warn!(%err, kind = ?err.kind(), "store rejected request");
    write_response(out, status, &format!("{err}\n"))?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_store::InMemoryChatStore;
    use board_types::limits::MAX_REACTIONS_PER_CHAT;
    use board_types::{ChatId, FixedClock, Timestamp};

    fn router() -> BoardRouter<InMemoryChatStore> {
        let at = Timestamp::from_ymd_hms(2024, 5, 1, 10, 30, 0).unwrap();
        let store = InMemoryChatStore::with_clock(FixedClock(at));
        BoardRouter::new(Arc::new(store), ChatRenderer::default())
    }

    fn send(router: &BoardRouter<InMemoryChatStore>, line: &str) -> (Status, String) {
        let mut out = Vec::new();
        let status = router.handle(&format!("{line} HTTP/1.1\r\n\r\n"), &mut out).unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    fn body(response: &str) -> &str {
        response.split_once("\r\n\r\n").map(|(_, b)| b).unwrap()
    }

    #[test]
    fn post_returns_history() {
        let r = router();
        let (status, resp) = send(&r, "GET /post?user=alice&message=hello+world");
        assert_eq!(status, Status::Ok);
        assert!(resp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(resp.contains("Connection: close\r\n"));
        assert_eq!(
            body(&resp),
            "[#1 2024-05-01 10:30:00]                alice: hello world\n"
        );
    }

    #[test]
    fn post_react_list() {
        let r = router();
        send(&r, "GET /post?user=alice&message=hi");
        let (status, resp) = send(&r, "GET /react?user=bob&message=lol&id=1");
        assert_eq!(status, Status::Ok);
        assert!(body(&resp).contains(&format!("\n{}(bob) lol\n", " ".repeat(30))));

        let (status, listed) = send(&r, "GET /chats");
        assert_eq!(status, Status::Ok);
        assert_eq!(body(&listed), body(&resp));
    }

    #[test]
    fn list_empty_store() {
        let (status, resp) = send(&router(), "GET /chats");
        assert_eq!(status, Status::Ok);
        assert_eq!(body(&resp), "");
    }

    #[test]
    fn missing_params_are_bad_requests() {
        let r = router();
        for line in [
            "GET /post?user=alice",
            "GET /post?message=hi",
            "GET /react?user=bob&message=lol",
            "GET /react?user=bob&message=lol&id=one",
        ] {
            let (status, resp) = send(&r, line);
            assert_eq!(status, Status::BadRequest, "{line}");
            assert!(resp.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        }
        assert!(r.store().is_empty());
    }

    #[test]
    fn overlong_author_is_rejected_without_mutation() {
        let r = router();
        let line = format!("GET /post?user={}&message=hi", "a".repeat(16));
        let (status, resp) = send(&r, &line);
        assert_eq!(status, Status::InternalServerError);
        assert!(body(&resp).contains("author too long"));
        assert!(r.store().is_empty());
    }

    #[test]
    fn undecodable_text_is_a_bad_request() {
        let r = router();
        send(&r, "GET /post?user=alice&message=hi");
        let (status, resp) = send(&r, "GET /react?user=bob&message=%FF%FF%FF%FF%FF%FF&id=1");
        assert_eq!(status, Status::BadRequest);
        assert!(body(&resp).contains("not valid UTF-8"));
        assert_eq!(r.store().get(ChatId::new(1)).unwrap().reaction_count(), 0);
    }

    #[test]
    fn multibyte_reaction_within_limit() {
        let r = router();
        send(&r, "GET /post?user=alice&message=hi");
        // Five 3-byte characters: 15 bytes decoded, 45 bytes encoded.
        let hearts = "%E2%9D%A4".repeat(5);
        let (status, resp) = send(&r, &format!("GET /react?user=bob&message={hearts}&id=1"));
        assert_eq!(status, Status::Ok);
        assert!(body(&resp).ends_with("(bob) \u{2764}\u{2764}\u{2764}\u{2764}\u{2764}\n"));
    }

    #[test]
    fn reaction_to_unknown_chat() {
        let r = router();
        send(&r, "GET /post?user=alice&message=hi");
        for id in ["0", "2"] {
            let (status, resp) = send(&r, &format!("GET /react?user=bob&message=lol&id={id}"));
            assert_eq!(status, Status::InternalServerError);
            assert!(body(&resp).contains("chat not found"));
        }
        assert_eq!(r.store().get(ChatId::new(1)).unwrap().reaction_count(), 0);
    }

    #[test]
    fn reaction_capacity() {
        let r = router();
        send(&r, "GET /post?user=alice&message=hi");
        for _ in 0..MAX_REACTIONS_PER_CHAT {
            let (status, _) = send(&r, "GET /react?user=bob&message=lol&id=1");
            assert_eq!(status, Status::Ok);
        }
        let (status, resp) = send(&r, "GET /react?user=bob&message=lol&id=1");
        assert_eq!(status, Status::InternalServerError);
        assert!(body(&resp).contains("reaction capacity exceeded"));
        assert_eq!(
            r.store().get(ChatId::new(1)).unwrap().reaction_count(),
            MAX_REACTIONS_PER_CHAT
        );
    }

    #[test]
    fn reset_clears_history() {
        let r = router();
        send(&r, "GET /post?user=alice&message=hi");
        let (status, resp) = send(&r, "GET /reset");
        assert_eq!(status, Status::Ok);
        assert_eq!(body(&resp), RESET_BODY);
        assert!(r.store().is_empty());

        let (_, resp) = send(&r, "GET /post?user=bob&message=again");
        assert!(body(&resp).starts_with("[#2 "));
    }

    #[test]
    fn unknown_route() {
        let r = router();
        for line in ["GET /", "POST /post?user=a&message=b", "GET /favicon.ico"] {
            let (status, resp) = send(&r, line);
            assert_eq!(status, Status::NotFound);
            assert_eq!(body(&resp), NOT_FOUND_BODY);
        }
    }

    #[test]
    fn percent_encoded_fields() {
        let r = router();
        let (_, resp) = send(&r, "GET /post?user=J%C3%BCrgen&message=50%25+off%21");
        assert!(body(&resp).ends_with("Jürgen: 50% off!\n"));
    }

    #[test]
    fn bare_request_line() {
        let r = router();
        let mut out = Vec::new();
        let status = r.handle("GET /chats", &mut out).unwrap();
        assert_eq!(status, Status::Ok);
    }
}
