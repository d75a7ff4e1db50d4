use std::future::Future;
use std::net::{Shutdown, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use board_render::ChatRenderer;
use board_store::ChatStore;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::response::{response_bytes, Status};
use crate::router::BoardRouter;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);
const READ_CHUNK: usize = 1024;

/// Chat board server.
///
/// Requests are read on the tokio runtime; each one is then handled by the
/// synchronous [`BoardRouter`] on a blocking worker that writes straight
/// to the socket.
pub struct BoardServer<S: ChatStore + ?Sized + 'static> {
    config: ServerConfig,
    listener: TcpListener,
    router: BoardRouter<S>,
    permits: Arc<Semaphore>,
}

impl<S: ChatStore + ?Sized + 'static> BoardServer<S> {
    /// Validate `config` and bind its listen address.
    pub async fn bind(config: ServerConfig, store: Arc<S>) -> ServerResult<Self> {
        config.validate()?;
        let renderer = ChatRenderer::new(config.buffer_size)?;
        let listener = TcpListener::bind(config.bind_addr).await?;
        info!(addr = %listener.local_addr()?, "chat board listening");
        Ok(Self {
            permits: Arc::new(Semaphore::new(config.max_connections)),
            router: BoardRouter::new(store, renderer),
            listener,
            config,
        })
    }

    /// The bound address; differs from the configured one when port 0 was used.
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn router(&self) -> &BoardRouter<S> {
        &self.router
    }

    /// Serve until the process exits.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves. Connections already accepted run
    /// to completion on their own tasks.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            let permit = tokio::select! {
                _ = &mut shutdown => break,
                permit = Arc::clone(&self.permits).acquire_owned() => {
                    permit.map_err(|e| ServerError::Internal(e.to_string()))?
                }
            };

            let (stream, peer) = tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok(pair) => pair,
                    Err(err) => {
                        warn!(%err, "accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                        continue;
                    }
                },
            };

            let router = self.router.clone();
            let read_timeout = self.config.read_timeout();
            let max_request_size = self.config.max_request_size;
            tokio::spawn(async move {
                let _permit = permit;
                if let Err(err) =
                    handle_connection(router, stream, read_timeout, max_request_size).await
                {
                    warn!(%peer, %err, "connection failed");
                }
            });
        }

        info!("chat board shutting down");
        Ok(())
    }
}

/// Outcome of reading a request head.
#[derive(Debug, PartialEq, Eq)]
enum Head {
    Complete(String),
    TooLarge,
    Closed,
}

async fn handle_connection<S: ChatStore + ?Sized + 'static>(
    router: BoardRouter<S>,
    mut stream: TcpStream,
    read_timeout: Duration,
    max_request_size: usize,
) -> ServerResult<()> {
    let reading = read_head(&mut stream, max_request_size);
    let head = match tokio::time::timeout(read_timeout, reading).await {
        Ok(head) => head?,
        Err(_) => {
            debug!("timed out waiting for request");
            return Ok(());
        }
    };

    let request = match head {
        Head::Complete(request) => request,
        Head::Closed => return Ok(()),
        Head::TooLarge => {
            stream
                .write_all(&response_bytes(Status::BadRequest, "request too large\n"))
                .await?;
            stream.shutdown().await?;
            return Ok(());
        }
    };

    let stream = stream.into_std()?;
    stream.set_nonblocking(false)?;
    stream.set_write_timeout(Some(read_timeout))?;

    tokio::task::spawn_blocking(move || -> ServerResult<()> {
        router.handle(&request, &mut &stream)?;
        stream.shutdown(Shutdown::Write)?;
        Ok(())
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))?
}

/// Read until the blank line ending the head, end of stream, or `limit` bytes.
async fn read_head<R>(reader: &mut R, limit: usize) -> ServerResult<Head>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(READ_CHUNK.min(limit));
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            if buf.is_empty() {
                return Ok(Head::Closed);
            }
            break;
        }
        let scan_from = buf.len().saturating_sub(3);
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_head_end(&buf[scan_from..]) {
            let end = scan_from + end;
            if end > limit {
                return Ok(Head::TooLarge);
            }
            buf.truncate(end);
            break;
        }
        if buf.len() >= limit {
            return Ok(Head::TooLarge);
        }
    }
    Ok(Head::Complete(String::from_utf8_lossy(&buf).into_owned()))
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|i| i + 4)
        .or_else(|| buf.windows(2).position(|w| w == b"\n\n").map(|i| i + 2))
}
