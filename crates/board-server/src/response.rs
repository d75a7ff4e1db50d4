use std::fmt;
use std::io::{self, Write};

/// Response statuses the board sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// Write the status line and headers. The body follows directly.
pub fn write_head<W: Write + ?Sized>(out: &mut W, status: Status) -> io::Result<()> {
    // Single write; the socket is unbuffered.
    let head =
        format!("HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\n");
    out.write_all(head.as_bytes())
}

/// Write a complete response with a short fixed body.
pub fn write_response<W: Write + ?Sized>(
    out: &mut W,
    status: Status,
    body: &str,
) -> io::Result<()> {
    write_head(out, status)?;
    out.write_all(body.as_bytes())?;
    out.flush()
}

/// A complete response as bytes, for callers writing asynchronously.
pub fn response_bytes(status: Status, body: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(96 + body.len());
    // Writing to a Vec cannot fail.
    let _ = write_response(&mut out, status, body);
    out
}
