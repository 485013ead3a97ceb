//! Client upgrade request.
//!
//! From [RFC-6455 Section 4.1](https://datatracker.ietf.org/doc/html/rfc6455#section-4.1):
//!
//! Once a connection to the server has been established (including a
//! connection via a proxy or over a TLS-encrypted tunnel), the client
//! MUST send an opening handshake to the server.  The handshake consists
//! of an HTTP Upgrade request, along with a list of required and
//! optional header fields.
//!
//! Example:
//!
//! ```text
//! GET /ws HTTP/1.1
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==
//! Sec-WebSocket-Version: 13
//! ```
//!
//! The whole request must arrive in one read. Header names and values
//! are matched exactly, other headers are ignored.

use super::{HTTP_METHOD, HTTP_PATH, HTTP_VERSION_PREFIX, MIN_HTTP_VERSION};
use super::{HTTP_LINE_BREAK, HTTP_HEAD_END, HTTP_HEADER_SP};
use super::static_headers::*;

use crate::error::HandshakeError;

/// Http request presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request<'b> {
    pub method: &'b str,
    pub path: &'b str,
    pub version: f64,
    pub sec_key: &'b str,
}

/// Required headers seen so far.
#[derive(Default)]
struct Required<'b> {
    upgrade: bool,
    connection: bool,
    sec_version: bool,
    sec_key: Option<&'b str>,
}

impl<'b> Required<'b> {
    fn update(&mut self, name: &str, value: &'b str) {
        match name {
            HEADER_UPGRADE_NAME if value == HEADER_UPGRADE_VALUE => self.upgrade = true,
            HEADER_CONNECTION_NAME if value == HEADER_CONNECTION_VALUE => self.connection = true,
            HEADER_SEC_WEBSOCKET_VERSION_NAME if value == HEADER_SEC_WEBSOCKET_VERSION_VALUE => {
                self.sec_version = true
            }
            // last one wins
            HEADER_SEC_WEBSOCKET_KEY_NAME => self.sec_key = Some(value),
            _ => {}
        }
    }
}

/// Split `<METHOD> <PATH> <HTTP-VERSION>` and check each part.
fn parse_request_line(line: &str) -> Result<(&str, &str, f64), HandshakeError> {
    let mut tokens = line.split(' ');

    let (method, path, version) = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(method), Some(path), Some(version), None) => (method, path, version),
        _ => return Err(HandshakeError::RequestLine),
    };

    if method != HTTP_METHOD {
        return Err(HandshakeError::HttpMethod);
    }

    if path != HTTP_PATH {
        return Err(HandshakeError::HttpPath);
    }

    let version: f64 = version
        .strip_prefix(HTTP_VERSION_PREFIX)
        .ok_or(HandshakeError::HttpVersion)?
        .parse()
        .map_err(|_| HandshakeError::HttpVersion)?;

    // HTTP/1.1 or above
    if version.is_nan() || version < MIN_HTTP_VERSION {
        return Err(HandshakeError::HttpVersion);
    }

    Ok((method, path, version))
}

impl<'b> Request<'b> {
    /// Parse from a provided buffer holding a complete request.
    ///
    /// A single trailing empty line is stripped, the rest is split on CRLF.
    /// The request line must be `GET /ws HTTP/x` with `x >= 1.1`, and
    /// `Upgrade`, `Connection`, `Sec-WebSocket-Version` and `Sec-WebSocket-Key`
    /// must be present with their expected values.
    /// A header line without `": "` fails with
    /// [`HandshakeError::MalformedHeader`].
    pub fn decode(buf: &'b [u8]) -> Result<Self, HandshakeError> {
        if buf.is_empty() {
            return Err(HandshakeError::NotEnoughData);
        }

        let text = std::str::from_utf8(buf).map_err(|_| HandshakeError::NotUtf8)?;
        let text = text.strip_suffix(HTTP_HEAD_END).unwrap_or(text);

        let mut lines = text.split(HTTP_LINE_BREAK);

        // split always yields at least one item
        let request_line = lines.next().ok_or(HandshakeError::NotEnoughData)?;
        let (method, path, version) = parse_request_line(request_line)?;

        let mut required = Required::default();
        for line in lines {
            let (name, value) = line
                .split_once(HTTP_HEADER_SP)
                .ok_or(HandshakeError::MalformedHeader)?;
            required.update(name, value);
        }

        if !required.upgrade {
            return Err(HandshakeError::Upgrade);
        }

        if !required.connection {
            return Err(HandshakeError::Connection);
        }

        if !required.sec_version {
            return Err(HandshakeError::SecWebSocketVersion);
        }

        let sec_key = required.sec_key.ok_or(HandshakeError::SecWebSocketKey)?;

        Ok(Request {
            method,
            path,
            version,
            sec_key,
        })
    }
}
