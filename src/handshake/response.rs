//! Server upgrade response.
//!
//! From [RFC-6455 Section 4.2](https://datatracker.ietf.org/doc/html/rfc6455#section-4.2):
//!
//! If the server chooses to accept the incoming connection, it MUST
//! reply with a valid HTTP response.
//!
//! Example:
//!
//! ```text
//! HTTP/1.1 101 Switching Protocols
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=
//! ```
//!

use super::write_header;
use super::key::{derive_accept_key, ACCEPT_KEY_LEN};
use super::{HTTP_STATUS_LINE, HTTP_LINE_BREAK, HTTP_HEADER_SP};
use super::static_headers::*;

use crate::bleed::Writer;
use crate::error::HandshakeError;

/// Http response presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub sec_accept: [u8; ACCEPT_KEY_LEN],
}

impl Response {
    /// Create from the client's `Sec-WebSocket-Key`.
    #[inline]
    pub fn new(sec_key: &[u8]) -> Self {
        Self {
            sec_accept: derive_accept_key(sec_key),
        }
    }

    /// Number of bytes [`encode`](Self::encode) writes.
    pub const fn encoded_len(&self) -> usize {
        HTTP_STATUS_LINE.len()
            + HTTP_LINE_BREAK.len()
            + HEADER_UPGRADE_NAME.len()
            + HEADER_UPGRADE_VALUE.len()
            + HEADER_CONNECTION_NAME.len()
            + HEADER_CONNECTION_VALUE.len()
            + HEADER_SEC_WEBSOCKET_ACCEPT_NAME.len()
            + ACCEPT_KEY_LEN
            + 3 * (HTTP_HEADER_SP.len() + HTTP_LINE_BREAK.len())
            + HTTP_LINE_BREAK.len()
    }

    /// Encode to a provided buffer, return the number of written bytes.
    ///
    /// `Upgrade`, `Connection` and `Sec-WebSocket-Accept` are written
    /// in order, followed by an empty line.
    ///
    /// Caller should make sure the buffer is large enough,
    /// otherwise a [`HandshakeError::NotEnoughCapacity`] error will be returned.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, HandshakeError> {
        let mut w = Writer::new(buf);

        // HTTP/1.1 101 Switching Protocols
        w.write_or_err(HTTP_STATUS_LINE, || HandshakeError::NotEnoughCapacity)?;
        w.write_or_err(HTTP_LINE_BREAK.as_bytes(), || HandshakeError::NotEnoughCapacity)?;

        // Upgrade: websocket
        write_header!(w, HEADER_UPGRADE_NAME, HEADER_UPGRADE_VALUE.as_bytes());

        // Connection: Upgrade
        write_header!(w, HEADER_CONNECTION_NAME, HEADER_CONNECTION_VALUE.as_bytes());

        // Sec-WebSocket-Accept: {sec_accept}
        write_header!(w, HEADER_SEC_WEBSOCKET_ACCEPT_NAME, &self.sec_accept);

        // finish with CRLF
        w.write_or_err(HTTP_LINE_BREAK.as_bytes(), || HandshakeError::NotEnoughCapacity)?;

        Ok(w.pos())
    }

    /// Encode to a new buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = vec![0; self.encoded_len()];
        // the buffer is exactly large enough
        let n = self.encode(&mut buf).unwrap_or(0);
        buf.truncate(n);
        buf
    }
}

#[cfg(test)]
mod test {
    use super::*;

    pub const RESPONSE: &[u8] = b"\
        HTTP/1.1 101 Switching Protocols\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n";

    #[test]
    fn server_response() {
        let response = Response::new(b"dGhlIHNhbXBsZSBub25jZQ==");
        assert_eq!(&response.sec_accept, b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
        assert_eq!(response.encoded_len(), RESPONSE.len());

        let mut buf = vec![0u8; 1024];
        let encode_n = response.encode(&mut buf).unwrap();
        assert_eq!(&buf[..encode_n], RESPONSE);

        assert_eq!(response.to_vec(), RESPONSE);
    }

    #[test]
    fn server_response_capacity() {
        let response = Response::new(b"dGhlIHNhbXBsZSBub25jZQ==");

        for len in 0..RESPONSE.len() {
            let mut buf = vec![0u8; len];
            assert_eq!(
                response.encode(&mut buf),
                Err(HandshakeError::NotEnoughCapacity)
            );
        }

        let mut buf = vec![0u8; RESPONSE.len()];
        assert_eq!(response.encode(&mut buf), Ok(RESPONSE.len()));
    }
}
