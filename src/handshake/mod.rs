//! Websocket handshake.
//!
//! The server side of [RFC-6455 Section 4](https://datatracker.ietf.org/doc/html/rfc6455#section-4),
//! restricted to a single endpoint path and exact header values.

pub mod key;
pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;
pub use key::derive_accept_key;

use crate::error::HandshakeError;

/// 258EAFA5-E914-47DA-95CA-C5AB0DC85B11
pub const GUID: &[u8] = b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// GET
pub const HTTP_METHOD: &str = "GET";

/// /ws
pub const HTTP_PATH: &str = "/ws";

/// HTTP/
pub const HTTP_VERSION_PREFIX: &str = "HTTP/";

/// 1.1
pub const MIN_HTTP_VERSION: f64 = 1.1;

/// CRLF
pub const HTTP_LINE_BREAK: &str = "\r\n";

/// CRLF CRLF
pub const HTTP_HEAD_END: &str = "\r\n\r\n";

/// A colon + one SP
pub const HTTP_HEADER_SP: &str = ": ";

/// HTTP/1.1 101 Switching Protocols
pub const HTTP_STATUS_LINE: &[u8] = b"HTTP/1.1 101 Switching Protocols";

macro_rules! header {
    (   $(
            $(#[$docs: meta])*
            ($hdr_name: ident => $name: expr);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $hdr_name: &str = $name;
        )+
    };
}

macro_rules! write_header {
    ($w: expr, $name: expr, $value: expr) => {
        if $w.remaining()
            < $name.len() + HTTP_HEADER_SP.len() + $value.len() + HTTP_LINE_BREAK.len()
        {
            return Err(HandshakeError::NotEnoughCapacity);
        } else {
            $w.write_checked($name.as_bytes());
            $w.write_checked(HTTP_HEADER_SP.as_bytes());
            $w.write_checked($value);
            $w.write_checked(HTTP_LINE_BREAK.as_bytes());
        }
    };
}

pub(self) use write_header;

/// Static http headers, compared exactly.
pub mod static_headers {
    // header name
    header! {
        (HEADER_UPGRADE_NAME => "Upgrade");

        (HEADER_CONNECTION_NAME => "Connection");

        (HEADER_SEC_WEBSOCKET_KEY_NAME => "Sec-WebSocket-Key");

        (HEADER_SEC_WEBSOCKET_ACCEPT_NAME => "Sec-WebSocket-Accept");

        (HEADER_SEC_WEBSOCKET_VERSION_NAME => "Sec-WebSocket-Version");
    }

    // header value
    header! {
        (HEADER_UPGRADE_VALUE => "websocket");

        (HEADER_CONNECTION_VALUE => "Upgrade");

        (HEADER_SEC_WEBSOCKET_VERSION_VALUE => "13");
    }
}

/// Validate an upgrade request and build the matching response.
///
/// Nothing should be sent back to the client on error.
pub fn negotiate(buf: &[u8]) -> Result<Response, HandshakeError> {
    let request = Request::decode(buf)?;
    Ok(Response::new(request.sec_key.as_bytes()))
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use rand::prelude::*;

    pub const TEMPLATE_HEADERS: &str = "\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Version: 13\r\n\
        Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==";

    /// Template headers plus `count` random headers, shuffled.
    pub fn make_headers(count: usize, max_len: usize, headers: &str) -> String {
        fn rand_ascii() -> char {
            let x: u8 = thread_rng().gen_range(1..=4);
            let ch: u8 = match x {
                1 => thread_rng().gen_range(b'0'..=b'9'),
                2 => thread_rng().gen_range(b'A'..=b'Z'),
                3 => thread_rng().gen_range(b'a'..=b'z'),
                4 => b'-',
                _ => unreachable!(),
            };
            ch as char
        }

        fn rand_str(len: usize) -> String {
            let mut s = String::new();
            for _ in 0..len {
                s.push(rand_ascii());
            }
            s
        }

        fn make_header(max_len: usize) -> String {
            let name_len: usize = thread_rng().gen_range(1..=max_len);
            let value_len: usize = thread_rng().gen_range(1..=max_len);
            format!("X-{}: {}\r\n", rand_str(name_len), rand_str(value_len))
        }

        let mut s = Vec::<String>::with_capacity(256);
        for hdr in headers.split("\r\n") {
            s.push(format!("{}\r\n", hdr));
        }
        for _ in 0..count {
            s.push(make_header(max_len));
        }
        s.shuffle(&mut thread_rng());
        s.concat()
    }

    #[test]
    fn negotiate_valid() {
        let request = format!("GET /ws HTTP/1.1\r\n{}\r\n\r\n", TEMPLATE_HEADERS);
        let response = negotiate(request.as_bytes()).unwrap();
        let text = String::from_utf8(response.to_vec()).unwrap();
        assert!(text.contains("Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n"));
    }

    #[test]
    fn negotiate_invalid() {
        let request = format!("POST /ws HTTP/1.1\r\n{}\r\n\r\n", TEMPLATE_HEADERS);
        assert_eq!(
            negotiate(request.as_bytes()).unwrap_err(),
            HandshakeError::HttpMethod
        );
    }
}
