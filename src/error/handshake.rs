use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum HandshakeError {
    // request line error
    RequestLine,

    HttpMethod,

    HttpPath,

    HttpVersion,

    // websocket error
    Upgrade,

    Connection,

    SecWebSocketKey,

    SecWebSocketVersion,

    // other error

    // a header line without ": "
    MalformedHeader,

    NotUtf8,

    // read
    NotEnoughData,

    // write
    NotEnoughCapacity,
}

impl Display for HandshakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use HandshakeError::*;
        match self {
            // request line error
            RequestLine => write!(f, "Illegal http request line"),

            HttpMethod => write!(f, "Illegal http method"),

            HttpPath => write!(f, "Illegal http path"),

            HttpVersion => write!(f, "Illegal http version"),

            // websocket error
            Upgrade => write!(f, "Missing or illegal upgrade header"),

            Connection => write!(f, "Missing or illegal connection header"),

            SecWebSocketKey => {
                write!(f, "Missing sec-websocket-key header")
            }

            SecWebSocketVersion => {
                write!(f, "Missing or illegal sec-websocket-version")
            }

            // other error
            MalformedHeader => write!(f, "Malformed http header line"),

            NotUtf8 => write!(f, "Request is not valid utf-8"),

            NotEnoughData => write!(f, "Not enough data to parse"),

            NotEnoughCapacity => write!(f, "Not enough space to write to"),
        }
    }
}

// use default impl
impl std::error::Error for HandshakeError {}
