#![allow(missing_docs)]
//! Errors

mod handshake;

pub use handshake::HandshakeError;

use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Handshake(HandshakeError),

    Io(std::io::Error),
}

impl From<HandshakeError> for Error {
    fn from(e: HandshakeError) -> Self { Error::Handshake(e) }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error { Error::Io(e) }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            Handshake(e) => write!(f, "Handshake error: {}", e),
            Io(e) => write!(f, "Io error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match self {
            Handshake(e) => Some(e),
            Io(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn error_source() {
        let e = Error::from(HandshakeError::MalformedHeader);
        assert_eq!(e.to_string(), "Handshake error: Malformed http header line");
        assert!(e.source().is_some());

        let e = Error::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(e, Error::Io(_)));
    }
}
