//! Websocket endpoint, the IO side of a server handshake.
//!
//! ```ignore
//! {
//!     let mut buf = vec![0u8; READ_BUF_SIZE];
//!     let response = endpoint::accept(&mut tcp, &mut buf).await?;
//! }
//! ```

mod accept;

pub use accept::{accept, recv_request, send_response};
