//! Minimal websocket server core with keepalive supervision.
//!
//! ## Features
//! - Strict single-read upgrade handshake on `/ws`.
//! - Frame head codec for the first byte of a frame.
//! - Per-connection reader and pinger tasks with a shared shutdown signal.
//! - Process-wide connection registry.
//!
//! Payload lengths, masking, fragmentation, extensions and subprotocols
//! are out of scope: only the first byte of an incoming frame is looked at.
//!
//! ## High-level API
//!
//! - [`server`]
//! - [`supervisor`]
//! - [`registry`]
//!
//! ```ignore
//! {
//!     let server = Server::bind(("0.0.0.0", PORT)).await?;
//!     server.run().await?;
//! }
//! ```
//!
//! ## Low-level API
//!
//! - [`frame`]
//! - [`handshake`]
//! - [`endpoint`]
//!
//! Frame:
//!
//! ```ignore
//! {
//!     // decode a frame head
//!     let head = FrameHead::decode(buf[0]);
//!
//!     // encode an empty ping frame
//!     let ping: [u8; 2] = Control::Ping.encode();
//! }
//! ```
//!
//! Handshake:
//!
//! ```ignore
//! {
//!     // validate a request and build the response
//!     let response = handshake::negotiate(&buf[..n])?;
//!     let offset = response.encode(&mut out)?;
//! }
//! ```

mod bleed;

pub mod error;
pub mod frame;
pub mod handshake;
pub mod endpoint;
pub mod shutdown;
pub mod connection;
pub mod registry;
pub mod supervisor;
pub mod server;

pub use server::Server;
