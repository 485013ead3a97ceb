//! Keepalive supervision of an established connection.
//!
//! Two tasks run per connection. The reader consumes incoming frames
//! and answers a peer close, the pinger probes the peer every
//! [`PING_INTERVAL`]. They share the connection's shutdown signal: the
//! first one to stop raises it, the other one observes it at its next
//! suspension point.

mod reader;
mod pinger;

pub use reader::ReaderExit;
pub use pinger::PingerExit;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::connection::{Connection, ConnectionId, State};
use crate::frame::Control;
use crate::shutdown::Shutdown;

/// 10s
pub const PING_INTERVAL: Duration = Duration::from_secs(10);

/// The connection is dropped on the 6th consecutive failed ping.
pub const MAX_PING_FAILURES: usize = 5;

/// Keepalive timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keepalive {
    /// Sleep between two pings, also bounds a single control frame write.
    pub interval: Duration,
    /// Consecutive failed pings tolerated.
    pub max_failures: usize,
}

impl Default for Keepalive {
    fn default() -> Self {
        Self {
            interval: PING_INTERVAL,
            max_failures: MAX_PING_FAILURES,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// the peer sent a close frame
    PeerClosed,
    /// too many pings failed
    Unresponsive,
    /// shutdown requested from elsewhere
    Shutdown,
    /// reading from the transport failed
    TransportError,
    /// the peer closed the transport
    Eof,
}

impl SessionEnd {
    fn from_exits(reader: ReaderExit, pinger: PingerExit) -> Self {
        match (reader, pinger) {
            (ReaderExit::PeerClosed, _) => SessionEnd::PeerClosed,
            (ReaderExit::Eof, _) => SessionEnd::Eof,
            (ReaderExit::Error, _) => SessionEnd::TransportError,
            (ReaderExit::Shutdown, PingerExit::Unresponsive) => SessionEnd::Unresponsive,
            (ReaderExit::Shutdown, PingerExit::Shutdown) => SessionEnd::Shutdown,
        }
    }
}

/// Write half shared by the reader and the pinger.
pub(crate) type SharedWriter<W> = Arc<Mutex<W>>;

/// Write one empty control frame, giving up after `timeout`.
///
/// With `unless` set, nothing is written if that signal is raised by the
/// time the writer is locked, and `Ok(false)` is returned.
pub(crate) async fn send_control<W>(
    wr: &Mutex<W>,
    ctrl: Control,
    timeout: Duration,
    unless: Option<&Shutdown>,
) -> io::Result<bool>
where
    W: AsyncWrite + Unpin,
{
    let frame = ctrl.encode();
    let write = async {
        let mut wr = wr.lock().await;
        if unless.map_or(false, Shutdown::is_raised) {
            return Ok(false);
        }
        wr.write_all(&frame).await?;
        wr.flush().await?;
        Ok::<_, io::Error>(true)
    };

    match tokio::time::timeout(timeout, write).await {
        Ok(res) => res,
        Err(_) => Err(io::Error::from(io::ErrorKind::TimedOut)),
    }
}

/// Drive an upgraded connection until it closes.
///
/// The reader and pinger run as separate tasks. Once both exit the
/// transport is shut down and the connection is marked [`State::Closed`].
pub async fn serve<IO>(conn: Connection<IO>, keepalive: Keepalive) -> SessionEnd
where
    IO: AsyncRead + AsyncWrite + Send + 'static,
{
    let (io, handle) = conn.into_parts();
    let id = handle.id();
    handle.set_state(State::Established);
    debug!("{}: established", id);

    let (rd, wr) = tokio::io::split(io);
    let wr: SharedWriter<_> = Arc::new(Mutex::new(wr));

    let reader = tokio::spawn(reader::run(
        rd,
        wr.clone(),
        handle.clone(),
        keepalive.interval,
    ));
    let pinger = tokio::spawn(pinger::run(wr.clone(), handle.clone(), keepalive));

    let (reader, pinger) = tokio::join!(reader, pinger);

    let reader = reader.unwrap_or_else(|e| {
        warn!("{}: reader task failed: {}", id, e);
        handle.shutdown().raise();
        ReaderExit::Error
    });
    let pinger = pinger.unwrap_or_else(|e| {
        warn!("{}: pinger task failed: {}", id, e);
        PingerExit::Shutdown
    });

    // both tasks are gone, close the transport
    if let Err(e) = wr.lock().await.shutdown().await {
        debug!("{}: shutdown transport: {}", id, e);
    }

    handle.set_state(State::Closed);

    let end = SessionEnd::from_exits(reader, pinger);
    debug!("{}: closed, {:?}", id, end);
    end
}

/// Log helper shared by both loops.
#[inline]
pub(crate) fn log_write_failure(id: ConnectionId, ctrl: Control, e: &io::Error) {
    warn!("{}: failed to send {:?}: {}", id, ctrl, e);
}
