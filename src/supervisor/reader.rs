use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use super::{send_control, log_write_failure, SharedWriter};
use crate::connection::{Handle, State};
use crate::frame::{Control, FrameHead, OpCode};
use crate::server::READ_BUF_SIZE;

/// Why the reader stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderExit {
    /// close frame received and answered
    PeerClosed,
    /// shutdown signal observed, close frame sent
    Shutdown,
    /// transport reached EOF
    Eof,
    /// transport read failed
    Error,
}

/// Consume frames until the peer closes, the transport fails,
/// or shutdown is requested. Raises the shutdown signal on return, and
/// answers with a close frame unless the transport is gone.
///
/// Only the first byte of each read is inspected, everything but a
/// close frame is discarded.
pub(crate) async fn run<R, W>(
    mut rd: R,
    wr: SharedWriter<W>,
    handle: Handle,
    write_timeout: Duration,
) -> ReaderExit
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = handle.id();
    let shutdown = handle.shutdown();
    let mut buf = vec![0u8; READ_BUF_SIZE];

    let exit = loop {
        let res = tokio::select! {
            biased;
            _ = shutdown.raised() => None,
            res = rd.read(&mut buf) => Some(res),
        };

        let n = match res {
            None => {
                debug!("{}: shutdown requested, closing", id);
                break ReaderExit::Shutdown;
            }
            Some(Err(e)) => {
                warn!("{}: read failed: {}", id, e);
                break ReaderExit::Error;
            }
            Some(Ok(0)) => {
                debug!("{}: eof", id);
                break ReaderExit::Eof;
            }
            Some(Ok(n)) => n,
        };

        // n > 0, only the first byte of a frame is looked at
        let head = FrameHead::decode(buf[0]);

        if head.opcode == OpCode::Close {
            debug!("{}: received close", id);
            break ReaderExit::PeerClosed;
        }

        debug!("{}: discard {} bytes, {:?}", id, n, head.opcode);
    };

    handle.set_state(State::Closing);
    // raised before the close frame goes out, so no ping can follow it
    shutdown.raise();

    if matches!(exit, ReaderExit::PeerClosed | ReaderExit::Shutdown) {
        if let Err(e) = send_control(&wr, Control::Close, write_timeout, None).await {
            log_write_failure(id, Control::Close, &e);
        }
    }

    exit
}
