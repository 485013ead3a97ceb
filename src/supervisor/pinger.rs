use log::{debug, warn};
use tokio::io::AsyncWrite;

use super::{send_control, log_write_failure, Keepalive, SharedWriter};
use crate::connection::Handle;
use crate::frame::Control;

/// Why the pinger stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingerExit {
    /// too many consecutive pings failed, shutdown raised
    Unresponsive,
    /// shutdown signal observed
    Shutdown,
}

/// Ping the peer every `keepalive.interval` until shutdown is requested.
///
/// A successful ping resets the failure counter. Once the counter exceeds
/// `keepalive.max_failures`, the shutdown signal is raised exactly once.
pub(crate) async fn run<W>(wr: SharedWriter<W>, handle: Handle, keepalive: Keepalive) -> PingerExit
where
    W: AsyncWrite + Unpin,
{
    let id = handle.id();
    let shutdown = handle.shutdown();
    let mut fails: usize = 0;

    loop {
        if shutdown.is_raised() {
            return PingerExit::Shutdown;
        }

        match send_control(&wr, Control::Ping, keepalive.interval, Some(shutdown)).await {
            Ok(true) => fails = 0,
            Ok(false) => return PingerExit::Shutdown,
            Err(e) => {
                fails += 1;
                log_write_failure(id, Control::Ping, &e);
            }
        }

        if fails > keepalive.max_failures {
            warn!("{}: {} pings failed in a row, giving up", id, fails);
            shutdown.raise();
            return PingerExit::Unresponsive;
        }

        tokio::select! {
            _ = tokio::time::sleep(keepalive.interval) => {}
            _ = shutdown.raised() => {
                debug!("{}: pinger stopped", id);
                return PingerExit::Shutdown;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::test::{fast_keepalive, frames};
    use super::super::MAX_PING_FAILURES;
    use std::io;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::{Context, Poll};
    use std::time::Duration;

    use tokio::sync::Mutex;

    /// Fails the first `fail_first` writes, then accepts everything.
    struct Flaky {
        fail_first: usize,
        attempts: Arc<AtomicUsize>,
        wbuf: Vec<u8>,
    }

    impl AsyncWrite for Flaky {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            let this = self.get_mut();
            let n = this.attempts.fetch_add(1, Ordering::SeqCst);
            if n < this.fail_first {
                return Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()));
            }
            this.wbuf.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn give_up_after_six_failures() {
        let handle = Handle::new();
        let attempts = Arc::new(AtomicUsize::new(0));
        let wr = Arc::new(Mutex::new(Flaky {
            fail_first: usize::MAX,
            attempts: attempts.clone(),
            wbuf: Vec::new(),
        }));

        let exit = tokio::time::timeout(
            Duration::from_secs(5),
            run(wr, handle.clone(), fast_keepalive()),
        )
        .await
        .unwrap();

        assert_eq!(exit, PingerExit::Unresponsive);
        assert_eq!(attempts.load(Ordering::SeqCst), MAX_PING_FAILURES + 1);
        assert_eq!(handle.shutdown().count(), 1);
    }

    #[tokio::test]
    async fn success_resets_failures() {
        let handle = Handle::new();
        let attempts = Arc::new(AtomicUsize::new(0));
        // 5 failures are tolerated, then pings go through
        let wr = Arc::new(Mutex::new(Flaky {
            fail_first: 5,
            attempts: attempts.clone(),
            wbuf: Vec::new(),
        }));

        let t = tokio::spawn(run(wr.clone(), handle.clone(), fast_keepalive()));

        while attempts.load(Ordering::SeqCst) < 10 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(!t.is_finished());
        assert!(!handle.shutdown().is_raised());

        handle.shutdown().raise();
        assert_eq!(t.await.unwrap(), PingerExit::Shutdown);

        let wbuf = wr.lock().await.wbuf.clone();
        let frames = frames(&wbuf);
        assert!(frames.len() >= 5);
        assert!(frames.iter().all(|f| *f == Control::Ping.encode()));
    }

    #[tokio::test]
    async fn stop_on_shutdown() {
        let handle = Handle::new();
        handle.shutdown().raise();
        let wr = Arc::new(Mutex::new(Vec::<u8>::new()));

        let exit = run(wr.clone(), handle.clone(), Keepalive::default()).await;

        assert_eq!(exit, PingerExit::Shutdown);
        assert!(wr.lock().await.is_empty());
        // nothing raised by the pinger itself
        assert_eq!(handle.shutdown().count(), 1);
    }

    #[tokio::test]
    async fn wake_from_sleep() {
        let handle = Handle::new();
        let wr = Arc::new(Mutex::new(Vec::<u8>::new()));

        let t = tokio::spawn(run(wr.clone(), handle.clone(), Keepalive::default()));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(&*wr.lock().await, &Control::Ping.encode());

        handle.shutdown().raise();
        let exit = tokio::time::timeout(Duration::from_secs(1), t)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(exit, PingerExit::Shutdown);
    }
}
