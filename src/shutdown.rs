//! Connection shutdown signal.
//!
//! Any number of producers may raise the signal, raising never blocks and
//! is never lost. Observers either check it between steps with
//! [`Shutdown::is_raised`], or await [`Shutdown::raised`] alongside a
//! blocking read or sleep.

use std::sync::Arc;
use tokio::sync::watch;

/// Multi-producer shutdown signal, cheap to clone.
#[derive(Debug, Clone)]
pub struct Shutdown {
    // number of raises so far
    tx: Arc<watch::Sender<usize>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Request termination.
    #[inline]
    pub fn raise(&self) { self.tx.send_modify(|n| *n += 1); }

    #[inline]
    pub fn is_raised(&self) -> bool { *self.tx.borrow() > 0 }

    /// How many times the signal has been raised.
    #[inline]
    pub fn count(&self) -> usize { *self.tx.borrow() }

    /// Wait until the signal is raised, returns at once if it already was.
    ///
    /// This is cancel safe.
    pub async fn raised(&self) {
        let mut rx = self.tx.subscribe();
        // the sender lives in self, so this never fails
        let _ = rx.wait_for(|n| *n > 0).await;
    }
}

impl Default for Shutdown {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    #[test]
    fn raise_many() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.is_raised());
        assert_eq!(shutdown.count(), 0);

        let producers: Vec<_> = (0..16).map(|_| shutdown.clone()).collect();
        for p in producers.iter() {
            p.raise();
        }

        assert!(shutdown.is_raised());
        assert_eq!(shutdown.count(), 16);
    }

    #[tokio::test]
    async fn wake_waiter() {
        let shutdown = Shutdown::new();
        let waiter = shutdown.clone();

        let t = tokio::spawn(async move {
            waiter.raised().await;
            waiter.count()
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!t.is_finished());

        shutdown.raise();
        assert_eq!(t.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn already_raised() {
        let shutdown = Shutdown::new();
        shutdown.raise();
        tokio::time::timeout(Duration::from_secs(1), shutdown.raised())
            .await
            .unwrap();
    }
}
