//! Accept loop.
//!
//! Each accepted transport gets a [`Connection`], is registered, and is
//! driven in its own task: handshake first, then keepalive supervision.
//! The entry is removed from the registry once the task is done.

use std::io;
use std::net::SocketAddr;

use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::connection::{Connection, State};
use crate::endpoint;
use crate::registry::Registry;
use crate::supervisor::{self, Keepalive, SessionEnd};

/// 8000
pub const PORT: u16 = 8000;

/// Max bytes taken by a single read.
pub const READ_BUF_SIZE: usize = 65535;

/// Websocket server bound to a listening socket.
pub struct Server {
    listener: TcpListener,
    registry: Registry,
    keepalive: Keepalive,
}

impl Server {
    /// Bind the listening socket.
    pub async fn bind<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            registry: Registry::new(),
            keepalive: Keepalive::default(),
        })
    }

    /// Replace the keepalive timing used for new connections.
    pub fn with_keepalive(mut self, keepalive: Keepalive) -> Self {
        self.keepalive = keepalive;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> { self.listener.local_addr() }

    pub fn registry(&self) -> &Registry { &self.registry }

    /// Accept connections forever. Accept errors are logged and skipped.
    pub async fn run(self) -> io::Result<()> {
        info!("listening on {}", self.listener.local_addr()?);

        loop {
            let (tcp, peer) = match self.listener.accept().await {
                Ok(x) => x,
                Err(e) => {
                    warn!("failed to accept a connection: {}", e);
                    continue;
                }
            };

            let conn = Connection::new(tcp);
            debug!("{}: accepted from {}", conn.id(), peer);

            self.registry.insert(conn.handle().clone());
            tokio::spawn(handle(conn, self.registry.clone(), self.keepalive));
        }
    }
}

/// Drive one registered connection to the end, then unregister it.
///
/// Returns `None` if the handshake was rejected.
pub async fn handle<IO>(
    mut conn: Connection<IO>,
    registry: Registry,
    keepalive: Keepalive,
) -> Option<SessionEnd>
where
    IO: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let id = conn.id();
    let mut buf = vec![0u8; READ_BUF_SIZE];

    let res = endpoint::accept(conn.io_mut(), &mut buf).await;

    let end = match res {
        Ok(_) => {
            debug!("{}: upgraded", id);
            drop(buf);
            Some(supervisor::serve(conn, keepalive).await)
        }
        Err(e) => {
            // no response for a rejected upgrade
            debug!("{}: handshake failed: {}", id, e);
            conn.handle().set_state(State::Closed);
            None
        }
    };

    registry.remove(&id);
    end
}
