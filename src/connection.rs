//! One accepted transport and its lifecycle.
//!
//! ```text
//! Handshaking -> Established -> Closing -> Closed
//!      |                                     ^
//!      +-------------------------------------+
//! ```

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::shutdown::Shutdown;

/// Process-unique connection identifier, only used as a registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a new random (v4) identifier.
    #[inline]
    pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for ConnectionId {
    fn default() -> Self { Self::new() }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    /// accepted, waiting for the upgrade request
    Handshaking = 0,
    /// upgraded, reader and pinger running
    Established = 1,
    /// termination requested
    Closing = 2,
    /// all tasks exited, transport closed
    Closed = 3,
}

impl State {
    #[inline]
    const fn from_u8(v: u8) -> Self {
        match v {
            0 => State::Handshaking,
            1 => State::Established,
            2 => State::Closing,
            _ => State::Closed,
        }
    }
}

/// The shared part of a connection, held by the registry and by
/// the tasks driving the connection.
#[derive(Debug, Clone)]
pub struct Handle {
    id: ConnectionId,
    shutdown: Shutdown,
    state: Arc<AtomicU8>,
}

impl Handle {
    pub(crate) fn new() -> Self {
        Self {
            id: ConnectionId::new(),
            shutdown: Shutdown::new(),
            state: Arc::new(AtomicU8::new(State::Handshaking as u8)),
        }
    }

    #[inline]
    pub fn id(&self) -> ConnectionId { self.id }

    #[inline]
    pub fn shutdown(&self) -> &Shutdown { &self.shutdown }

    #[inline]
    pub fn state(&self) -> State { State::from_u8(self.state.load(Ordering::Acquire)) }

    /// States only move forward, an earlier state is ignored.
    #[inline]
    pub(crate) fn set_state(&self, state: State) {
        self.state.fetch_max(state as u8, Ordering::AcqRel);
    }
}

/// An accepted transport, owned exclusively until it is closed.
pub struct Connection<IO> {
    io: IO,
    handle: Handle,
}

impl<IO> Connection<IO> {
    /// Wrap a freshly accepted transport.
    pub fn new(io: IO) -> Self {
        Self {
            io,
            handle: Handle::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ConnectionId { self.handle.id }

    #[inline]
    pub fn handle(&self) -> &Handle { &self.handle }

    #[inline]
    pub fn state(&self) -> State { self.handle.state() }

    #[inline]
    pub fn io_mut(&mut self) -> &mut IO { &mut self.io }

    #[inline]
    pub fn into_parts(self) -> (IO, Handle) { (self.io, self.handle) }
}

impl<IO> std::fmt::Debug for Connection<IO> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.handle.id)
            .field("state", &self.handle.state())
            .finish()
    }
}
