//! Process-wide directory of live connections.

use std::sync::Arc;

use dashmap::DashMap;

use crate::connection::{ConnectionId, Handle};

/// Concurrent map from connection identifier to its [`Handle`].
///
/// Entries are inserted on accept and removed once the connection is closed.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<DashMap<ConnectionId, Handle>>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    /// Insert a handle, returning the previous one with the same id.
    pub fn insert(&self, handle: Handle) -> Option<Handle> { self.inner.insert(handle.id(), handle) }

    pub fn get(&self, id: &ConnectionId) -> Option<Handle> {
        self.inner.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &ConnectionId) -> Option<Handle> {
        self.inner.remove(id).map(|(_, handle)| handle)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool { self.inner.contains_key(id) }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    pub fn ids(&self) -> Vec<ConnectionId> { self.inner.iter().map(|entry| *entry.key()).collect() }

    /// Raise the shutdown signal of one connection.
    /// Returns false if there is no such connection.
    pub fn shutdown(&self, id: &ConnectionId) -> bool {
        match self.inner.get(id) {
            Some(entry) => {
                entry.value().shutdown().raise();
                true
            }
            None => false,
        }
    }

    /// Raise the shutdown signal of every connection.
    pub fn shutdown_all(&self) {
        for entry in self.inner.iter() {
            entry.value().shutdown().raise();
        }
    }
}
