//! Member session identity.
//!
//! # Design
//! The session identifier (a device UUID string) is the only mutable state
//! the client core shares. `MemberSession` is a cheap-clone handle around
//! it: every authenticated request reads the identifier at build time, and
//! only the registration/logout flow writes it. Single writer, many
//! readers, last write wins. Durable storage sits behind the
//! `IdentityStore` trait so the platform key-value store stays an external
//! collaborator; `MemoryIdentityStore` backs tests and non-persistent
//! consumers.

use std::sync::{Arc, Mutex, RwLock};

use uuid::Uuid;

/// Generate a fresh device identifier for first launch.
pub fn new_device_id() -> String {
    Uuid::new_v4().to_string()
}

/// Durable key-value storage for the session identifier.
pub trait IdentityStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, identifier: &str);
    fn clear(&self);
}

/// In-memory store. Loses the identifier on drop.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    value: Mutex<Option<String>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identifier(identifier: &str) -> Self {
        Self { value: Mutex::new(Some(identifier.to_string())) }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Option<String> {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, identifier: &str) {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(identifier.to_string());
    }

    fn clear(&self) {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

type Listener = Box<dyn Fn(&str) + Send + Sync>;

struct SessionInner {
    identifier: RwLock<String>,
    store: Box<dyn IdentityStore>,
    listeners: Mutex<Vec<Listener>>,
}

/// Shared handle to the current member identity.
#[derive(Clone)]
pub struct MemberSession {
    inner: Arc<SessionInner>,
}

impl MemberSession {
    /// Create a session backed by `store`, loading any persisted
    /// identifier. An absent identifier is represented as the empty
    /// string, meaning "not registered".
    pub fn new(store: impl IdentityStore + 'static) -> Self {
        let identifier = store.load().unwrap_or_default();
        Self {
            inner: Arc::new(SessionInner {
                identifier: RwLock::new(identifier),
                store: Box::new(store),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Snapshot of the current identifier. Empty when unregistered.
    pub fn identifier(&self) -> String {
        self.inner.identifier.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_registered(&self) -> bool {
        !self.identifier().is_empty()
    }

    /// Persist a new identifier and notify listeners. Called by the
    /// registration flow on success.
    pub fn set_identifier(&self, identifier: &str) {
        self.inner.store.save(identifier);
        *self.inner.identifier.write().unwrap_or_else(|e| e.into_inner()) =
            identifier.to_string();
        tracing::debug!("session identifier updated");
        self.notify(identifier);
    }

    /// Drop the identifier from memory and storage. Called on logout.
    pub fn clear(&self) {
        self.inner.store.clear();
        self.inner.identifier.write().unwrap_or_else(|e| e.into_inner()).clear();
        tracing::debug!("session identifier cleared");
        self.notify("");
    }

    /// Register a change listener. Listeners observe every
    /// `set_identifier` and `clear` after the write has landed.
    pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(listener));
    }

    fn notify(&self, identifier: &str) {
        let listeners = self.inner.listeners.lock().unwrap_or_else(|e| e.into_inner());
        for listener in listeners.iter() {
            listener(identifier);
        }
    }
}

impl std::fmt::Debug for MemberSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberSession")
            .field("registered", &self.is_registered())
            .finish()
    }
}
