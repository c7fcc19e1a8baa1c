//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::inbound::http::session_config::SessionSettings;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::password::BcryptPasswordHasher;
use crate::outbound::persistence::DbPool;

/// Where users, cars, and rentals live.
#[derive(Clone)]
pub enum Storage {
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
    /// Process-local maps; state is lost on restart.
    Memory(Arc<InMemoryStore>),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) hasher: BcryptPasswordHasher,
}

impl ServerConfig {
    /// Construct a configuration over the given storage with the default
    /// bcrypt cost.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, storage: Storage) -> Self {
        Self {
            session,
            bind_addr,
            storage,
            hasher: BcryptPasswordHasher::default(),
        }
    }

    /// Override the password hasher, typically to apply a configured cost.
    #[must_use]
    pub fn with_password_hasher(mut self, hasher: BcryptPasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the configured storage backend.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
