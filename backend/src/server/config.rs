//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use contacts::domain::ContactStore;

/// Everything `create_server` needs besides the health state.
pub struct ServerConfig {
    pub(crate) contacts: Arc<dyn ContactStore>,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cookie_secure: bool,
}

impl ServerConfig {
    /// Serve `contacts` on `bind_addr`.
    #[must_use]
    pub fn new(contacts: Arc<dyn ContactStore>, bind_addr: SocketAddr, cookie_secure: bool) -> Self {
        Self {
            contacts,
            bind_addr,
            cookie_secure,
        }
    }
}
