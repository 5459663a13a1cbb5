//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the contact store port and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ContactStore;

use super::flash::Flash;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contacts: Arc<dyn ContactStore>,
    pub flash: Flash,
}

impl HttpState {
    /// Bundle the store with a flash helper built from `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use contacts::domain::StoreSettings;
    /// use contacts::inbound::http::state::HttpState;
    /// use contacts::outbound::InMemoryContactStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = InMemoryContactStore::new(Vec::new(), StoreSettings::default());
    /// let state = HttpState::new(Arc::new(store), Arc::new(DefaultClock), false);
    /// assert!(state.contacts.is_empty());
    /// ```
    pub fn new(
        contacts: Arc<dyn ContactStore>,
        clock: Arc<dyn Clock + Send + Sync>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            contacts,
            flash: Flash::new(clock, cookie_secure),
        }
    }
}
