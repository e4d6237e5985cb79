//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the data
//! access port, so tests can swap in mocks without any I/O.

use std::sync::Arc;

use crate::domain::ports::DataAccessService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Record persistence port.
    pub data: Arc<dyn DataAccessService>,
}

impl HttpState {
    /// Wrap a data access implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use data_api::inbound::http::state::HttpState;
    /// use data_api::outbound::memory::InMemoryDataStore;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryDataStore::new(Arc::new(DefaultClock))));
    /// let _data = state.data.clone();
    /// ```
    pub fn new(data: Arc<dyn DataAccessService>) -> Self {
        Self { data }
    }
}
