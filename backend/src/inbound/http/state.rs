//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they stay testable without network access.

use std::sync::Arc;

use crate::domain::ports::HandleResolution;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Relay use case.
    pub resolver: Arc<dyn HandleResolution>,
}

impl HttpState {
    /// Construct state from the relay use case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use handle_relay::domain::HandleResolver;
    /// use handle_relay::domain::ports::FixtureUserDirectory;
    /// use handle_relay::inbound::http::state::HttpState;
    ///
    /// let resolver = HandleResolver::new(Arc::new(FixtureUserDirectory::default()));
    /// let state = HttpState::new(Arc::new(resolver));
    /// let _resolver = state.resolver.clone();
    /// ```
    pub fn new(resolver: Arc<dyn HandleResolution>) -> Self {
        Self { resolver }
    }
}
