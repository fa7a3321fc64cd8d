//! Module: timeline-api
//! Responsibility: the HTTP surface over `timeline-core` (spec §4.4, §6) —
//! route registration, parameter validation, limit canonicalization,
//! response assembly, and startup configuration.
//! Does not own: the cursor engine, family query builders, or the document
//! store — those are `timeline-core`'s and its `Store` collaborator's
//! concern; this crate only ever calls through the `Store` trait.
//! Boundary: an HTTP request in, a `Store` implementation and `Config` at
//! startup, a JSON response out.

pub mod config;
pub mod error;
pub mod handler;
pub mod response;
pub mod routes;

use std::sync::Arc;
use timeline_core::Store;

/// Shared application state handed to every handler. Generic over the
/// concrete `Store` so this crate never depends on `timeline-store`
/// directly — only the binary that assembles a server does.
pub struct AppState<S> {
    pub store: S,
    pub config: Arc<config::Config>,
}

impl<S: Clone> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Store + Clone + Send + Sync + 'static> AppState<S> {
    #[must_use]
    pub fn new(store: S, config: config::Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Assemble the full router for a given store and configuration.
#[must_use]
pub fn build_router<S: Store + Clone + Send + Sync + 'static>(store: S, config: config::Config) -> axum::Router {
    routes::build_router(AppState::new(store, config))
}
