//! Module: routes
//! Responsibility: axum `Router` registration for the 11 routes in spec §6,
//! plus the per-request tracing layer every route shares.
//! Does not own: parameter validation or dispatch — see [`crate::handler`].
//! Boundary: an [`AppState`] in, a configured [`Router`] out.

use crate::{handler, AppState};
use axum::{Router, routing::get};
use timeline_core::Store;
use tower_http::trace::TraceLayer;

pub fn build_router<S: Store + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/blocks/:duration/:anchor/limit/:limit", get(handler::blocks::<S>))
        .route(
            "/transactions/:duration/:anchor/limit/:limit",
            get(handler::transactions::<S>),
        )
        .route(
            "/transactions/:duration/:anchor/type/:type/limit/:limit",
            get(handler::transactions_by_type::<S>),
        )
        .route(
            "/transactions/:duration/:anchor/type/:type/filter/:filter/limit/:limit",
            get(handler::transactions_by_type_with_filter::<S>),
        )
        .route(
            "/transactions/unconfirmed/:duration/:anchor/limit/:limit",
            get(handler::unconfirmed_transactions::<S>),
        )
        .route(
            "/transactions/partial/:duration/:anchor/limit/:limit",
            get(handler::partial_transactions::<S>),
        )
        .route("/mosaics/:duration/:anchor/limit/:limit", get(handler::mosaics::<S>))
        .route(
            "/namespaces/:duration/:anchor/limit/:limit",
            get(handler::namespaces::<S>),
        )
        .route(
            "/accounts/importance/:duration/:anchor/limit/:limit",
            get(handler::accounts_importance::<S>),
        )
        .route(
            "/accounts/harvested/:which/:duration/:anchor/limit/:limit",
            get(handler::accounts_harvested::<S>),
        )
        .route(
            "/accounts/balance/:which/:duration/:anchor/limit/:limit",
            get(handler::accounts_balance::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
