//! Route table

pub mod health;
pub mod products;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/products", get(products::index).post(products::store))
        .route(
            "/products/:id",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
