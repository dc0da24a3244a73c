//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (registered in main)
//!
//! # Products
//! GET  /api/products           - Product listing (JSON)
//! GET  /{lang}/api/products    - Product listing scoped to a locale segment
//!
//! # Dev only (SHOPIFY_DEV_GRAPHIQL=true)
//! GET  /graphiql               - GraphiQL UI
//! POST /graphiql               - GraphQL proxy to the Storefront API
//! ```

pub mod api;
pub mod graphiql;

use axum::{Router, routing::get};

use crate::config::StorefrontConfig;
use crate::state::AppState;

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/products", get(api::products::list))
}

/// Create all routes for the storefront.
pub fn routes(config: &StorefrontConfig) -> Router<AppState> {
    let router = Router::new()
        // JSON API
        .nest("/api", api_routes())
        // Locale-prefixed variant (e.g. /en-us/api/products)
        .route("/{lang}/api/products", get(api::products::list_localized));

    // GraphiQL must never be reachable in production; the route pair is not
    // registered at all unless the dev flag is set.
    if config.dev_graphiql {
        router.route(
            "/graphiql",
            get(graphiql::page).post(graphiql::proxy),
        )
    } else {
        router
    }
}
