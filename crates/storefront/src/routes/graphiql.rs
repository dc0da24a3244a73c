//! Dev-only GraphiQL route.
//!
//! Registered only when `SHOPIFY_DEV_GRAPHIQL` is exactly the string
//! `'true'`. The page posts queries to the sibling proxy handler, which
//! forwards them to the Storefront API with the private token and relays
//! the raw response envelope (including GraphQL errors) verbatim.

use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse},
};

use crate::error::Result;
use crate::state::AppState;

/// Serve the GraphiQL UI.
pub async fn page() -> impl IntoResponse {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Tidemark Storefront GraphiQL</title>
    <link rel="stylesheet" href="https://unpkg.com/graphiql/graphiql.min.css" />
</head>
<body style="margin: 0;">
    <div id="graphiql" style="height: 100vh;"></div>
    <script crossorigin src="https://unpkg.com/react/umd/react.production.min.js"></script>
    <script crossorigin src="https://unpkg.com/react-dom/umd/react-dom.production.min.js"></script>
    <script crossorigin src="https://unpkg.com/graphiql/graphiql.min.js"></script>
    <script>
        const fetcher = GraphiQL.createFetcher({ url: '/graphiql' });
        ReactDOM.render(
            React.createElement(GraphiQL, { fetcher }),
            document.getElementById('graphiql'),
        );
    </script>
</body>
</html>"#,
    )
}

/// Proxy a raw GraphQL request body to the Storefront API.
pub async fn proxy(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>> {
    let envelope = state.storefront().execute_raw(body).await?;
    Ok(Json(envelope))
}
