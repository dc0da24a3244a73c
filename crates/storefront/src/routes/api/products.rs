//! Product listing API route handler.
//!
//! Forwards query-string parameters to the fixed Storefront API product
//! query and relays the flattened result as JSON for UI components.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::localization::{Localization, get_localization_from_lang};
use crate::shopify::queries::get_products;
use crate::shopify::types::Product;
use crate::state::AppState;

/// Default sort key applied when `sortKey` is absent.
pub const DEFAULT_SORT_KEY: &str = "BEST_SELLING";

/// Default listing size applied when `count` is absent or malformed.
pub const DEFAULT_COUNT: i64 = 4;

/// Raw query-string parameters.
///
/// Everything is accepted as an optional string so that malformed values
/// coerce to defaults instead of failing extraction; this route never
/// rejects on parameter shape.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    #[serde(rename = "sortKey")]
    pub sort_key: Option<String>,
    pub query: Option<String>,
    pub reverse: Option<String>,
    pub count: Option<String>,
}

/// Coerced product listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListParams {
    /// Sort key, relayed verbatim to the platform.
    pub sort_key: String,
    /// Free-text filter in the platform's search syntax.
    pub query: String,
    /// Set iff the raw value was exactly the string `"true"`.
    pub reverse: Option<bool>,
    /// Listing size; the response never exceeds this.
    pub count: i64,
}

impl Default for ProductListParams {
    fn default() -> Self {
        Self {
            sort_key: DEFAULT_SORT_KEY.to_string(),
            query: String::new(),
            reverse: None,
            count: DEFAULT_COUNT,
        }
    }
}

impl From<ProductsQuery> for ProductListParams {
    fn from(raw: ProductsQuery) -> Self {
        Self {
            sort_key: raw
                .sort_key
                .unwrap_or_else(|| DEFAULT_SORT_KEY.to_string()),
            query: raw.query.unwrap_or_default(),
            // Only the exact string "true" sets the flag; absent and
            // malformed values are both left unset.
            reverse: (raw.reverse.as_deref() == Some("true")).then_some(true),
            count: raw
                .count
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_COUNT),
        }
    }
}

impl ProductListParams {
    /// Combine the coerced parameters with a localization pair into query
    /// variables.
    #[must_use]
    pub fn into_variables(self, localization: Localization) -> get_products::Variables {
        get_products::Variables {
            country: localization.country,
            count: self.count,
            language: localization.language,
            query: self.query,
            reverse: self.reverse,
            sort_key: self.sort_key,
        }
    }
}

/// JSON body returned by the listing route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// `GET /api/products` - product listing with the default localization.
pub async fn list(
    State(state): State<AppState>,
    Query(raw): Query<ProductsQuery>,
) -> Result<Json<ProductsResponse>> {
    fetch(state, None, raw).await
}

/// `GET /{lang}/api/products` - product listing scoped to a language path
/// segment such as `en-us`.
pub async fn list_localized(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(raw): Query<ProductsQuery>,
) -> Result<Json<ProductsResponse>> {
    fetch(state, Some(&lang), raw).await
}

async fn fetch(
    state: AppState,
    lang: Option<&str>,
    raw: ProductsQuery,
) -> Result<Json<ProductsResponse>> {
    let localization = get_localization_from_lang(lang);
    let params = ProductListParams::from(raw);

    let products = state
        .storefront()
        .get_products(params.into_variables(localization))
        .await?;

    Ok(Json(ProductsResponse { products }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_when_keys_absent() {
        let params = ProductListParams::from(ProductsQuery::default());

        assert_eq!(params.sort_key, "BEST_SELLING");
        assert_eq!(params.query, "");
        assert_eq!(params.reverse, None);
        assert_eq!(params.count, 4);
    }

    #[test]
    fn test_reverse_set_only_for_exact_true() {
        let reverse = |raw: &str| {
            ProductListParams::from(ProductsQuery {
                reverse: Some(raw.to_string()),
                ..ProductsQuery::default()
            })
            .reverse
        };

        assert_eq!(reverse("true"), Some(true));
        assert_eq!(reverse("TRUE"), None);
        assert_eq!(reverse("false"), None);
        assert_eq!(reverse("1"), None);
        assert_eq!(reverse("yes"), None);
    }

    #[test]
    fn test_count_parses_base_10() {
        let params = ProductListParams::from(ProductsQuery {
            count: Some("12".to_string()),
            ..ProductsQuery::default()
        });
        assert_eq!(params.count, 12);
    }

    #[test]
    fn test_malformed_count_falls_back_to_default() {
        for raw in ["abc", "", "4.5", "0x10", " 7"] {
            let params = ProductListParams::from(ProductsQuery {
                count: Some(raw.to_string()),
                ..ProductsQuery::default()
            });
            assert_eq!(params.count, DEFAULT_COUNT, "count={raw:?}");
        }
    }

    #[test]
    fn test_sort_key_relayed_verbatim() {
        // Sort keys are not validated locally; invalid values surface as
        // platform errors through the normal error path.
        let params = ProductListParams::from(ProductsQuery {
            sort_key: Some("NOT_A_SORT_KEY".to_string()),
            ..ProductsQuery::default()
        });
        assert_eq!(params.sort_key, "NOT_A_SORT_KEY");
    }

    #[test]
    fn test_into_variables_carries_localization() {
        let params = ProductListParams {
            sort_key: "TITLE".to_string(),
            query: "tag:sale".to_string(),
            reverse: Some(true),
            count: 2,
        };
        let variables =
            params.into_variables(get_localization_from_lang(Some("fr-ca")));

        assert_eq!(variables.country.as_str(), "CA");
        assert_eq!(variables.language.as_str(), "FR");
        assert_eq!(variables.count, 2);
        assert_eq!(variables.sort_key, "TITLE");
        assert_eq!(variables.query, "tag:sale");
        assert_eq!(variables.reverse, Some(true));
    }
}
