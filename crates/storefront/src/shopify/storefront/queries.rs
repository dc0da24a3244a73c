//! GraphQL query definitions for the Shopify Storefront API.
//!
//! The schema is not vendored in this tree, so these are hand-written rather
//! than generated: a fixed query document plus wire types in the module
//! layout `graphql_client` codegen would produce (`Variables` and
//! `ResponseData` per operation). Requests and responses still go through
//! the `graphql_client` envelope types.

use graphql_client::QueryBody;

/// Product listing query.
///
/// Fetches products in card shape (first variant only), scoped to a
/// localization pair via `@inContext`. Search syntax for `$query`:
/// `available_for_sale`, `created_at`, `product_type`, `tag`, `tag_not`,
/// `title`, `updated_at`, `variants.price`, `vendor`.
pub const PRODUCTS_QUERY: &str = r"
  fragment ProductCard on Product {
    id
    title
    publishedAt
    handle
    variants(first: 1) {
      nodes {
        id
        image {
          url
          altText
          width
          height
        }
        price: priceV2 {
          amount
          currencyCode
        }
        compareAtPrice: compareAtPriceV2 {
          amount
          currencyCode
        }
        product {
          title
          handle
        }
        selectedOptions {
          name
          value
        }
      }
    }
  }
  query Products(
    $query: String
    $count: Int
    $reverse: Boolean
    $country: CountryCode
    $language: LanguageCode
    $sortKey: ProductSortKeys
  ) @inContext(country: $country, language: $language) {
    products(first: $count, sortKey: $sortKey, reverse: $reverse, query: $query) {
      nodes {
        ...ProductCard
      }
    }
  }
";

/// Build the request body for the product listing query.
#[must_use]
pub const fn build_products_query(
    variables: get_products::Variables,
) -> QueryBody<get_products::Variables> {
    QueryBody {
        variables,
        query: PRODUCTS_QUERY,
        operation_name: "Products",
    }
}

/// Wire types for the product listing query.
pub mod get_products {
    use serde::{Deserialize, Serialize};

    use crate::localization::{CountryCode, LanguageCode};

    /// Variables for [`super::PRODUCTS_QUERY`].
    ///
    /// `sort_key` is relayed verbatim; an invalid key surfaces as a platform
    /// GraphQL error rather than being validated locally.
    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub country: CountryCode,
        pub count: i64,
        pub language: LanguageCode,
        pub query: String,
        pub reverse: Option<bool>,
        #[serde(rename = "sortKey")]
        pub sort_key: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        /// The API contract guarantees this envelope; `None` is an invariant
        /// violation, not an empty listing.
        pub products: Option<ProductConnection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductConnection {
        pub nodes: Vec<ProductsProductsNodes>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductsProductsNodes {
        pub id: String,
        pub title: String,
        pub published_at: String,
        pub handle: String,
        pub variants: VariantConnection,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantConnection {
        pub nodes: Vec<VariantFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantFields {
        pub id: String,
        pub image: Option<ImageFields>,
        pub price: MoneyFields,
        pub compare_at_price: Option<MoneyFields>,
        pub product: VariantFieldsProduct,
        pub selected_options: Vec<SelectedOptionFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ImageFields {
        pub url: String,
        pub alt_text: Option<String>,
        pub width: Option<i64>,
        pub height: Option<i64>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyFields {
        pub amount: String,
        pub currency_code: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantFieldsProduct {
        pub title: String,
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SelectedOptionFields {
        pub name: String,
        pub value: String,
    }
}
