//! Domain types for the Shopify Storefront API.
//!
//! These types provide a clean API separate from the raw wire types in
//! `storefront::queries`. They serialize with the platform's field naming
//! (camelCase) because the product route relays them to UI consumers as-is.

use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

// =============================================================================
// Image Types
// =============================================================================

/// Product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// Product Types
// =============================================================================

/// A selected option on a variant (e.g., Size: M).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// Title and handle of the product a variant belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantProduct {
    pub title: String,
    pub handle: String,
}

/// A product variant in card shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Shopify variant GID.
    pub id: String,
    /// Variant image, if any.
    pub image: Option<Image>,
    /// Current price.
    pub price: Money,
    /// Pre-discount price, if the variant is on sale.
    pub compare_at_price: Option<Money>,
    /// Parent product title/handle for card links.
    pub product: VariantProduct,
    /// Selected option name/value pairs.
    pub selected_options: Vec<SelectedOption>,
}

/// A product in card shape, as relayed by the product listing route.
///
/// Owned and defined entirely by the catalog platform; this service never
/// mutates it, only relays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Shopify product GID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// ISO 8601 publish timestamp (platform scalar, relayed as string).
    pub published_at: String,
    /// URL slug.
    pub handle: String,
    /// Variants, flattened from the platform connection. The listing query
    /// requests only the first variant.
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// The variant shown on product cards.
    #[must_use]
    pub fn first_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_with_platform_field_names() {
        let product = Product {
            id: "gid://shopify/Product/1".to_string(),
            title: "Sea Glass Tumbler".to_string(),
            published_at: "2023-01-10T00:00:00Z".to_string(),
            handle: "sea-glass-tumbler".to_string(),
            variants: vec![ProductVariant {
                id: "gid://shopify/ProductVariant/11".to_string(),
                image: None,
                price: Money {
                    amount: "24.00".to_string(),
                    currency_code: "USD".to_string(),
                },
                compare_at_price: None,
                product: VariantProduct {
                    title: "Sea Glass Tumbler".to_string(),
                    handle: "sea-glass-tumbler".to_string(),
                },
                selected_options: vec![],
            }],
        };

        let json = serde_json::to_value(&product).expect("serializable");
        assert_eq!(json["publishedAt"], "2023-01-10T00:00:00Z");
        assert_eq!(json["variants"][0]["price"]["currencyCode"], "USD");
        assert!(json["variants"][0]["compareAtPrice"].is_null());
    }

    #[test]
    fn test_first_variant() {
        let product = Product {
            id: "gid://shopify/Product/2".to_string(),
            title: "Driftwood Tray".to_string(),
            published_at: "2023-02-01T00:00:00Z".to_string(),
            handle: "driftwood-tray".to_string(),
            variants: vec![],
        };
        assert!(product.first_variant().is_none());
    }
}
