//! Conversions from wire types to domain types.
//!
//! Flattens the platform's paginated connections (products and the nested
//! first-variant connection) into plain ordered sequences, preserving the
//! platform-provided order.

use crate::shopify::types::{Image, Money, Product, ProductVariant, SelectedOption, VariantProduct};

use super::queries::get_products;

/// Flatten a product connection into an ordered product list.
pub fn convert_product_connection(conn: get_products::ProductConnection) -> Vec<Product> {
    conn.nodes.into_iter().map(convert_product).collect()
}

fn convert_product(product: get_products::ProductsProductsNodes) -> Product {
    Product {
        id: product.id,
        title: product.title,
        published_at: product.published_at,
        handle: product.handle,
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(convert_variant)
            .collect(),
    }
}

fn convert_variant(v: get_products::VariantFields) -> ProductVariant {
    ProductVariant {
        id: v.id,
        image: v.image.map(convert_image),
        price: convert_money(v.price),
        compare_at_price: v.compare_at_price.map(convert_money),
        product: VariantProduct {
            title: v.product.title,
            handle: v.product.handle,
        },
        selected_options: v
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
    }
}

fn convert_image(i: get_products::ImageFields) -> Image {
    Image {
        url: i.url,
        alt_text: i.alt_text,
        width: i.width,
        height: i.height,
    }
}

fn convert_money(m: get_products::MoneyFields) -> Money {
    Money {
        amount: m.amount,
        currency_code: m.currency_code,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn connection(handles: &[&str]) -> get_products::ProductConnection {
        let nodes = handles
            .iter()
            .enumerate()
            .map(|(i, handle)| {
                serde_json::json!({
                    "id": format!("gid://shopify/Product/{i}"),
                    "title": handle.replace('-', " "),
                    "publishedAt": "2023-03-01T00:00:00Z",
                    "handle": handle,
                    "variants": {
                        "nodes": [{
                            "id": format!("gid://shopify/ProductVariant/{i}"),
                            "image": null,
                            "price": {"amount": "12.00", "currencyCode": "USD"},
                            "compareAtPrice": {"amount": "16.00", "currencyCode": "USD"},
                            "product": {"title": handle.replace('-', " "), "handle": handle},
                            "selectedOptions": []
                        }]
                    }
                })
            })
            .collect::<Vec<_>>();

        serde_json::from_value(serde_json::json!({ "nodes": nodes })).unwrap()
    }

    #[test]
    fn test_flatten_preserves_platform_order() {
        let products =
            convert_product_connection(connection(&["kelp-candle", "anchor-mug", "buoy-lamp"]));

        let handles: Vec<&str> = products.iter().map(|p| p.handle.as_str()).collect();
        assert_eq!(handles, vec!["kelp-candle", "anchor-mug", "buoy-lamp"]);
    }

    #[test]
    fn test_flatten_nested_variant_connection() {
        let products = convert_product_connection(connection(&["kelp-candle"]));

        let variant = products[0].first_variant().unwrap();
        assert_eq!(variant.price.amount, "12.00");
        assert_eq!(
            variant.compare_at_price.as_ref().unwrap().amount,
            "16.00"
        );
        assert_eq!(variant.product.handle, "kelp-candle");
    }

    #[test]
    fn test_empty_connection_flattens_to_empty_list() {
        let products = convert_product_connection(connection(&[]));
        assert!(products.is_empty());
    }
}
