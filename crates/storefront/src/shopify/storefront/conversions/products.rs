//! Product type conversion functions.

use crate::shopify::storefront::wire;
use crate::shopify::types::{
    Image, PageInfo, PriceRange, Product, ProductConnection, ProductOption, ProductVariant,
    SelectedOption,
};

pub fn convert_image(i: wire::ImagePayload) -> Image {
    Image {
        id: i.id,
        url: i.url,
        alt_text: i.alt_text,
        width: i.width,
        height: i.height,
    }
}

pub(super) fn convert_page_info(p: wire::PageInfoPayload) -> PageInfo {
    PageInfo {
        has_next_page: p.has_next_page,
        has_previous_page: p.has_previous_page,
        start_cursor: p.start_cursor,
        end_cursor: p.end_cursor,
    }
}

pub(super) fn convert_selected_option(o: wire::SelectedOptionPayload) -> SelectedOption {
    SelectedOption {
        name: o.name,
        value: o.value,
    }
}

fn convert_price_range(r: wire::PriceRangePayload) -> PriceRange {
    PriceRange {
        min_variant_price: r.min_variant_price,
        max_variant_price: r.max_variant_price,
    }
}

fn convert_option(o: wire::ProductOptionPayload) -> ProductOption {
    ProductOption {
        id: o.id,
        name: o.name,
        values: o.option_values.into_iter().map(|v| v.name).collect(),
    }
}

fn convert_variant(v: wire::VariantPayload) -> ProductVariant {
    ProductVariant {
        id: v.id,
        title: v.title,
        available_for_sale: v.available_for_sale,
        sku: v.sku,
        price: v.price,
        compare_at_price: v.compare_at_price,
        selected_options: v
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
        image: v.image.map(convert_image),
    }
}

pub fn convert_product(product: wire::ProductPayload) -> Product {
    Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        description: product.description,
        description_html: product.description_html,
        available_for_sale: product.available_for_sale,
        vendor: product.vendor,
        tags: product.tags,
        updated_at: product.updated_at,
        price_range: convert_price_range(product.price_range),
        compare_at_price_range: product.compare_at_price_range.map(convert_price_range),
        featured_image: product.featured_image.map(convert_image),
        images: product.images.nodes.into_iter().map(convert_image).collect(),
        options: product.options.into_iter().map(convert_option).collect(),
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(convert_variant)
            .collect(),
    }
}

pub fn convert_product_connection(
    conn: wire::ConnectionPayload<wire::ProductPayload>,
) -> ProductConnection {
    ProductConnection {
        products: conn.nodes.into_iter().map(convert_product).collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

#[cfg(test)]
mod tests {
    use driftline_core::Money;

    use super::*;

    #[test]
    fn card_payload_converts_with_empty_detail_fields() {
        let json = serde_json::json!({
            "id": "gid://shopify/Product/1",
            "handle": "sea-salt-licorice",
            "title": "Sea Salt Licorice",
            "availableForSale": true,
            "vendor": "Driftline",
            "priceRange": {
                "minVariantPrice": { "amount": "89.00", "currencyCode": "SEK" },
                "maxVariantPrice": { "amount": "249.00", "currencyCode": "SEK" }
            },
            "compareAtPriceRange": {
                "minVariantPrice": { "amount": "0.0", "currencyCode": "SEK" },
                "maxVariantPrice": { "amount": "0.0", "currencyCode": "SEK" }
            },
            "featuredImage": { "url": "https://cdn.example.com/p/1.jpg" }
        });

        let payload: wire::ProductPayload = serde_json::from_value(json).unwrap();
        let product = convert_product(payload);

        assert_eq!(product.handle, "sea-salt-licorice");
        assert!(product.available_for_sale);
        assert_eq!(product.price_range.min_variant_price.display(), "SEK 89.00");
        assert!(product.description.is_empty());
        assert!(product.variants.is_empty());
        assert!(product.images.is_empty());
    }

    #[test]
    fn full_payload_converts_options_and_variants() {
        let json = serde_json::json!({
            "id": "gid://shopify/Product/2",
            "handle": "classic-pack",
            "title": "Classic Pack",
            "description": "The one that started it all.",
            "descriptionHtml": "<p>The one that started it all.</p>",
            "availableForSale": true,
            "vendor": "Driftline",
            "tags": ["bestseller"],
            "updatedAt": "2026-05-01T12:00:00Z",
            "priceRange": {
                "minVariantPrice": { "amount": "89.00", "currencyCode": "SEK" },
                "maxVariantPrice": { "amount": "89.00", "currencyCode": "SEK" }
            },
            "images": { "nodes": [{ "url": "https://cdn.example.com/p/2.jpg" }] },
            "options": [
                { "id": "gid://shopify/ProductOption/1", "name": "Size",
                  "optionValues": [{ "name": "Single" }, { "name": "Three-pack" }] }
            ],
            "variants": { "nodes": [{
                "id": "gid://shopify/ProductVariant/10",
                "title": "Single",
                "availableForSale": true,
                "sku": "DL-CP-1",
                "price": { "amount": "89.00", "currencyCode": "SEK" },
                "compareAtPrice": { "amount": "99.00", "currencyCode": "SEK" },
                "selectedOptions": [{ "name": "Size", "value": "Single" }]
            }] }
        });

        let payload: wire::ProductPayload = serde_json::from_value(json).unwrap();
        let product = convert_product(payload);

        assert_eq!(product.options.len(), 1);
        assert_eq!(product.options[0].values, vec!["Single", "Three-pack"]);
        assert_eq!(product.variants.len(), 1);
        let variant = &product.variants[0];
        assert_eq!(variant.sku.as_deref(), Some("DL-CP-1"));
        assert_eq!(
            variant.compare_at_price.as_ref().map(Money::display),
            Some("SEK 99.00".to_string())
        );
        assert_eq!(variant.selected_options[0].value, "Single");
    }
}
