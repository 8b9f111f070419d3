//! Collection type conversion functions.

use crate::shopify::storefront::wire;
use crate::shopify::types::{Collection, CollectionConnection, PageInfo, ProductConnection};

use super::products::{convert_image, convert_page_info, convert_product};

pub fn convert_collection(collection: wire::CollectionPayload) -> Collection {
    Collection {
        id: collection.id,
        handle: collection.handle,
        title: collection.title,
        description: collection.description,
        description_html: collection.description_html,
        updated_at: collection.updated_at,
        image: collection.image.map(convert_image),
        products: collection
            .products
            .map_or_else(empty_product_connection, |conn| ProductConnection {
                products: conn.nodes.into_iter().map(convert_product).collect(),
                page_info: convert_page_info(conn.page_info),
            }),
    }
}

pub fn convert_collection_connection(
    conn: wire::ConnectionPayload<wire::CollectionPayload>,
) -> CollectionConnection {
    CollectionConnection {
        collections: conn.nodes.into_iter().map(convert_collection).collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

/// Collection-card selections omit products entirely.
fn empty_product_connection() -> ProductConnection {
    ProductConnection {
        products: Vec::new(),
        page_info: PageInfo {
            has_next_page: false,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: None,
        },
    }
}
