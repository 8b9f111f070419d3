//! Content type conversions: menus, metaobjects, policies, localization.

use crate::shopify::storefront::wire;
use crate::shopify::types::{
    Country, Menu, MenuItem, Metaobject, MetaobjectConnection, MetaobjectField, ShopPolicy,
};

use super::products::{convert_image, convert_page_info};

pub fn convert_menu(menu: wire::MenuPayload) -> Menu {
    Menu {
        id: menu.id,
        handle: menu.handle,
        title: menu.title,
        items: menu.items.into_iter().map(convert_menu_item).collect(),
    }
}

fn convert_menu_item(item: wire::MenuItemPayload) -> MenuItem {
    MenuItem {
        id: item.id,
        title: item.title,
        url: item.url,
        kind: item.kind,
        items: item.items.into_iter().map(convert_menu_item).collect(),
    }
}

pub fn convert_metaobject(metaobject: wire::MetaobjectPayload) -> Metaobject {
    Metaobject {
        id: metaobject.id,
        handle: metaobject.handle,
        kind: metaobject.kind,
        updated_at: metaobject.updated_at,
        fields: metaobject
            .fields
            .into_iter()
            .map(|f| MetaobjectField {
                key: f.key,
                value: f.value,
                reference_image: f.reference.and_then(|r| r.image).map(convert_image),
            })
            .collect(),
    }
}

pub fn convert_metaobject_connection(
    conn: wire::ConnectionPayload<wire::MetaobjectPayload>,
) -> MetaobjectConnection {
    MetaobjectConnection {
        metaobjects: conn.nodes.into_iter().map(convert_metaobject).collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

/// Flatten the shop's named policies into a list, dropping unset ones.
pub fn convert_policies(shop: wire::ShopPoliciesPayload) -> Vec<ShopPolicy> {
    [
        shop.privacy_policy,
        shop.refund_policy,
        shop.terms_of_service,
        shop.shipping_policy,
    ]
    .into_iter()
    .flatten()
    .map(|p| ShopPolicy {
        id: p.id,
        handle: p.handle,
        title: p.title,
        body: p.body,
    })
    .collect()
}

pub fn convert_country(c: wire::CountryPayload) -> Country {
    Country {
        iso_code: c.iso_code,
        name: c.name,
    }
}
