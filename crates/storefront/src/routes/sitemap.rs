//! Sitemap and robots route handlers.
//!
//! The sitemap walks the platform's product, collection, and marketing-page
//! connections to exhaustion at the maximum page size. Each page of the
//! walk goes through the read cache, so repeated crawler hits inside the
//! cache window cost one platform round-trip per page, not per hit.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::AppError;
use crate::routes::pages::MARKETING_SECTION_TYPE;
use crate::shopify::ShopifyError;
use crate::state::AppState;

/// Platform maximum page size for connection queries.
const SITEMAP_PAGE_SIZE: i64 = 250;

/// One `<url>` entry.
struct SitemapEntry {
    loc: String,
    lastmod: Option<String>,
}

/// Escape a string for XML text content.
fn xml_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url><loc>");
        xml.push_str(&xml_escape(&entry.loc));
        xml.push_str("</loc>");
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str("<lastmod>");
            xml.push_str(&xml_escape(lastmod));
            xml.push_str("</lastmod>");
        }
        xml.push_str("</url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

async fn product_entries(
    state: &AppState,
    base: &str,
) -> Result<Vec<SitemapEntry>, ShopifyError> {
    let mut entries = Vec::new();
    let mut after: Option<String> = None;
    loop {
        let connection = state
            .storefront()
            .get_products(SITEMAP_PAGE_SIZE, after, None, None, None)
            .await?;
        entries.extend(connection.products.iter().map(|product| SitemapEntry {
            loc: format!("{base}/products/{}", product.handle),
            lastmod: product.updated_at.clone(),
        }));
        if !connection.page_info.has_next_page {
            break;
        }
        let Some(cursor) = connection.page_info.end_cursor else {
            break;
        };
        after = Some(cursor);
    }
    Ok(entries)
}

async fn collection_entries(
    state: &AppState,
    base: &str,
) -> Result<Vec<SitemapEntry>, ShopifyError> {
    let mut entries = Vec::new();
    let mut after: Option<String> = None;
    loop {
        let connection = state
            .storefront()
            .get_collections(SITEMAP_PAGE_SIZE, after)
            .await?;
        entries.extend(connection.collections.iter().map(|collection| SitemapEntry {
            loc: format!("{base}/collections/{}", collection.handle),
            lastmod: collection.updated_at.clone(),
        }));
        if !connection.page_info.has_next_page {
            break;
        }
        let Some(cursor) = connection.page_info.end_cursor else {
            break;
        };
        after = Some(cursor);
    }
    Ok(entries)
}

async fn page_entries(state: &AppState, base: &str) -> Result<Vec<SitemapEntry>, ShopifyError> {
    let mut entries = Vec::new();
    let mut after: Option<String> = None;
    loop {
        let connection = state
            .storefront()
            .get_metaobjects(MARKETING_SECTION_TYPE, SITEMAP_PAGE_SIZE, after)
            .await?;
        entries.extend(connection.metaobjects.iter().map(|metaobject| SitemapEntry {
            loc: format!("{base}/pages/{}", metaobject.handle),
            lastmod: metaobject.updated_at.clone(),
        }));
        if !connection.page_info.has_next_page {
            break;
        }
        let Some(cursor) = connection.page_info.end_cursor else {
            break;
        };
        after = Some(cursor);
    }
    Ok(entries)
}

/// GET /sitemap.xml.
///
/// # Errors
///
/// Any failed page of any walk fails the whole sitemap; crawlers retry.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Result<Response, AppError> {
    let base_url = state.config().base_url.clone();
    let base = base_url.trim_end_matches('/');

    let mut entries = vec![SitemapEntry {
        loc: format!("{base}/"),
        lastmod: None,
    }];
    entries.extend(product_entries(&state, base).await?);
    entries.extend(collection_entries(&state, base).await?);
    entries.extend(page_entries(&state, base).await?);

    Ok((
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap(&entries),
    )
        .into_response())
}

/// GET /robots.txt.
#[instrument(skip(state))]
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    let base_url = state.config().base_url.clone();
    let base = base_url.trim_end_matches('/');
    format!("User-agent: *\nAllow: /\n\nSitemap: {base}/sitemap.xml\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn escapes_the_five_xml_entities() {
        assert_eq!(
            xml_escape("a&b<c>d\"e'f"),
            "a&amp;b&lt;c&gt;d&quot;e&apos;f"
        );
        assert_eq!(xml_escape("plain-handle"), "plain-handle");
    }

    #[test]
    fn sitemap_renders_namespace_and_lastmod() {
        let entries = vec![
            SitemapEntry {
                loc: "https://shop.example.com/".to_string(),
                lastmod: None,
            },
            SitemapEntry {
                loc: "https://shop.example.com/products/wool&co".to_string(),
                lastmod: Some("2026-01-10T09:00:00Z".to_string()),
            },
        ];

        let xml = render_sitemap(&entries);
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\""));
        assert!(xml.contains("<loc>https://shop.example.com/products/wool&amp;co</loc>"));
        assert!(xml.contains("<lastmod>2026-01-10T09:00:00Z</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }
}
