//! Marketing page and shop policy route handlers.
//!
//! Marketing pages are driven by `marketing_section` metaobjects managed in
//! the platform admin; policies come from the shop's configured policy
//! documents. Both 404 when the handle is unknown.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::config::AnalyticsConfig;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::shopify::types::Metaobject;
use crate::state::AppState;

use super::products::ImageView;

/// Metaobject definition type for marketing sections.
pub const MARKETING_SECTION_TYPE: &str = "marketing_section";

/// How a marketing section lays out its content.
///
/// Unknown values from the CMS fall back to [`SectionLayout::Text`] so a
/// typo in the admin never breaks the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionLayout {
    #[default]
    Text,
    ImageLeft,
    ImageRight,
    Banner,
}

impl SectionLayout {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("image-left") => Self::ImageLeft,
            Some("image-right") => Self::ImageRight,
            Some("banner") => Self::Banner,
            _ => Self::Text,
        }
    }

    /// CSS class suffix for templates.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::ImageLeft => "image-left",
            Self::ImageRight => "image-right",
            Self::Banner => "banner",
        }
    }
}

/// Marketing section display data.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub image: Option<ImageView>,
    pub layout: SectionLayout,
}

impl From<&Metaobject> for SectionView {
    fn from(metaobject: &Metaobject) -> Self {
        Self {
            heading: metaobject.field("heading").map(str::to_string),
            body: metaobject.field("body").map(str::to_string),
            cta_label: metaobject.field("cta_label").map(str::to_string),
            cta_url: metaobject.field("cta_url").map(str::to_string),
            image: metaobject.image("image").map(ImageView::from),
            layout: SectionLayout::parse(metaobject.field("layout")),
        }
    }
}

/// Marketing page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct MarketingPageTemplate {
    pub title: String,
    pub section: SectionView,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// Shop policy page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/policy.html")]
pub struct PolicyTemplate {
    pub title: String,
    pub body_html: String,
    pub analytics: AnalyticsConfig,
    pub nonce: String,
}

/// GET /pages/{handle} metaobject-driven marketing page.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    nonce: CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let metaobject = state
        .storefront()
        .get_metaobject_by_handle(MARKETING_SECTION_TYPE, &handle)
        .await?;

    let section = SectionView::from(&metaobject);
    Ok(MarketingPageTemplate {
        title: section.heading.clone().unwrap_or_else(|| handle.clone()),
        section,
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    })
}

/// GET /policies/{handle} shop policy page.
#[instrument(skip(state, nonce))]
pub async fn policy(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    nonce: CspNonce,
) -> Result<impl IntoResponse, AppError> {
    let policies = state.storefront().get_shop_policies().await?;
    let policy = policies
        .into_iter()
        .find(|p| p.handle == handle)
        .ok_or_else(|| AppError::NotFound(format!("policy {handle}")))?;

    Ok(PolicyTemplate {
        title: policy.title,
        body_html: policy.body,
        analytics: state.config().analytics.clone(),
        nonce: nonce.0,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::shopify::types::{Image, MetaobjectField};

    fn field(key: &str, value: &str) -> MetaobjectField {
        MetaobjectField {
            key: key.to_string(),
            value: Some(value.to_string()),
            reference_image: None,
        }
    }

    fn section_metaobject(layout: &str) -> Metaobject {
        Metaobject {
            id: "gid://shopify/Metaobject/1".to_string(),
            handle: "spring-drop".to_string(),
            kind: MARKETING_SECTION_TYPE.to_string(),
            updated_at: None,
            fields: vec![
                field("heading", "The Spring Drop"),
                field("body", "<p>New colors, same wool.</p>"),
                field("cta_label", "Shop now"),
                field("cta_url", "/collections/spring"),
                field("layout", layout),
                MetaobjectField {
                    key: "image".to_string(),
                    value: None,
                    reference_image: Some(Image {
                        id: None,
                        url: "https://cdn.example.com/spring.jpg".to_string(),
                        alt_text: Some("Spring".to_string()),
                        width: None,
                        height: None,
                    }),
                },
            ],
        }
    }

    #[test]
    fn section_view_reads_all_fields() {
        let view = SectionView::from(&section_metaobject("image-left"));
        assert_eq!(view.heading.as_deref(), Some("The Spring Drop"));
        assert_eq!(view.cta_url.as_deref(), Some("/collections/spring"));
        assert_eq!(view.layout, SectionLayout::ImageLeft);
        assert_eq!(
            view.image.as_ref().map(|i| i.url.as_str()),
            Some("https://cdn.example.com/spring.jpg")
        );
    }

    #[test]
    fn unknown_layout_falls_back_to_text() {
        let view = SectionView::from(&section_metaobject("diagonal-spin"));
        assert_eq!(view.layout, SectionLayout::Text);
    }

    #[test]
    fn missing_layout_field_falls_back_to_text() {
        let mut metaobject = section_metaobject("banner");
        metaobject.fields.retain(|f| f.key != "layout");
        let view = SectionView::from(&metaobject);
        assert_eq!(view.layout, SectionLayout::Text);
    }
}
