//! DTOs mirroring the content API's wire shapes. Field names follow the
//! remote contract (camelCase); the `$id`/`$values` envelope some endpoints
//! add is stripped in `fetch` before these types ever see the payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: String,
    pub name: String,
    /// Opaque back-reference the API includes; never read client-side.
    #[serde(default)]
    pub news_articles: Option<serde_json::Value>,
}

/// A listing-level article: enough to render a card, nothing more.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSummary {
    pub news_id: String,
    pub title: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A full article as served by the detail endpoints. Always fetched fresh so
/// the page reflects the latest edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetail {
    pub news_id: String,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    /// HTML fragment rendered as-is by the detail page.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub image_paths: Vec<String>,
    #[serde(default)]
    pub category_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    #[serde(default)]
    pub image_id: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub title: String,
}

/// An article as returned by the general listing and the add endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub news_id: String,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageItem>,
    #[serde(default)]
    pub category_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub news_id: String,
    pub title: String,
    pub image_url: String,
}

/// One image file attached to an article submission.
#[derive(Clone, Debug)]
pub struct NewsImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything the admin form collects for a new article. Keywords are
/// comma-joined and the date ISO-8601 formatted when the multipart body is
/// built.
#[derive(Clone, Debug)]
pub struct AddNewsRequest {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub published_date: DateTime<Utc>,
    pub category_id: String,
    pub images: Vec<NewsImageUpload>,
}
