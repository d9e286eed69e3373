use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::environment::ApiConfig;
use crate::error::ApiError;
use crate::fetch::{Fetcher, Payload};
use crate::images::resolve_image_src;
use crate::models::{AddNewsRequest, CarouselItem, Category, NewsDetail, NewsItem, NewsSummary};
use crate::TARGET_WEB_REQUEST;

/// How many general news items the carousel fallback reshapes.
const CAROUSEL_FALLBACK_COUNT: usize = 5;

/// Client for the remote content API.
///
/// Collection readers never fail: any error degrades to an empty list, logged
/// under the `web_request` target. Detail readers map a 404 to `None` and
/// propagate every other error so page handlers can distinguish not-found
/// from broken. Cacheable reads share one TTL cache keyed by full URL.
pub struct NewsApiClient {
    config: ApiConfig,
    fetcher: Fetcher,
    cache: ResponseCache,
}

impl NewsApiClient {
    pub fn new(config: ApiConfig) -> Self {
        let fetcher = Fetcher::new(
            config.request_timeout,
            config.max_attempts,
            config.retry_backoff,
        );
        let cache = ResponseCache::new(config.cache_ttl);
        Self {
            config,
            fetcher,
            cache,
        }
    }

    /// Builds a client around an externally constructed cache, so tests and
    /// embedders can share or isolate cache instances explicitly.
    pub fn with_cache(config: ApiConfig, cache: ResponseCache) -> Self {
        let fetcher = Fetcher::new(
            config.request_timeout,
            config.max_attempts,
            config.retry_backoff,
        );
        Self {
            config,
            fetcher,
            cache,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Resolves a possibly-relative media path against the configured origin.
    pub fn get_image_src(&self, path: &str) -> String {
        resolve_image_src(path, &self.config.origin, &self.config.cdn_host)
    }

    /// The cache/fetch composition every cacheable read goes through. A 404
    /// result is not cached; the next read asks the network again.
    async fn cached_get(&self, url: &str) -> Result<Option<Value>, ApiError> {
        if let Some(payload) = self.cache.get(url) {
            debug!(target: TARGET_WEB_REQUEST, "Cache hit for {}", url);
            return Ok(Some(payload));
        }
        let fetched = self.fetcher.get_json(url).await?;
        if let Some(payload) = &fetched {
            self.cache.put(url, payload.clone());
        }
        Ok(fetched)
    }

    async fn read_collection<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        let Some(payload) = self.cached_get(url).await? else {
            return Ok(Vec::new());
        };
        Payload::items(payload)?
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|err| ApiError::MalformedPayload(err.to_string()))
            })
            .collect()
    }

    /// Uncached read shared by the detail endpoints: 404 becomes `None`,
    /// everything else propagates.
    async fn read_detail(&self, url: &str) -> Result<Option<NewsDetail>, ApiError> {
        let Some(payload) = self.fetcher.get_json(url).await? else {
            return Ok(None);
        };
        let mut detail: NewsDetail = serde_json::from_value(payload)
            .map_err(|err| ApiError::MalformedPayload(err.to_string()))?;
        detail.image_paths = detail
            .image_paths
            .iter()
            .map(|path| self.get_image_src(path))
            .collect();
        Ok(Some(detail))
    }

    fn summaries_with_resolved_images(&self, mut summaries: Vec<NewsSummary>) -> Vec<NewsSummary> {
        for summary in &mut summaries {
            summary.image_path = self.get_image_src(&summary.image_path);
        }
        summaries
    }

    /// Lists all categories. Degrades to an empty list on any failure so the
    /// navigation renders (empty) instead of crashing the page.
    pub async fn get_categories(&self) -> Vec<Category> {
        let url = self.config.endpoint("/api/Categories");
        match self.read_collection(&url).await {
            Ok(categories) => categories,
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Failed to load categories: {}", err);
                Vec::new()
            }
        }
    }

    /// Lists one page of a category's articles, image paths resolved to
    /// absolute URLs. A blank category id never reaches the network.
    pub async fn get_news_by_category(
        &self,
        category_id: &str,
        page: u32,
        page_size: u32,
    ) -> Vec<NewsSummary> {
        if category_id.trim().is_empty() {
            warn!(target: TARGET_WEB_REQUEST, "Refusing news lookup for blank category id");
            return Vec::new();
        }
        let url = format!(
            "{}?page={}&pageSize={}",
            self.config
                .endpoint_segment("/api/News/category", category_id),
            page, page_size
        );
        match self.read_collection(&url).await {
            Ok(summaries) => self.summaries_with_resolved_images(summaries),
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Failed to load news for category {}: {}", category_id, err);
                Vec::new()
            }
        }
    }

    /// The general listing used by the admin list view and as the carousel's
    /// fallback source. Unwraps the `$values` envelope transparently.
    pub async fn get_news(&self) -> Vec<NewsItem> {
        let url = self.config.endpoint("/api/News");
        match self.read_collection(&url).await {
            Ok(items) => items,
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Failed to load news listing: {}", err);
                Vec::new()
            }
        }
    }

    /// Fetches one article, always fresh: detail pages must reflect the
    /// latest edit, so this read bypasses the cache. 404 yields `None`; any
    /// other failure propagates.
    pub async fn get_news_detail(&self, news_id: &str) -> Result<Option<NewsDetail>, ApiError> {
        let url = self.config.endpoint_segment("/api/news", news_id);
        self.read_detail(&url).await
    }

    pub async fn get_astrology_news(&self) -> Vec<NewsSummary> {
        let url = self.config.endpoint("/api/News/astroloji-news");
        match self.read_collection(&url).await {
            Ok(summaries) => self.summaries_with_resolved_images(summaries),
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Failed to load astrology news: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn get_astrology_news_detail(
        &self,
        news_id: &str,
    ) -> Result<Option<NewsDetail>, ApiError> {
        let url = self
            .config
            .endpoint_segment("/api/News/astroloji-news", news_id);
        self.read_detail(&url).await
    }

    pub async fn get_breaking_news(&self) -> Vec<NewsSummary> {
        let url = self.config.endpoint("/api/News/breaking-news");
        match self.read_collection(&url).await {
            Ok(summaries) => self.summaries_with_resolved_images(summaries),
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Failed to load breaking news: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn get_breaking_news_detail(
        &self,
        news_id: &str,
    ) -> Result<Option<NewsDetail>, ApiError> {
        let url = self
            .config
            .endpoint_segment("/api/News/breaking-news", news_id);
        self.read_detail(&url).await
    }

    /// Loads the homepage carousel. Primary path is the dedicated carousel
    /// endpoint; when it is unavailable or returns anything other than a
    /// non-empty array, the first items of the general listing are reshaped
    /// instead. Never fails: a dead carousel renders as an empty one.
    pub async fn get_carousel_news(&self) -> Vec<CarouselItem> {
        let url = self.config.endpoint("/api/News/carousel");
        match self.cached_get(&url).await {
            Ok(Some(payload)) => match Payload::items(payload) {
                Ok(items) if !items.is_empty() => {
                    return items
                        .iter()
                        .filter_map(|item| self.carousel_item(item))
                        .collect();
                }
                Ok(_) => {
                    debug!(target: TARGET_WEB_REQUEST, "Carousel endpoint returned no items");
                }
                Err(err) => {
                    warn!(target: TARGET_WEB_REQUEST, "Carousel payload unusable: {}", err);
                }
            },
            Ok(None) => {
                debug!(target: TARGET_WEB_REQUEST, "Carousel endpoint returned 404");
            }
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Carousel endpoint unavailable: {}", err);
            }
        }
        self.carousel_fallback().await
    }

    async fn carousel_fallback(&self) -> Vec<CarouselItem> {
        info!(target: TARGET_WEB_REQUEST, "Falling back to general news for the carousel");
        let url = self.config.endpoint("/api/News");
        let payload = match self.cached_get(&url).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Carousel fallback failed: {}", err);
                return Vec::new();
            }
        };
        match Payload::items(payload) {
            Ok(items) => items
                .iter()
                .take(CAROUSEL_FALLBACK_COUNT)
                .filter_map(|item| self.carousel_item(item))
                .collect(),
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Carousel fallback payload unusable: {}", err);
                Vec::new()
            }
        }
    }

    /// Reshapes one raw item into a carousel entry, taking whichever image
    /// field is present (`imageUrl`, `imagePath`, or the first of `images`).
    fn carousel_item(&self, item: &Value) -> Option<CarouselItem> {
        let news_id = item.get("newsId")?.as_str()?.to_string();
        let title = item
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let image = item
            .get("imageUrl")
            .and_then(Value::as_str)
            .or_else(|| item.get("imagePath").and_then(Value::as_str))
            .or_else(|| {
                item.get("images")
                    .and_then(Value::as_array)
                    .and_then(|images| images.first())
                    .and_then(|image| image.get("imagePath"))
                    .and_then(Value::as_str)
            })
            .unwrap_or_default();
        Some(CarouselItem {
            news_id,
            title,
            image_url: self.get_image_src(image),
        })
    }

    /// Submits a new article as a multipart form. The only mutating
    /// operation: no cache, no retry (a multipart body is not safely
    /// replayable), and a non-success status carries the response body text
    /// for diagnostics.
    pub async fn add_news(&self, request: AddNewsRequest) -> Result<NewsItem, ApiError> {
        let url = self.config.endpoint("/api/News");

        let mut form = Form::new()
            .text("title", request.title)
            .text("shortDescription", request.short_description)
            .text("content", request.content)
            .text("keywords", request.keywords.join(","))
            .text("publishedDate", request.published_date.to_rfc3339())
            .text("categoryId", request.category_id);
        for image in request.images {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part("images", part);
        }

        info!(target: TARGET_WEB_REQUEST, "POST {}", url);
        let send = self.fetcher.http_client().post(&url).multipart(form).send();
        let response = match timeout(self.fetcher.request_timeout(), send).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::Network(err.to_string())),
            Err(_) => {
                return Err(ApiError::Timeout(
                    self.fetcher.request_timeout().as_millis() as u64,
                ))
            }
        };

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|err| ApiError::MalformedPayload(err.to_string()))
    }
}
