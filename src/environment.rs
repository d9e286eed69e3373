use std::env;
use std::time::Duration;

use url::Url;

const DEFAULT_ORIGIN: &str = "http://localhost:5142";
const DEFAULT_CDN_HOST: &str = "haberlerapi";
const DEFAULT_TIMEOUT_MS: u64 = 8_000;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_MAX_ATTEMPTS: usize = 3;
const DEFAULT_BACKOFF_MS: u64 = 500;

/// Retrieves an environment variable, falling back to a default when unset.
pub fn get_env_var_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

/// Retrieves an environment variable and parses it, falling back to a default
/// when unset or unparsable.
pub fn get_env_var_parsed<T: std::str::FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Runtime configuration for the content API client.
///
/// Every knob has a hard default so the client works with no environment at
/// all; the request timeout is a single value shared by every call site.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base origin of the content API, no trailing slash.
    pub origin: String,
    /// Host fragment recognized as an already-absolute media URL.
    pub cdn_host: String,
    /// Deadline for a single outbound request.
    pub request_timeout: Duration,
    /// How long a cached collection payload stays readable.
    pub cache_ttl: Duration,
    /// Total attempts per read, transport failures only.
    pub max_attempts: usize,
    /// Initial delay between attempts, doubled each retry.
    pub retry_backoff: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            cdn_host: DEFAULT_CDN_HOST.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
        }
    }
}

impl ApiConfig {
    /// Builds a configuration from environment variables, keeping defaults
    /// for anything unset. An unparsable `NEWS_API_ORIGIN` falls back to the
    /// default origin rather than failing startup.
    pub fn from_env() -> Self {
        let origin = get_env_var_or("NEWS_API_ORIGIN", DEFAULT_ORIGIN);
        let origin = match Url::parse(&origin) {
            Ok(url) => url.to_string().trim_end_matches('/').to_string(),
            Err(_) => DEFAULT_ORIGIN.to_string(),
        };

        Self {
            origin,
            cdn_host: get_env_var_or("NEWS_CDN_HOST", DEFAULT_CDN_HOST),
            request_timeout: Duration::from_millis(get_env_var_parsed(
                "NEWS_REQUEST_TIMEOUT_MS",
                DEFAULT_TIMEOUT_MS,
            )),
            cache_ttl: Duration::from_secs(get_env_var_parsed(
                "NEWS_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )),
            max_attempts: get_env_var_parsed("NEWS_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS).max(1),
            retry_backoff: Duration::from_millis(get_env_var_parsed(
                "NEWS_RETRY_BACKOFF_MS",
                DEFAULT_BACKOFF_MS,
            )),
        }
    }

    /// Joins a path onto the configured origin with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Joins a fixed path plus one caller-supplied trailing segment onto the
    /// origin, percent-encoding the segment so ids containing spaces, `?`,
    /// `#`, or `/` cannot truncate or reshape the URL.
    pub fn endpoint_segment(&self, path: &str, segment: &str) -> String {
        match Url::parse(&self.origin) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    for part in path.split('/').filter(|part| !part.is_empty()) {
                        segments.push(part);
                    }
                    segments.push(segment);
                }
                url.to_string()
            }
            // The origin is validated at construction; this arm is unreachable
            // in practice but keeps the reader total.
            Err(_) => self.endpoint(&format!("{}/{}", path.trim_matches('/'), segment)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint("/api/Categories"),
            "http://localhost:5142/api/Categories"
        );
        assert_eq!(
            config.endpoint("api/Categories"),
            "http://localhost:5142/api/Categories"
        );
    }

    #[test]
    fn test_endpoint_segment_percent_encodes() {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint_segment("/api/News/category", "spor haberleri"),
            "http://localhost:5142/api/News/category/spor%20haberleri"
        );
        assert_eq!(
            config.endpoint_segment("/api/news", "a?b#c"),
            "http://localhost:5142/api/news/a%3Fb%23c"
        );
        assert_eq!(
            config.endpoint_segment("/api/news", "a/b"),
            "http://localhost:5142/api/news/a%2Fb"
        );
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.request_timeout, Duration::from_millis(8_000));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.max_attempts, 3);
    }
}
