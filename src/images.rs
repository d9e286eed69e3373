/// Served by the front end when an article has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.svg";

/// Resolves a possibly-relative media path to an absolute URL.
///
/// Rules, in order: empty input maps to the placeholder; anything already
/// absolute (http(s) scheme or containing the CDN host fragment) passes
/// through unchanged; everything else is prefixed with `origin`, with
/// exactly one separating slash. Idempotent for absolute inputs.
pub fn resolve_image_src(path: &str, origin: &str, cdn_host: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }

    if path.starts_with("http://") || path.starts_with("https://") || path.contains(cdn_host) {
        return path.to_string();
    }

    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:5142";
    const CDN: &str = "haberlerapi";

    #[test]
    fn test_empty_input_yields_placeholder() {
        assert_eq!(resolve_image_src("", ORIGIN, CDN), PLACEHOLDER_IMAGE);
        assert_eq!(resolve_image_src("   ", ORIGIN, CDN), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_relative_path_gets_origin_prefix() {
        assert_eq!(
            resolve_image_src("/foo.jpg", ORIGIN, CDN),
            "http://localhost:5142/foo.jpg"
        );
        assert_eq!(
            resolve_image_src("uploads/foo.jpg", ORIGIN, CDN),
            "http://localhost:5142/uploads/foo.jpg"
        );
    }

    #[test]
    fn test_exactly_one_separating_slash() {
        assert_eq!(
            resolve_image_src("/foo.jpg", "http://localhost:5142/", CDN),
            "http://localhost:5142/foo.jpg"
        );
    }

    #[test]
    fn test_absolute_input_unchanged() {
        let absolute = "https://example.com/foo.jpg";
        assert_eq!(resolve_image_src(absolute, ORIGIN, CDN), absolute);
    }

    #[test]
    fn test_cdn_host_fragment_unchanged() {
        let cdn_path = "cdn.haberlerapi.example/media/foo.jpg";
        assert_eq!(resolve_image_src(cdn_path, ORIGIN, CDN), cdn_path);
    }

    #[test]
    fn test_idempotent_for_absolute_inputs() {
        let once = resolve_image_src("/foo.jpg", ORIGIN, CDN);
        let twice = resolve_image_src(&once, ORIGIN, CDN);
        assert_eq!(once, twice);
    }
}
