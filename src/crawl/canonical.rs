// src/crawl/canonical.rs
// =============================================================================
// This module turns URLs into stable dedup keys ("canonical URLs").
//
// Two links that point at the same page often look different:
//   https://site.test/contact/?utm_source=mail#form
//   https://site.test/contact
// The crawler must treat them as ONE page, otherwise it wastes its page
// budget fetching the same thing twice.
//
// Canonicalization steps:
// 1. Parse as an absolute URL
// 2. Drop the #fragment
// 3. Drop tracking parameters (utm_*, fbclid, gclid)
// 4. Sort the remaining query parameters by name
// 5. Strip all trailing slashes, never shortening the path below "/"
//
// Rust concepts:
// - Url: parsed URL with setters for each component
// - Stable sorting: sort_by keeps equal keys in their original order
// =============================================================================

use url::Url;

use crate::error::CrawlError;

// Query parameters that only exist for analytics and never change the page
const TRACKING_EXACT: [&str; 2] = ["fbclid", "gclid"];
const TRACKING_PREFIX: &str = "utm_";

// Canonicalizes a raw URL string
//
// Returns: the canonical URL as a String, or CrawlError::InvalidUrl if the
// input is not an absolute URL
//
// Example:
//   "https://a.com/x/?b=2&utm_source=y&a=1#frag" -> "https://a.com/x?a=1&b=2"
pub fn canonicalize(raw: &str) -> Result<String, CrawlError> {
    let url = Url::parse(raw.trim()).map_err(|_| CrawlError::InvalidUrl(raw.to_string()))?;
    Ok(canonicalize_url(url).to_string())
}

// Same as canonicalize(), but for an already-parsed Url
pub fn canonicalize_url(mut url: Url) -> Url {
    url.set_fragment(None);

    // Keep the non-tracking parameters, sorted by name
    // (sort_by is stable, so repeated names keep their original order)
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));

    if params.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(params);
    }

    // Opaque URLs like mailto: have no path segments to trim
    if !url.cannot_be_a_base() {
        let path = url.path();
        if path.len() > 1 && path.ends_with('/') {
            let trimmed = path.trim_end_matches('/');
            let trimmed = if trimmed.is_empty() { "/" } else { trimmed }.to_string();
            url.set_path(&trimmed);
        }
    }

    url
}

// Checks whether a query parameter name is tracking noise
fn is_tracking_param(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.starts_with(TRACKING_PREFIX) || TRACKING_EXACT.contains(&name.as_str())
}

// Resolves an href found on a page to an absolute URL
//
// Parameters:
//   base: the URL of the page the href was found on
//   href: the raw attribute value (might be relative, might be absolute)
//
// Returns: None for empty hrefs and javascript: pseudo-links.
// mailto: and tel: links resolve to themselves; the same-origin filter
// keeps them out of the crawl queue later.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }

    base.join(href).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_noise_collapses() {
        let noisy = canonicalize("https://a.com/x?b=2&utm_source=y&a=1#frag").unwrap();
        let clean = canonicalize("https://a.com/x/?a=1&b=2").unwrap();
        assert_eq!(noisy, clean);
        assert_eq!(clean, "https://a.com/x?a=1&b=2");
    }

    #[test]
    fn test_tracking_names_are_case_insensitive() {
        let url = canonicalize("https://a.com/?UTM_Medium=x&FBCLID=1&gclid=2&q=ok").unwrap();
        assert_eq!(url, "https://a.com/?q=ok");
    }

    #[test]
    fn test_all_params_removed_drops_question_mark() {
        let url = canonicalize("https://a.com/page?utm_campaign=spring").unwrap();
        assert_eq!(url, "https://a.com/page");
    }

    #[test]
    fn test_sort_is_stable_for_repeated_names() {
        let url = canonicalize("https://a.com/?b=1&a=z&a=y").unwrap();
        assert_eq!(url, "https://a.com/?a=z&a=y&b=1");
    }

    #[test]
    fn test_root_path_keeps_slash() {
        assert_eq!(canonicalize("https://a.com").unwrap(), "https://a.com/");
        assert_eq!(canonicalize("https://a.com/").unwrap(), "https://a.com/");
    }

    #[test]
    fn test_strips_every_trailing_slash() {
        assert_eq!(canonicalize("https://a.com/x//").unwrap(), "https://a.com/x");
        assert_eq!(canonicalize("https://a.com///").unwrap(), "https://a.com/");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://a.com/x//",
            "https://a.com/docs/?z=1&utm_x=2&a=%20b",
            "HTTPS://A.COM/Path/#top",
            "mailto:sales@a.com",
        ];
        for input in inputs {
            let once = canonicalize(input).unwrap();
            let twice = canonicalize(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {}", input);
        }
    }

    #[test]
    fn test_relative_url_is_invalid() {
        let err = canonicalize("/contact").unwrap_err();
        assert!(matches!(err, CrawlError::InvalidUrl(raw) if raw == "/contact"));
    }

    #[test]
    fn test_resolve_relative_href() {
        let base = Url::parse("https://a.com/about/team").unwrap();
        let url = resolve_href(&base, "../contact").unwrap();
        assert_eq!(url.as_str(), "https://a.com/contact");
    }

    #[test]
    fn test_resolve_skips_empty_and_javascript() {
        let base = Url::parse("https://a.com/").unwrap();
        assert!(resolve_href(&base, "   ").is_none());
        assert!(resolve_href(&base, "JavaScript:void(0)").is_none());
    }

    #[test]
    fn test_resolve_keeps_mailto() {
        let base = Url::parse("https://a.com/").unwrap();
        let url = resolve_href(&base, "mailto:hi@a.com").unwrap();
        assert_eq!(url.scheme(), "mailto");
    }
}
