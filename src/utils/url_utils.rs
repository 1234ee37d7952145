//! URL normalization for reference links.

use url::Url;

/// Normalize a reference link against the site origin.
///
/// - absolute `http(s)://` links pass through unchanged
/// - protocol-relative `//host/path` becomes `https://host/path`
/// - root-relative `/path` is resolved against `base_origin`
/// - anything else (relative paths, `javascript:`, empty) passes through
///
/// # Examples
/// ```
/// # use lemma_extract::utils::url_utils::normalize_reference_url;
/// let base = "https://baike.baidu.com";
/// assert_eq!(normalize_reference_url("//example.com/a", base), "https://example.com/a");
/// assert_eq!(normalize_reference_url("/reference/1", base), "https://baike.baidu.com/reference/1");
/// assert_eq!(normalize_reference_url("http://x.org", base), "http://x.org");
/// assert_eq!(normalize_reference_url("", base), "");
/// ```
#[must_use]
pub fn normalize_reference_url(href: &str, base_origin: &str) -> String {
    let href = href.trim();
    if href.is_empty() || href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    if href.starts_with("//") {
        return format!("https:{href}");
    }

    if href.starts_with('/') {
        // Url::join keeps the query and fragment intact and collapses `..`
        return match Url::parse(base_origin).and_then(|base| base.join(href)) {
            Ok(joined) => joined.to_string(),
            Err(e) => {
                log::debug!("Could not resolve {href} against {base_origin}: {e}");
                format!("{}{href}", base_origin.trim_end_matches('/'))
            }
        };
    }

    href.to_string()
}
