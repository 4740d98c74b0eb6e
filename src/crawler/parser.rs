//! Pure document functions: link extraction and next-page detection
//!
//! These take an HTML body and a base URL and return data; no I/O happens
//! here. The collector decides what to do with the output.

use scraper::{Html, Selector};
use url::Url;

/// Extracts every followable link from an HTML page as an absolute URL
///
/// **Include:** `<a href="...">` anywhere in the document.
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - `<a href="..." download>`
/// - Anything that is not http(s) after resolution
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Finds the "next page" link of a paginated catalog
///
/// The pagination marker is a fixed selector convention: the first
/// `<a class="next" href="...">` anchor on the page. Returns the resolved
/// absolute URL, or `None` when the page has no next link (the normal end of
/// a pagination chain).
pub fn find_next_page(html: &str, base_url: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    let next_selector = Selector::parse("a.next").ok()?;

    document
        .select(&next_selector)
        .find_map(|element| element.value().attr("href"))
        .and_then(|href| resolve_link(href, base_url))
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    // Try to resolve the URL
    match base_url.join(href) {
        Ok(absolute_url) => {
            // Only accept HTTP and HTTPS URLs
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
