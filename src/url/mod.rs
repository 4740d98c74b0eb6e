//! URL helpers for domain extraction and same-site matching

use url::Url;

/// Extracts the domain from a URL
///
/// Returns the host portion of the URL, lowercased. `None` if the URL has no
/// host, which should not happen for valid HTTP(S) URLs.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkrake::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a host belongs to the crawled site
///
/// A candidate matches when it equals the site host exactly or is one of its
/// subdomains. Hosts are expected to be lowercase already (see
/// [`extract_domain`]).
///
/// # Examples
///
/// ```
/// use linkrake::url::same_site;
///
/// assert!(same_site("example.com", "example.com"));
/// assert!(same_site("example.com", "shop.example.com"));
/// assert!(!same_site("example.com", "example.org"));
/// ```
pub fn same_site(site_host: &str, candidate: &str) -> bool {
    candidate == site_host || candidate.ends_with(&format!(".{}", site_host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_uppercase_converted_to_lowercase() {
        let url = Url::parse("https://EXAMPLE.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_site_exact_match() {
        assert!(same_site("example.com", "example.com"));
        assert!(same_site("127.0.0.1", "127.0.0.1"));
    }

    #[test]
    fn test_same_site_subdomain() {
        assert!(same_site("example.com", "www.example.com"));
        assert!(same_site("example.com", "api.v2.example.com"));
    }

    #[test]
    fn test_same_site_no_match() {
        assert!(!same_site("example.com", "example.org"));
        assert!(!same_site("example.com", "notexample.com"));
        assert!(!same_site("blog.example.com", "example.com"));
    }

    #[test]
    fn test_same_site_no_partial_match() {
        assert!(!same_site("example.com", "myexample.com"));
        assert!(!same_site("example.com", "example.com.evil.org"));
    }
}
