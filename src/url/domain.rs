use url::Url;

/// Extracts the host from a URL
///
/// The host is returned lowercase and without the port, which is the form the
/// same-domain check compares.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docsweep::url::extract_host;
///
/// let url = Url::parse("https://Docs.Example.COM:8443/path").unwrap();
/// assert_eq!(extract_host(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the `scheme://host[:port]` key used to cache per-origin data such as robots.txt
pub fn origin_key(url: &Url) -> Option<String> {
    let host = extract_host(url)?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        let url = Url::parse("https://docs.example/").unwrap();
        assert_eq!(extract_host(&url), Some("docs.example".to_string()));
    }

    #[test]
    fn test_extract_ignores_port() {
        let url = Url::parse("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(extract_host(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_extract_lowercases() {
        let url = Url::parse("https://DOCS.Example/").unwrap();
        assert_eq!(extract_host(&url), Some("docs.example".to_string()));
    }

    #[test]
    fn test_origin_key_keeps_port() {
        let url = Url::parse("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(origin_key(&url), Some("http://127.0.0.1:8080".to_string()));

        let url = Url::parse("https://docs.example/api").unwrap();
        assert_eq!(origin_key(&url), Some("https://docs.example".to_string()));
    }

    #[test]
    fn test_origin_key_distinguishes_scheme() {
        let http = Url::parse("http://docs.example/a").unwrap();
        let https = Url::parse("https://docs.example/a").unwrap();
        assert_ne!(origin_key(&http), origin_key(&https));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("data:text/plain,hello").unwrap();
        assert_eq!(extract_host(&url), None);
        assert_eq!(origin_key(&url), None);
    }
}
