use crate::UrlError;
use url::Url;

/// A frontier URL split into its fetchable form and its anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUrl {
    /// The URL with the fragment removed; this is the visited-set key
    pub page: Url,

    /// The `#identifier` suffix, if present and non-empty
    pub fragment: Option<String>,
}

/// Parses a raw frontier string and separates the fragment from the page URL
///
/// Only absolute `http` and `https` URLs are accepted.
///
/// # Examples
///
/// ```
/// use docsweep::url::split_fragment;
///
/// let split = split_fragment("https://docs.example/guide#install").unwrap();
/// assert_eq!(split.page.as_str(), "https://docs.example/guide");
/// assert_eq!(split.fragment.as_deref(), Some("install"));
/// ```
pub fn split_fragment(raw: &str) -> Result<SplitUrl, UrlError> {
    let mut page = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if page.scheme() != "http" && page.scheme() != "https" {
        return Err(UrlError::InvalidScheme(page.scheme().to_string()));
    }
    if page.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    // Taken from the raw text so the identifier is not percent-encoded
    let fragment = raw
        .trim()
        .split_once('#')
        .map(|(_, f)| f)
        .filter(|f| !f.is_empty())
        .map(|f| f.to_string());
    page.set_fragment(None);

    Ok(SplitUrl { page, fragment })
}

/// Returns a copy of the URL without its fragment
pub fn strip_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}
