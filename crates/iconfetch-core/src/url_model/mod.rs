//! URL modeling and filename derivation.
//!
//! Resolves protocol-relative image URLs and derives the local filename of an
//! icon from the last segment of its URL path.

mod path;

pub use path::filename_from_url_path;

/// Scheme prefixed to protocol-relative (`//host/path`) URLs.
const DEFAULT_SCHEME: &str = "https:";

/// Resolves a protocol-relative URL to an absolute `https:` URL.
///
/// Anything not starting with `//` is returned unchanged, so resolving twice
/// is the same as resolving once.
///
/// # Examples
///
/// - `resolve_scheme("//cdn.example.com/a.png")` → `"https://cdn.example.com/a.png"`
/// - `resolve_scheme("https://cdn.example.com/a.png")` → unchanged
pub fn resolve_scheme(url: &str) -> String {
    if url.starts_with("//") {
        format!("{}{}", DEFAULT_SCHEME, url)
    } else {
        url.to_string()
    }
}

/// URL as sent on the wire: scheme resolved, then spaces and non-ASCII
/// characters percent-encoded. Existing escapes are left alone. Input the
/// `url` crate cannot parse is passed through for curl to reject.
pub fn request_url(url: &str) -> String {
    let resolved = resolve_scheme(url);
    match url::Url::parse(&resolved) {
        Ok(parsed) => parsed.into(),
        Err(_) => resolved,
    }
}
