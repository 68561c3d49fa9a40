//! Filename extraction from URL path.

/// Extracts the last path segment from a URL for use as a local filename.
///
/// Works on the raw text so the name on disk matches the `src` attribute
/// byte for byte: percent-encoding, spaces and non-ASCII characters are kept
/// as-is. Query and fragment are ignored. Returns `None` if the path is
/// empty, ends in `/`, or is `.`/`..`.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let path = raw_path(url);
    // A trailing slash means a directory, not a file.
    if path.ends_with('/') {
        return None;
    }
    let segment = path.rsplit('/').next().filter(|s| !s.is_empty())?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Path component of `url`: query and fragment cut, `scheme://authority` or
/// `//authority` skipped. Site-relative and bare paths are returned whole.
fn raw_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];

    let after_authority = match url.find("://") {
        Some(i) if is_scheme(&url[..i]) => &url[i + 3..],
        _ => match url.strip_prefix("//") {
            Some(rest) => rest,
            None => return url,
        },
    };
    match after_authority.find('/') {
        Some(i) => &after_authority[i..],
        None => "",
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
