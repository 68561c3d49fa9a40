//! Image classification: decides whether an `<img>` is a skill icon and which
//! category (skill tree) it belongs to.
//!
//! Matching is plain, case-sensitive substring containment on the `src`
//! attribute. Category rules are evaluated in configuration order and the first
//! matching token wins, so overlapping tokens resolve deterministically.

use crate::config::{CategoryRule, PageConfig, UNKNOWN_CATEGORY};
use crate::url_model::{filename_from_url_path, resolve_scheme};

/// Subtype markers; an icon `src` must contain at least one.
pub const SUBTYPE_TOKENS: [&str; 4] = ["Passive", "Active", "Augment", "Capstone"];

/// Attributes read from one `<img>` element. Missing `src`/`alt` read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAttrs {
    pub src: String,
    pub alt: String,
    pub title: Option<String>,
}

/// A matched skill icon, ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDescriptor {
    /// Absolute URL (protocol-relative sources resolved to `https:`).
    pub url: String,
    /// `title` if non-empty, else `alt`. May be empty.
    pub display_name: String,
    /// Category from the page's rules, or `"unknown"`.
    pub category: String,
    /// Last segment of the URL path; never empty.
    pub filename: String,
}

/// True if `src` carries the page's root token and at least one subtype token.
pub fn is_skill_icon(src: &str, root_token: &str) -> bool {
    src.contains(root_token) && SUBTYPE_TOKENS.iter().any(|t| src.contains(t))
}

/// Category of the first rule whose token occurs in `url`, else `"unknown"`.
pub fn categorize<'a>(url: &str, rules: &'a [CategoryRule]) -> &'a str {
    rules
        .iter()
        .find(|rule| url.contains(&rule.token))
        .map(|rule| rule.category.as_str())
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// Classifies one image for `page`. Returns `None` when it is not a skill icon
/// or its URL has no usable basename.
pub fn classify(page: &PageConfig, attrs: &ImageAttrs) -> Option<IconDescriptor> {
    if !is_skill_icon(&attrs.src, &page.root_token) {
        return None;
    }

    let url = resolve_scheme(&attrs.src);
    let Some(filename) = filename_from_url_path(&url) else {
        tracing::debug!(url = %url, "icon URL has no basename, skipping");
        return None;
    };

    let display_name = match attrs.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => attrs.alt.clone(),
    };

    Some(IconDescriptor {
        category: categorize(&url, &page.categories).to_string(),
        url,
        display_name,
        filename,
    })
}
