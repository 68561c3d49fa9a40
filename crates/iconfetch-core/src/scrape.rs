//! Page scraper: one GET, parse HTML, classify every `<img>` in document order.

use crate::classify::{classify, IconDescriptor, ImageAttrs};
use crate::config::PageConfig;
use crate::http::{self, CurlOptions, FetchError};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use scraper::{ElementRef, Html};

/// Parses a full document with scripting disabled, so `<noscript>` content is
/// built into elements instead of being kept as raw text.
fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    html5ever::parse_document(Html::new_document(), opts).one(html)
}

/// Reads `src`, `alt` and `title` of every `<img>` in `html`, in document order,
/// including images inside `<noscript>`.
pub fn image_attrs(html: &str) -> Vec<ImageAttrs> {
    let document = parse_document(html);
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name().eq_ignore_ascii_case("img"))
        .map(|el| {
            let attr = |name: &str| el.value().attr(name);
            ImageAttrs {
                src: attr("src").unwrap_or_default().to_string(),
                alt: attr("alt").unwrap_or_default().to_string(),
                title: attr("title").map(str::to_string),
            }
        })
        .collect()
}

/// Extracts the skill icons of `page` from already-fetched markup.
pub fn extract_icons(html: &str, page: &PageConfig) -> Vec<IconDescriptor> {
    image_attrs(html)
        .iter()
        .filter_map(|attrs| classify(page, attrs))
        .collect()
}

/// Fetches `page.url` and extracts its icons. Fetch errors are returned.
pub fn try_scrape_page(
    page: &PageConfig,
    curl: &CurlOptions,
) -> Result<Vec<IconDescriptor>, FetchError> {
    let html = http::get_text(&page.url, curl)?;
    let icons = extract_icons(&html, page);
    tracing::info!(page = %page.name, url = %page.url, found = icons.len(), "scraped page");
    Ok(icons)
}

/// Like [`try_scrape_page`], but a fetch error is logged and yields an empty list.
pub fn scrape_page(page: &PageConfig, curl: &CurlOptions) -> Vec<IconDescriptor> {
    match try_scrape_page(page, curl) {
        Ok(icons) => icons,
        Err(e) => {
            tracing::warn!(page = %page.name, url = %page.url, "error extracting skill icons: {}", e);
            Vec::new()
        }
    }
}
