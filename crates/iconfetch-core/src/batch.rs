//! Batch orchestration for one page: scrape, create category directories,
//! download every icon, and tally icons per summary category.
//!
//! Failures never stop the batch. Every item ends up in the [`BatchReport`]
//! with its outcome; console output is left to the caller via [`BatchEvent`].

use crate::classify::IconDescriptor;
use crate::config::PageConfig;
use crate::download::{download_image, DownloadOutcome};
use crate::http::CurlOptions;
use crate::text::title_case;
use crate::scrape::try_scrape_page;
use std::fs;
use std::path::{Path, PathBuf};

/// Progress notifications emitted while a page is processed.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// Page fetch failed; nothing will be downloaded.
    PageFailed { reason: &'a str },
    /// Page fetched; `found` icons matched.
    Scraped { found: usize },
    /// About to download `icon` (1-based `index` of `total`).
    Downloading {
        index: usize,
        total: usize,
        icon: &'a IconDescriptor,
    },
    /// One item finished (successfully or not).
    Finished(&'a ItemReport),
}

/// Outcome of one icon.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub icon: IconDescriptor,
    /// `<output_dir>/<page>/<category>/<filename>`.
    pub destination: PathBuf,
    pub outcome: DownloadOutcome,
}

/// Everything that happened for one page.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub page: String,
    /// Set when the page itself could not be fetched.
    pub page_error: Option<String>,
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    /// Number of icons matched on the page.
    pub fn found(&self) -> usize {
        self.items.len()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.found() - self.succeeded()
    }

    /// Count of icons per listed category, in list order.
    ///
    /// Counts matched icons, not successful downloads: a failed or truncated
    /// download still counts. Categories not listed (including "unknown") are
    /// left out.
    pub fn category_counts(&self, categories: &[String]) -> Vec<(String, usize)> {
        categories
            .iter()
            .map(|c| {
                let n = self.items.iter().filter(|i| &i.icon.category == c).count();
                (c.clone(), n)
            })
            .collect()
    }
}

/// Display label for a category: `people_person` -> `People Person`.
pub fn category_label(category: &str) -> String {
    category
        .split('_')
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Directory receiving icons of `category` for `page`.
pub fn category_dir(output_dir: &Path, page: &PageConfig, category: &str) -> PathBuf {
    output_dir.join(page.subdir()).join(category)
}

/// Scrapes `page` and downloads every matched icon under `output_dir`.
///
/// Creates no directory when the page fetch fails or nothing matches.
pub fn run_page<F>(
    page: &PageConfig,
    output_dir: &Path,
    curl: &CurlOptions,
    mut on_event: F,
) -> BatchReport
where
    F: FnMut(BatchEvent<'_>),
{
    let mut report = BatchReport {
        page: page.name.clone(),
        ..BatchReport::default()
    };

    let icons = match try_scrape_page(page, curl) {
        Ok(icons) => icons,
        Err(e) => {
            tracing::warn!(page = %page.name, url = %page.url, "page fetch failed: {}", e);
            let reason = e.to_string();
            on_event(BatchEvent::PageFailed { reason: &reason });
            report.page_error = Some(reason);
            return report;
        }
    };
    on_event(BatchEvent::Scraped { found: icons.len() });

    report.items = download_icons(page, icons, output_dir, curl, &mut on_event);

    tracing::info!(
        page = %page.name,
        found = report.found(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    report
}

/// Downloads already-scraped `icons` in order, one at a time.
pub fn download_icons<F>(
    page: &PageConfig,
    icons: Vec<IconDescriptor>,
    output_dir: &Path,
    curl: &CurlOptions,
    on_event: &mut F,
) -> Vec<ItemReport>
where
    F: FnMut(BatchEvent<'_>),
{
    let total = icons.len();
    let mut items = Vec::with_capacity(total);

    for (i, icon) in icons.into_iter().enumerate() {
        on_event(BatchEvent::Downloading {
            index: i + 1,
            total,
            icon: &icon,
        });

        let dir = category_dir(output_dir, page, &icon.category);
        let destination = dir.join(&icon.filename);
        let outcome = match fs::create_dir_all(&dir) {
            Ok(()) => download_image(&icon.url, &destination, curl),
            Err(e) => {
                tracing::warn!(path = %dir.display(), "could not create directory: {}", e);
                DownloadOutcome::Failed(format!("create {}: {}", dir.display(), e))
            }
        };

        let item = ItemReport {
            icon,
            destination,
            outcome,
        };
        on_event(BatchEvent::Finished(&item));
        items.push(item);
    }
    items
}
