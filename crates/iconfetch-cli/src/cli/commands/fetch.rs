//! `iconfetch fetch` – scrape pages and download their icons.

use anyhow::Result;
use iconfetch_core::batch::{self, category_label, BatchEvent, BatchReport};
use iconfetch_core::config::{IconfetchConfig, PageConfig};
use iconfetch_core::download::DownloadOutcome;
use iconfetch_core::http::CurlOptions;
use std::io::{self, Write};
use std::path::Path;

/// Resolves page names against the config. `all` selects every page.
pub(crate) fn select_pages<'a>(
    cfg: &'a IconfetchConfig,
    names: &[String],
    all: bool,
) -> Result<Vec<&'a PageConfig>> {
    if all {
        return Ok(cfg.pages.iter().collect());
    }
    if names.is_empty() {
        anyhow::bail!("no page given; name one or more pages or pass --all");
    }
    names
        .iter()
        .map(|name| {
            cfg.page(name).ok_or_else(|| {
                let known: Vec<&str> = cfg.pages.iter().map(|p| p.name.as_str()).collect();
                anyhow::anyhow!("unknown page '{}' (known: {})", name, known.join(", "))
            })
        })
        .collect()
}

pub fn run_fetch(
    cfg: &IconfetchConfig,
    names: &[String],
    all: bool,
    output_dir: Option<&Path>,
) -> Result<()> {
    let pages = select_pages(cfg, names, all)?;
    let output_dir = output_dir.unwrap_or(cfg.output_dir.as_path());
    let curl = CurlOptions::from_config(&cfg.http);
    let mut out = io::stdout().lock();

    for page in pages {
        let report = fetch_page(&mut out, page, output_dir, &curl)?;
        tracing::info!(
            page = %report.page,
            found = report.found(),
            failed = report.failed(),
            "fetch finished"
        );
    }
    Ok(())
}

fn fetch_page(
    out: &mut impl Write,
    page: &PageConfig,
    output_dir: &Path,
    curl: &CurlOptions,
) -> Result<BatchReport> {
    writeln!(out, "Extracting {} skill icon URLs...", category_label(&page.name))?;

    // The batch callback cannot fail, so keep the first write error for later.
    let mut write_err: Option<io::Error> = None;
    let report = batch::run_page(page, output_dir, curl, |ev| {
        if write_err.is_none() {
            write_err = print_event(out, ev).err();
        }
    });
    if let Some(e) = write_err {
        return Err(e.into());
    }

    print_summary(out, page, &report)?;
    Ok(report)
}

fn print_summary(out: &mut impl Write, page: &PageConfig, report: &BatchReport) -> io::Result<()> {
    if report.found() == 0 {
        return writeln!(out, "No skill icons found!");
    }

    writeln!(
        out,
        "Download complete! ({} saved, {} failed)",
        report.succeeded(),
        report.failed()
    )?;
    writeln!(out, "\nSummary:")?;
    for (category, n) in report.category_counts(&page.summary_categories) {
        writeln!(out, "{}: {} icons", category_label(&category), n)?;
    }
    Ok(())
}

fn print_event(out: &mut impl Write, ev: BatchEvent<'_>) -> io::Result<()> {
    match ev {
        BatchEvent::PageFailed { reason } => {
            writeln!(out, "Error extracting skill icons: {}", reason)
        }
        BatchEvent::Scraped { found: 0 } => Ok(()),
        BatchEvent::Scraped { found } => writeln!(out, "Found {} skill icons", found),
        BatchEvent::Downloading { icon, .. } => {
            writeln!(out, "Downloading {} ({})...", icon.display_name, icon.category)
        }
        BatchEvent::Finished(item) => match &item.outcome {
            DownloadOutcome::Saved(_) => {
                writeln!(out, "Downloaded: {}", item.destination.display())
            }
            DownloadOutcome::Failed(reason) => {
                writeln!(out, "Failed to download {}: {}", item.icon.url, reason)
            }
        },
    }
}
