//! `iconfetch pages` – list configured pages.

use iconfetch_core::config::IconfetchConfig;

pub fn run_pages(cfg: &IconfetchConfig) {
    if cfg.pages.is_empty() {
        println!("No pages configured.");
        return;
    }
    println!("{:<10} {:<40} {}", "NAME", "CATEGORIES", "URL");
    for p in &cfg.pages {
        println!(
            "{:<10} {:<40} {}",
            p.name,
            p.summary_categories.join(","),
            p.url
        );
    }
}
