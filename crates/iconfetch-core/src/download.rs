//! Single-image downloader. Never propagates errors: the outcome is a value.

use crate::http::{self, CurlOptions};
use crate::url_model::request_url;
use std::path::Path;

/// Result of one image download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Body fully written; carries the byte count.
    Saved(u64),
    /// Request or write failed. A partially written file may remain on disk.
    Failed(String),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Saved(_))
    }
}

/// Downloads `url` into `dest` (overwriting it). Protocol-relative URLs are
/// resolved and unsafe characters escaped before the request.
pub fn download_image(url: &str, dest: &Path, curl: &CurlOptions) -> DownloadOutcome {
    let url = request_url(url);
    match http::get_to_file(&url, dest, curl) {
        Ok(bytes) => {
            tracing::debug!(url = %url, path = %dest.display(), bytes, "downloaded");
            DownloadOutcome::Saved(bytes)
        }
        Err(e) => {
            tracing::warn!(url = %url, path = %dest.display(), "download failed: {}", e);
            DownloadOutcome::Failed(e.to_string())
        }
    }
}
