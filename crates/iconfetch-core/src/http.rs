//! Blocking HTTP GET over libcurl (via the `curl` crate).
//!
//! One request at a time: `get_text` buffers a page body in memory,
//! `get_to_file` streams a body to disk as it arrives.

use crate::config::HttpConfig;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("iconfetch/", env!("CARGO_PKG_VERSION"));

/// Error from a single GET.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (connect, timeout, truncated body, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    /// Destination file could not be created or written.
    #[error("write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Curl knobs derived from [`HttpConfig`].
#[derive(Debug, Clone)]
pub struct CurlOptions {
    /// Receive buffer size; bounds the size of each chunk handed to the writer.
    pub buffer_size: usize,
    pub connect_timeout: Duration,
    /// Total transfer timeout (None = wait indefinitely).
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

impl CurlOptions {
    pub fn from_config(cfg: &HttpConfig) -> Self {
        Self {
            buffer_size: cfg.chunk_size.max(1024),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: cfg.request_timeout_secs.map(Duration::from_secs),
            user_agent: cfg
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

fn new_easy(url: &str, opts: &CurlOptions) -> Result<curl::easy::Easy, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    // Error out on >= 400 before any body byte reaches the write callback.
    easy.fail_on_error(true)?;
    easy.useragent(&opts.user_agent)?;
    easy.buffer_size(opts.buffer_size)?;
    easy.connect_timeout(opts.connect_timeout)?;
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }
    Ok(easy)
}

/// Maps a curl failure to `FetchError`, surfacing the status for HTTP >= 400.
fn transfer_error(easy: &mut curl::easy::Easy, url: &str, e: curl::Error) -> FetchError {
    if e.is_http_returned_error() {
        if let Ok(code) = easy.response_code() {
            return FetchError::Http {
                url: url.to_string(),
                code,
            };
        }
    }
    FetchError::Curl(e)
}

fn check_status(easy: &mut curl::easy::Easy, url: &str) -> Result<(), FetchError> {
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            url: url.to_string(),
            code,
        });
    }
    Ok(())
}

/// GETs `url` and returns the body as text (invalid UTF-8 replaced lossily).
pub fn get_text(url: &str, opts: &CurlOptions) -> Result<String, FetchError> {
    let mut body = Vec::new();
    let mut easy = new_easy(url, opts)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };
    if let Err(e) = performed {
        return Err(transfer_error(&mut easy, url, e));
    }
    check_status(&mut easy, url)?;

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// GETs `url` and streams the body into `dest`, creating or truncating it.
/// Returns the number of bytes written.
///
/// The file is only created once the response status is known to be good, so an
/// HTTP error leaves no file behind. A transfer that breaks mid-body leaves
/// whatever was received on disk.
pub fn get_to_file(url: &str, dest: &Path, opts: &CurlOptions) -> Result<u64, FetchError> {
    let mut writer: Option<BufWriter<File>> = None;
    let mut written = 0u64;
    let mut write_err: Option<io::Error> = None;
    let mut easy = new_easy(url, opts)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if writer.is_none() {
                match File::create(dest) {
                    Ok(f) => writer = Some(BufWriter::with_capacity(opts.buffer_size, f)),
                    Err(e) => {
                        write_err = Some(e);
                        return Ok(0); // abort transfer
                    }
                }
            }
            let Some(w) = writer.as_mut() else {
                return Ok(0);
            };
            match w.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0)
                }
            }
        })?;
        transfer.perform()
    };

    let io_error = |source: io::Error| FetchError::Io {
        path: dest.to_path_buf(),
        source,
    };

    let created = writer.is_some();
    // Flush whatever arrived, even on failure.
    let flushed = match writer.take() {
        Some(mut w) => w.flush(),
        None => Ok(()),
    };

    if let Some(e) = write_err {
        return Err(io_error(e));
    }
    if let Err(e) = performed {
        return Err(transfer_error(&mut easy, url, e));
    }
    check_status(&mut easy, url)?;
    flushed.map_err(io_error)?;

    if !created {
        // Empty 2xx body: the write callback never ran.
        File::create(dest).map_err(io_error)?;
    }
    Ok(written)
}
