pub mod config;
pub mod logging;

pub mod batch;
pub mod classify;
pub mod download;
pub mod http;
pub mod rename;
pub mod scrape;
pub mod text;
pub mod url_model;
