//! CLI command handlers, one per file.

mod fetch;
mod pages;
mod rename;

pub use fetch::run_fetch;
pub use pages::run_pages;
pub use rename::run_rename;
