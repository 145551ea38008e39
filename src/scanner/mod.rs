// Scanner module - gitignore-aware codebase scan and search

#![allow(dead_code)]

pub mod config;
pub mod error;
pub mod gitignore;
pub mod scan;
pub mod search;
pub mod types;
pub mod walk;

pub use config::ScannerConfig;
pub use error::{Result, ScanError};
pub use gitignore::{IgnoreMatcher, IgnoreRule};
pub use scan::scan_codebase;
pub use search::search_codebase;
pub use types::{ScanEntry, ScanReport, SearchMatch, SearchReport};
