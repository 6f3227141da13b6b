//! Core utilities for cssdeps tools.
//!
//! This crate extracts the external resources a stylesheet refers to, in the order the
//! stylesheet refers to them:
//! - `@import` targets, which must be quoted (`@import "a.css";`, `@import url('a.css');`)
//! - every `url(...)` argument found in a declaration value
//!
//! It also provides a tree builder for raw stylesheet text, a cached per-file reader and
//! a stylesheet file collector. Resolving the extracted identifiers to files is left to
//! the caller.
//!
//! # Examples
//!
//! ```
//! use cssdeps_core::{DependencyReference, dependencies_for_str, scan_urls};
//!
//! let deps = dependencies_for_str(
//!     "@import 'reset.css' screen; .logo { background: url(./logo.svg) }",
//! )?;
//! assert_eq!(
//!     deps,
//!     vec![DependencyReference::new("reset.css"), DependencyReference::new("./logo.svg")]
//! );
//!
//! assert!(scan_urls("/* url(old.png) */").is_empty());
//! # Ok::<(), cssdeps_core::MalformedImportError>(())
//! ```

mod collector;
mod comments;
mod config;
mod constants;
mod error;
mod import;
mod parser;
mod types;
mod url;
mod walker;

// Re-export public API
pub use collector::{CollectorConfig, collect_stylesheets};
pub use comments::strip_comments;
pub use config::find_git_root;
pub use constants::STYLESHEET_EXTENSIONS;
pub use error::MalformedImportError;
pub use import::resolve_import;
pub use parser::{dependencies_for, dependencies_for_str, parse_stylesheet};
pub use types::{AtRule, Comment, Declaration, DependencyReference, StyleRule, StylesheetNode};
pub use url::scan_urls;
pub use walker::walk;
