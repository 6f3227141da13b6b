//! Stylesheet dependency checking.
//!
//! This crate extracts the dependencies of every stylesheet in a project with
//! `cssdeps_core`, resolves local references against the file system and reports the
//! ones that point nowhere, along with `@import` rules whose target cannot be determined.
//!
//! # Examples
//!
//! ```no_run
//! use cssdeps_check::{Config, run_dependency_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     entry_glob: None,
//!     include_external: false,
//!     json: false,
//! };
//!
//! let result = run_dependency_check(cfg)?;
//!
//! if !result.warnings.is_empty() {
//!     // Use buffered output for better performance
//!     let mut stdout = BufWriter::new(std::io::stdout());
//!     cssdeps_check::print_warnings(&mut stdout, &result)?;
//!     stdout.flush()?;
//! }
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod reporter;
mod resolver;
mod types;

// Re-export public API
pub use checker::run_dependency_check;
pub use config::Config;
pub use reporter::{print_dependency_tree, print_json, print_no_issues_message, print_warnings};
pub use resolver::{classify, resolve};
pub use types::{CheckResult, FileReport, ReferenceKind, ResolvedDependency, Warning};
