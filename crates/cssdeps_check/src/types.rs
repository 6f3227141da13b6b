use serde::Serialize;
use std::path::PathBuf;

/// How a dependency identifier should be treated by the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// A path on disk, relative to the stylesheet or to the root
    Local,
    /// Has a URL scheme or is protocol-relative
    External,
    /// `#id` references into the current document
    Fragment,
    /// `url()`
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDependency {
    pub source: String,
    pub kind: ReferenceKind,
    /// Root-relative path of the target, for local references that exist
    pub resolved_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub dependencies: Vec<ResolvedDependency>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A local reference whose target does not exist
    Missing { from_file: String, source: String },
    /// The file has an `@import` whose target cannot be determined
    MalformedImport { from_file: String, message: String },
    /// The file could not be read
    Unreadable { from_file: String, message: String },
}

impl Warning {
    pub fn from_file(&self) -> &str {
        match self {
            Warning::Missing { from_file, .. }
            | Warning::MalformedImport { from_file, .. }
            | Warning::Unreadable { from_file, .. } => from_file,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    #[serde(skip)]
    pub root: PathBuf,
    pub files: Vec<FileReport>,
    pub warnings: Vec<Warning>,
    pub files_analyzed: usize,
}
