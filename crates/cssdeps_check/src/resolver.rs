use dashmap::DashMap;
use log::trace;
use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::types::ReferenceKind;

pub fn classify(source: &str) -> ReferenceKind {
    if source.is_empty() {
        ReferenceKind::Empty
    } else if source.starts_with('#') {
        ReferenceKind::Fragment
    } else if source.starts_with("//") || has_scheme(source) {
        ReferenceKind::External
    } else {
        ReferenceKind::Local
    }
}

/// `scheme:` as in RFC 3986: a letter followed by letters, digits, `+`, `-` or `.`
fn has_scheme(source: &str) -> bool {
    let Some((scheme, _)) = source.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolves a local reference to an existing file.
///
/// Query strings and fragments are ignored. A leading `/` is relative to `root`, anything
/// else is relative to the directory of `from_file`.
pub fn resolve(
    root: &Path,
    from_file: &Path,
    source: &str,
    cache: &DashMap<(PathBuf, String), Option<PathBuf>>,
) -> Option<PathBuf> {
    let key = (from_file.to_path_buf(), source.to_string());
    if let Some(v) = cache.get(&key) {
        trace!("Cache hit for resolve: '{}' from {}", source, from_file.display());
        return v.clone();
    }
    trace!("Resolving: '{}' from {}", source, from_file.display());

    let path = source.split(['?', '#']).next().unwrap_or(source);
    let resolved = if path.is_empty() {
        None
    } else {
        let joined = match path.strip_prefix('/') {
            Some(from_root) => root.join(from_root),
            None => from_file.parent().unwrap_or(root).join(path),
        };
        let p = clean(joined.to_string_lossy().to_string());
        let candidate = Path::new(&p);
        if candidate.is_file() {
            Some(candidate.canonicalize().unwrap_or_else(|_| candidate.to_path_buf()))
        } else {
            trace!("No file at {}", candidate.display());
            None
        }
    };

    cache.insert(key, resolved.clone());
    resolved
}
