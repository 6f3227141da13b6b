use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::PathBuf;

use crate::constants::STYLESHEET_EXTENSIONS;

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Only keep files whose root-relative path contains this pattern
    pub entry_glob: Option<String>,
}

pub fn collect_stylesheets(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting stylesheet files");
    let mut files: Vec<PathBuf> = Vec::new();
    let root = &cfg.root;
    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(root).hidden(false).ignore(true).git_ignore(true).build();

    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        let Some(ext) = p.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !STYLESHEET_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)) {
            continue;
        }

        if let Some(gl) = &cfg.entry_glob {
            let rel_str = p.strip_prefix(root).unwrap_or(p).to_string_lossy();
            if !rel_str.contains(gl.as_str()) {
                trace!("Skipping stylesheet outside glob '{}': {}", gl, rel_str);
                continue;
            }
        }

        trace!("Found stylesheet: {}", p.display());
        files.push(p.to_path_buf());
    }

    files.sort();
    debug!("Collected {} stylesheet files", files.len());
    Ok(files)
}
