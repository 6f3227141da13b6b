use anyhow::{Result, anyhow};
use dashmap::DashMap;
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{
    path::{Path, PathBuf},
    thread,
};

use cssdeps_core::{
    CollectorConfig, DependencyReference, MalformedImportError, collect_stylesheets,
    dependencies_for,
};

use crate::{
    config::Config,
    resolver::{classify, resolve},
    types::{CheckResult, FileReport, ReferenceKind, ResolvedDependency, Warning},
};

pub fn run_dependency_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting stylesheet dependency check");

    // Initialize config (resolve root)
    cfg.initialize()?;
    let root = cfg.root()?.clone();

    debug!("Collecting stylesheets with glob: {:?}", cfg.entry_glob);
    let collector_cfg = CollectorConfig { root: root.clone(), entry_glob: cfg.entry_glob.clone() };

    let stylesheets = collect_stylesheets(&collector_cfg)?;
    if stylesheets.is_empty() {
        warn!("No stylesheets found under {}", root.display());
        return Err(anyhow!("No stylesheets found under {}", root.display()));
    }
    info!("Processing {} stylesheets in parallel", stylesheets.len());

    // Thread-safe caches using DashMap
    let dependency_cache: DashMap<PathBuf, Vec<DependencyReference>> = DashMap::new();
    let resolve_cache: DashMap<(PathBuf, String), Option<PathBuf>> = DashMap::new();

    // Collecting an indexed parallel iterator keeps the sorted file order
    let analyzed: Vec<(FileReport, Vec<Warning>)> = stylesheets
        .par_iter()
        .map(|file| {
            debug!("Thread {:?} processing: {}", thread::current().id(), file.display());
            analyze_file(&root, file, &dependency_cache, &resolve_cache)
        })
        .collect();

    let (files, warnings): (Vec<FileReport>, Vec<Vec<Warning>>) = analyzed.into_iter().unzip();
    let warnings: Vec<Warning> = warnings.into_iter().flatten().collect();

    info!("Dependency check complete. Found {} warnings", warnings.len());
    debug!(
        "Cache statistics: stylesheets={}, resolutions={}",
        dependency_cache.len(),
        resolve_cache.len()
    );

    Ok(CheckResult { root, files, warnings, files_analyzed: stylesheets.len() })
}

fn analyze_file(
    root: &Path,
    file: &Path,
    dependency_cache: &DashMap<PathBuf, Vec<DependencyReference>>,
    resolve_cache: &DashMap<(PathBuf, String), Option<PathBuf>>,
) -> (FileReport, Vec<Warning>) {
    let rel_file = relative_to_root(root, file);

    let deps = match dependencies_for(file, dependency_cache) {
        Ok(deps) => deps,
        Err(e) => {
            let warning = match e.downcast_ref::<MalformedImportError>() {
                Some(malformed) => {
                    warn!("{} in {}: @import {}", malformed, file.display(), malformed.prelude);
                    Warning::MalformedImport {
                        from_file: rel_file.clone(),
                        message: format!("{} (@import {})", malformed, malformed.prelude),
                    }
                }
                None => {
                    warn!("Error reading {}: {:#}", file.display(), e);
                    Warning::Unreadable { from_file: rel_file.clone(), message: format!("{:#}", e) }
                }
            };
            return (FileReport { file: rel_file, dependencies: Vec::new() }, vec![warning]);
        }
    };

    let mut warnings = Vec::new();
    let mut dependencies = Vec::with_capacity(deps.len());

    for dep in deps {
        let kind = classify(&dep.source);
        let resolved_path = if kind == ReferenceKind::Local {
            match resolve(root, file, &dep.source, resolve_cache) {
                Some(path) => Some(relative_to_root(root, &path)),
                None => {
                    trace!("Missing dependency '{}' in {}", dep.source, rel_file);
                    warnings.push(Warning::Missing {
                        from_file: rel_file.clone(),
                        source: dep.source.clone(),
                    });
                    None
                }
            }
        } else {
            trace!("Skipping {:?} reference '{}'", kind, dep.source);
            None
        };
        dependencies.push(ResolvedDependency { source: dep.source, kind, resolved_path });
    }

    (FileReport { file: rel_file, dependencies }, warnings)
}

fn relative_to_root(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().to_string()
}
