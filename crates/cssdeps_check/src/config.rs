use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "check")]
#[command(about = "Extract and check stylesheet dependencies")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Only analyze stylesheets whose path relative to the root contains this pattern
    #[arg(long)]
    pub entry_glob: Option<String>,

    /// Also list references to external resources (http:, data:, ...)
    #[arg(long)]
    pub include_external: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Initialize the config by resolving the root directory
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, searching for git root");
            cssdeps_core::find_git_root()?
        };
        info!("Using root directory: {}", root.display());

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}
