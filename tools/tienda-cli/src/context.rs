//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tienda_store::FileStorage;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        }
        .with_env();

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }

    /// The product catalog file: `--file` if given, else the configured one.
    pub fn products_file(&self, flag: Option<&str>) -> PathBuf {
        self.resolve_path(flag.unwrap_or(&self.config.catalog.products_file))
    }

    /// Open the file-backed store.
    pub fn store(&self) -> Result<Arc<FileStorage>> {
        let path = self.resolve_path(&self.config.storage.path);
        let store = FileStorage::open(&path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        Ok(Arc::new(store))
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}
