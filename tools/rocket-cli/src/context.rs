//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rocket_cache::FileStore;
use rocket_cart::CartStore;
use rocket_data::{FetchClient, StorefrontApi};

use crate::config::CliConfig;
use crate::output::{ConsoleNotifier, Output};

/// Config file names looked up in the working directory and its parents.
pub const CONFIG_NAMES: [&str; 3] = ["rocket.toml", ".rocket.toml", "rocket.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Notice sink shared by every store this context opens.
    pub notifier: ConsoleNotifier,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(&path.to_string_lossy())?,
            None => CliConfig::default(),
        };

        Ok(Self {
            config,
            config_path,
            output,
            notifier: ConsoleNotifier::new(output),
            cwd,
        })
    }

    /// Context rooted at `dir` with default settings and JSON output.
    #[cfg(test)]
    pub fn in_dir(dir: &Path) -> Self {
        let output = Output::new(false, true);
        Self {
            config: CliConfig::default(),
            config_path: None,
            output,
            notifier: ConsoleNotifier::new(output),
            cwd: dir.to_path_buf(),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The cart storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    /// Storefront API client built from the `[api]` section.
    pub fn api(&self) -> Result<StorefrontApi> {
        let client = FetchClient::new(&self.config.api.base_url, self.config.api.fetch_policy())
            .context("Invalid storefront API configuration")?;
        Ok(StorefrontApi::new(client))
    }

    /// Open the session's cart store.
    pub fn open_store(&self) -> Result<CartStore> {
        let storage = self.storage_path();
        self.output.debug(&format!("Cart storage: {}", storage.display()));

        let api = Arc::new(self.api()?);
        Ok(CartStore::restore(
            FileStore::open(storage),
            api.clone(),
            api,
            self.notifier.clone(),
        ))
    }
}

/// Find a config file in the directory tree above `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}
