pub mod config;
pub mod dashboard;
pub mod init;
pub mod intake;
pub mod lead;
pub mod status;
pub mod user;

use anyhow::Context;
use presscrm_core::{config::Config, dataset::Dataset, user::User};
use std::path::Path;

/// Config and dataset for one command invocation.
pub struct Workspace {
    pub config: Config,
    pub data: Dataset,
}

impl Workspace {
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let config = Config::load(root).context("failed to load config")?;
        let data = Dataset::load(root).context("failed to load dataset")?;
        Ok(Self { config, data })
    }

    pub fn save(&self, root: &Path) -> anyhow::Result<()> {
        self.data.save(root).context("failed to save dataset")
    }

    /// The acting user: `--as` when given, else the configured default.
    pub fn actor(&self, as_user: Option<&str>) -> anyhow::Result<&User> {
        let id = as_user.unwrap_or(&self.config.default_user);
        self.data
            .user(id)
            .with_context(|| format!("cannot act as '{id}'"))
    }
}
