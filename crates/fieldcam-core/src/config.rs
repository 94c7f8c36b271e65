use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    pub storage_root: PathBuf,
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl AgentConfig {
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse agent config")?;
        if config.storage_root.as_os_str().is_empty() {
            return Err(anyhow!("agent config storage_root must not be empty"));
        }
        if let Some(filter) = &config.log_filter {
            if filter.trim().is_empty() {
                return Err(anyhow!("agent config log_filter must not be blank"));
            }
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read agent config: {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("failed parsing agent config: {}", path.display()))
    }
}
