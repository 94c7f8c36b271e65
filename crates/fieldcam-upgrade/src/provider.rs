use std::path::PathBuf;

use anyhow::Result;

pub trait StorageProvider {
    fn current_root(&self) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct FixedStorageProvider {
    root: PathBuf,
}

impl FixedStorageProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl StorageProvider for FixedStorageProvider {
    fn current_root(&self) -> Result<PathBuf> {
        Ok(self.root.clone())
    }
}
