use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fieldcam_core::{RECOVERY_FLAG_CONTENT, RECOVERY_FLAG_FILE_NAME};

#[derive(Debug, Clone)]
pub struct RecoveryFlagStore {
    base_dir: PathBuf,
}

impl RecoveryFlagStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn flag_path(&self) -> PathBuf {
        self.base_dir.join(RECOVERY_FLAG_FILE_NAME)
    }

    pub fn is_flag_set(&self) -> bool {
        fs::read(self.flag_path()).is_ok()
    }

    pub fn set_flag(&self) -> Result<PathBuf> {
        let path = self.flag_path();
        fs::write(&path, RECOVERY_FLAG_CONTENT).with_context(|| {
            format!("failed to write upgrade recovery flag: {}", path.display())
        })?;
        Ok(path)
    }

    pub fn clear_flag(&self) -> Result<()> {
        let path = self.flag_path();
        if path.exists() {
            fs::remove_file(&path).with_context(|| {
                format!("failed to clear upgrade recovery flag: {}", path.display())
            })?;
        }
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
