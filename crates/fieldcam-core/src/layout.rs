use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const UPGRADE_ARCHIVE_FILE_NAME: &str = "FieldCam-upgrade.zip";
pub const UPGRADE_SCRIPT_FILE_NAME: &str = "upgrade.sh";
pub const CHECKSUM_MANIFEST_FILE_NAME: &str = "checksums.sha256";
pub const RECOVERY_FLAG_FILE_NAME: &str = "upgrade-in-progress";
pub const RECOVERY_FLAG_CONTENT: &str = "true";
pub const KEEP_FILE_NAME: &str = ".gitkeep";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.join("temp")
    }

    pub fn upgrade_workspace_dir(&self) -> PathBuf {
        self.temp_dir().join("upgrade")
    }

    pub fn upgrade_archive_path(&self) -> PathBuf {
        self.root.join(UPGRADE_ARCHIVE_FILE_NAME)
    }

    pub fn upgrade_script_path(&self) -> PathBuf {
        self.upgrade_workspace_dir().join(UPGRADE_SCRIPT_FILE_NAME)
    }

    pub fn checksum_manifest_path(&self) -> PathBuf {
        self.upgrade_workspace_dir()
            .join(CHECKSUM_MANIFEST_FILE_NAME)
    }

    pub fn recovery_flag_path(&self) -> PathBuf {
        self.root.join(RECOVERY_FLAG_FILE_NAME)
    }

    pub fn workspace_keep_file_path(&self) -> PathBuf {
        self.upgrade_workspace_dir().join(KEEP_FILE_NAME)
    }

    pub fn ensure_base_dirs(&self) -> Result<()> {
        for dir in [
            self.root.clone(),
            self.temp_dir(),
            self.upgrade_workspace_dir(),
        ] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let keep_file = self.workspace_keep_file_path();
        if !keep_file.exists() {
            fs::write(&keep_file, b"")
                .with_context(|| format!("failed to seed {}", keep_file.display()))?;
        }
        Ok(())
    }
}

pub fn default_storage_root() -> Result<PathBuf> {
    if let Some(root) = std::env::var_os("FIELDCAM_STORAGE_ROOT") {
        let root = PathBuf::from(root);
        if root.as_os_str().is_empty() {
            anyhow::bail!("FIELDCAM_STORAGE_ROOT is set but empty");
        }
        return Ok(root);
    }

    Ok(PathBuf::from("/var/lib/fieldcam"))
}
