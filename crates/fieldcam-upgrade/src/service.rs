use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use fieldcam_core::{
    StorageLayout, VerificationReport, CHECKSUM_MANIFEST_FILE_NAME, UPGRADE_ARCHIVE_FILE_NAME,
};
use fieldcam_fsops::FileSystemOps;

use crate::flag::RecoveryFlagStore;
use crate::provider::StorageProvider;
use crate::trigger::UpgradeTrigger;

pub const ARCHIVE_MISSING_MESSAGE: &str = "The upgrade archive does not exist.";
pub const ARCHIVE_UNREADABLE_MESSAGE: &str = "The upgrade archive is not readable.";
pub const ARCHIVE_EXTRACTION_MESSAGE: &str = "The upgrade archive could not be extracted.";
pub const SCRIPT_MISSING_MESSAGE: &str = "The upgrade script does not exist.";
pub const SCRIPT_UNREADABLE_MESSAGE: &str = "The upgrade script is not readable.";
pub const CHECKSUM_FILE_MISSING_MESSAGE: &str = "The checksum file does not exist.";
pub const CHECKSUM_FILE_UNREADABLE_MESSAGE: &str = "The checksum file is not readable.";
pub const CHECKSUM_MISMATCH_MESSAGE: &str = "Not all checksums are valid.";

pub struct UpgradeService<F, P, T> {
    fs: F,
    layout: StorageLayout,
    flag_store: RecoveryFlagStore,
    provider: P,
    trigger: T,
    run_guard: Mutex<()>,
}

impl<F, P, T> UpgradeService<F, P, T>
where
    F: FileSystemOps,
    P: StorageProvider,
    T: UpgradeTrigger,
{
    pub fn new(
        fs: F,
        layout: StorageLayout,
        flag_store: RecoveryFlagStore,
        provider: P,
        trigger: T,
    ) -> Self {
        Self {
            fs,
            layout,
            flag_store,
            provider,
            trigger,
            run_guard: Mutex::new(()),
        }
    }

    pub fn verify_package(&self) -> VerificationReport {
        let _guard = self.lock_run_guard();

        let archive_path = match self.resolve_archive_path() {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!("upgrade verification could not resolve the archive: {err:#}");
                return VerificationReport::failure(ARCHIVE_MISSING_MESSAGE);
            }
        };

        if let Err(err) = self.fs.file_exists(&archive_path) {
            tracing::warn!("upgrade archive check failed: {err}");
            return VerificationReport::failure(ARCHIVE_MISSING_MESSAGE);
        }

        if let Err(err) = self.fs.file_readable(&archive_path) {
            tracing::warn!("upgrade archive readability check failed: {err}");
            return VerificationReport::failure(ARCHIVE_UNREADABLE_MESSAGE);
        }

        let workspace = self.layout.upgrade_workspace_dir();
        if let Err(err) = self
            .fs
            .empty_folder(&workspace)
            .and_then(|()| self.fs.extract_archive(&archive_path, &workspace))
        {
            tracing::warn!("upgrade archive extraction failed: {err}");
            self.discard_workspace_contents();
            return VerificationReport::failure(ARCHIVE_EXTRACTION_MESSAGE);
        }

        let script_path = self.layout.upgrade_script_path();
        if let Err(err) = self.fs.file_exists(&script_path) {
            tracing::warn!("upgrade script check failed: {err}");
            self.discard_workspace_contents();
            return VerificationReport::failure(SCRIPT_MISSING_MESSAGE);
        }

        if let Err(err) = self.fs.file_readable(&script_path) {
            tracing::warn!("upgrade script readability check failed: {err}");
            self.discard_workspace_contents();
            return VerificationReport::failure(SCRIPT_UNREADABLE_MESSAGE);
        }

        let manifest_path = self.layout.checksum_manifest_path();
        if let Err(err) = self.fs.file_exists(&manifest_path) {
            tracing::warn!("checksum manifest check failed: {err}");
            self.discard_workspace_contents();
            return VerificationReport::failure(CHECKSUM_FILE_MISSING_MESSAGE);
        }

        if let Err(err) = self.fs.file_readable(&manifest_path) {
            tracing::warn!("checksum manifest readability check failed: {err}");
            self.discard_workspace_contents();
            return VerificationReport::failure(CHECKSUM_FILE_UNREADABLE_MESSAGE);
        }

        if let Err(err) = self
            .fs
            .verify_checksums(CHECKSUM_MANIFEST_FILE_NAME, &workspace)
        {
            tracing::warn!("checksum verification failed: {err}");
            self.discard_workspace_contents();
            return VerificationReport::failure(CHECKSUM_MISMATCH_MESSAGE);
        }

        self.discard_workspace_contents();
        VerificationReport::ok()
    }

    pub fn perform_upgrade(&self) -> Result<()> {
        let _guard = self.lock_run_guard();

        let flag_path = self
            .flag_store
            .set_flag()
            .context("failed to persist the upgrade recovery flag")?;
        tracing::info!("upgrade recovery flag set: {}", flag_path.display());

        let archive_path = self.resolve_archive_path()?;
        let workspace = self.layout.upgrade_workspace_dir();
        self.fs
            .extract_archive(&archive_path, &workspace)
            .with_context(|| {
                format!(
                    "failed to extract {} into {}",
                    archive_path.display(),
                    workspace.display()
                )
            })?;

        self.trigger
            .fire(&workspace)
            .context("failed to invoke the upgrade trigger")?;
        tracing::info!("upgrade handed off to the external upgrade script");
        Ok(())
    }

    pub fn is_upgrade_in_progress(&self) -> bool {
        self.flag_store.is_flag_set()
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    pub fn flag_store(&self) -> &RecoveryFlagStore {
        &self.flag_store
    }

    fn resolve_archive_path(&self) -> Result<PathBuf> {
        let root = self
            .provider
            .current_root()
            .context("storage location provider failed to resolve a root")?;
        Ok(root.join(UPGRADE_ARCHIVE_FILE_NAME))
    }

    fn discard_workspace_contents(&self) {
        let workspace = self.layout.upgrade_workspace_dir();
        if let Err(err) = self.fs.empty_folder(&workspace) {
            tracing::warn!(
                "failed to clear the upgrade workspace {}: {err}",
                workspace.display()
            );
        }
    }

    fn lock_run_guard(&self) -> MutexGuard<'_, ()> {
        self.run_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
