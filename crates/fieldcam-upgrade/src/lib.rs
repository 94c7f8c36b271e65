mod flag;
mod provider;
mod service;
mod trigger;

pub use flag::RecoveryFlagStore;
pub use provider::{FixedStorageProvider, StorageProvider};
pub use service::{
    UpgradeService, ARCHIVE_EXTRACTION_MESSAGE, ARCHIVE_MISSING_MESSAGE,
    ARCHIVE_UNREADABLE_MESSAGE, CHECKSUM_FILE_MISSING_MESSAGE, CHECKSUM_FILE_UNREADABLE_MESSAGE,
    CHECKSUM_MISMATCH_MESSAGE, SCRIPT_MISSING_MESSAGE, SCRIPT_UNREADABLE_MESSAGE,
};
pub use trigger::{ScriptUpgradeTrigger, UpgradeTrigger};
