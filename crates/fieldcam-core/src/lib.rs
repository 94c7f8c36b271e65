mod config;
mod layout;
mod report;

pub use config::AgentConfig;
pub use layout::{
    default_storage_root, StorageLayout, CHECKSUM_MANIFEST_FILE_NAME, KEEP_FILE_NAME,
    RECOVERY_FLAG_CONTENT, RECOVERY_FLAG_FILE_NAME, UPGRADE_ARCHIVE_FILE_NAME,
    UPGRADE_SCRIPT_FILE_NAME,
};
pub use report::VerificationReport;
