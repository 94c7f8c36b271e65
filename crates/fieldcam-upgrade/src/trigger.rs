use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use fieldcam_core::UPGRADE_SCRIPT_FILE_NAME;

pub trait UpgradeTrigger {
    fn fire(&self, workspace: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptUpgradeTrigger;

impl UpgradeTrigger for ScriptUpgradeTrigger {
    fn fire(&self, workspace: &Path) -> Result<()> {
        let script_path = workspace.join(UPGRADE_SCRIPT_FILE_NAME);
        let child = Command::new("sh")
            .arg(&script_path)
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| {
                format!("failed to start the upgrade script: {}", script_path.display())
            })?;

        tracing::info!("upgrade script started (pid {})", child.id());
        Ok(())
    }
}
