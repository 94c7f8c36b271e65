use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::FsError;

enum ToolOutcome {
    Completed,
    Failed(String),
    Unavailable,
}

pub fn extract_archive(archive_path: &Path, output_dir: &Path) -> Result<(), FsError> {
    if cfg!(windows) {
        return Err(FsError::PlatformUnavailable { tool: "unzip" });
    }

    fs::create_dir_all(output_dir).map_err(|err| FsError::io(output_dir, err))?;

    let mut unzip_command = Command::new("unzip");
    unzip_command
        .arg("-o")
        .arg("-q")
        .arg(archive_path)
        .arg("-d")
        .arg(output_dir);
    match run_extract_tool(&mut unzip_command, "unzip") {
        ToolOutcome::Completed => return Ok(()),
        ToolOutcome::Failed(detail) => return Err(FsError::Extraction { detail }),
        ToolOutcome::Unavailable => {}
    }

    let mut tar_command = Command::new("tar");
    tar_command
        .arg("-xf")
        .arg(archive_path)
        .arg("-C")
        .arg(output_dir);
    match run_extract_tool(&mut tar_command, "tar") {
        ToolOutcome::Completed => Ok(()),
        ToolOutcome::Failed(detail) => Err(FsError::Extraction { detail }),
        ToolOutcome::Unavailable => Err(FsError::PlatformUnavailable { tool: "unzip or tar" }),
    }
}

fn run_extract_tool(command: &mut Command, tool: &str) -> ToolOutcome {
    let output = match command.output() {
        Ok(output) => output,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return ToolOutcome::Unavailable,
        Err(err) => return ToolOutcome::Failed(format!("{tool} failed to start: {err}")),
    };

    if output.status.success() {
        return ToolOutcome::Completed;
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    ToolOutcome::Failed(format!(
        "{tool}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}
