use anyhow::{Context, Result};
use clap::CommandFactory;
use fieldcam_core::{default_storage_root, AgentConfig, StorageLayout, VerificationReport};
use fieldcam_fsops::LocalFileSystem;
use fieldcam_upgrade::{
    FixedStorageProvider, RecoveryFlagStore, ScriptUpgradeTrigger, UpgradeService,
};

use crate::render::{current_output_style, render_section_header, render_status_line, OutputStyle};
use crate::{Cli, Commands};

type AgentUpgradeService =
    UpgradeService<LocalFileSystem, FixedStorageProvider, ScriptUpgradeTrigger>;

pub(crate) fn resolve_agent_config(cli: &Cli) -> Result<AgentConfig> {
    let mut config = match &cli.config {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig {
            storage_root: default_storage_root()?,
            log_filter: None,
        },
    };

    if let Some(root) = &cli.storage_root {
        config.storage_root = root.clone();
    }

    Ok(config)
}

pub(crate) fn run_cli(cli: Cli, config: &AgentConfig) -> Result<()> {
    match cli.command {
        Commands::Verify { json } => {
            let service = build_service(config)?;
            let report = service.verify_package();
            if json {
                println!(
                    "{}",
                    serde_json::to_string(&report).context("failed to render report as JSON")?
                );
            } else {
                for line in format_verify_report_lines(&report, current_output_style()) {
                    println!("{line}");
                }
            }
        }
        Commands::Apply => {
            let service = build_service(config)?;
            service.perform_upgrade()?;
            println!(
                "{}",
                render_status_line(
                    current_output_style(),
                    "ok",
                    "upgrade handed off to the upgrade script"
                )
            );
        }
        Commands::Status { json } => {
            let service = build_service(config)?;
            let in_progress = service.is_upgrade_in_progress();
            if json {
                println!("{}", serde_json::json!({ "upgradeInProgress": in_progress }));
            } else {
                for line in format_status_lines(in_progress, current_output_style()) {
                    println!("{line}");
                }
            }
        }
        Commands::Doctor => {
            let service = build_service(config)?;
            let style = current_output_style();
            if let Some(header) = render_section_header(style, "fieldcam doctor") {
                println!("{header}");
            }
            let archive_present = service.layout().upgrade_archive_path().exists();
            for line in format_doctor_lines(
                service.layout(),
                archive_present,
                service.is_upgrade_in_progress(),
                style,
            ) {
                println!("{line}");
            }
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "fieldcam-agent", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn build_service(config: &AgentConfig) -> Result<AgentUpgradeService> {
    let layout = StorageLayout::new(&config.storage_root);
    layout.ensure_base_dirs()?;
    Ok(UpgradeService::new(
        LocalFileSystem,
        layout,
        RecoveryFlagStore::new(&config.storage_root),
        FixedStorageProvider::new(&config.storage_root),
        ScriptUpgradeTrigger,
    ))
}

pub(crate) fn format_verify_report_lines(
    report: &VerificationReport,
    style: OutputStyle,
) -> Vec<String> {
    if report.is_okay {
        vec![render_status_line(style, "ok", "upgrade package verified")]
    } else {
        vec![render_status_line(style, "err", &report.message)]
    }
}

pub(crate) fn format_status_lines(in_progress: bool, style: OutputStyle) -> Vec<String> {
    if in_progress {
        vec![render_status_line(style, "warn", "upgrade in progress")]
    } else {
        vec![render_status_line(style, "ok", "no upgrade in progress")]
    }
}

pub(crate) fn format_doctor_lines(
    layout: &StorageLayout,
    archive_present: bool,
    upgrade_in_progress: bool,
    style: OutputStyle,
) -> Vec<String> {
    vec![
        render_status_line(
            style,
            "step",
            &format!("storage root: {}", layout.root().display()),
        ),
        render_status_line(
            style,
            "step",
            &format!("workspace: {}", layout.upgrade_workspace_dir().display()),
        ),
        render_status_line(
            style,
            "step",
            &format!(
                "upgrade archive: {} (present: {archive_present})",
                layout.upgrade_archive_path().display()
            ),
        ),
        render_status_line(
            style,
            if upgrade_in_progress { "warn" } else { "ok" },
            &format!(
                "recovery flag: {} (upgrade in progress: {upgrade_in_progress})",
                layout.recovery_flag_path().display()
            ),
        ),
    ]
}
