//! DevSync - sync path manager
//!
//! Usage:
//!   devsync add sync --local ./src --container /app/src
//!   devsync remove sync --container /app/src
//!   devsync list sync

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devsync_core::commands::{AddOptions, RemoveOptions, SyncCommand, SyncReport};
use devsync_core::config::SyncMapping;
use devsync_core::env::{FixedWorkingDirectory, ProcessWorkingDirectory, WorkingDirectory};

#[derive(Parser)]
#[command(name = "devsync")]
#[command(about = "Local <-> container sync path manager", long_about = None)]
struct Cli {
    /// Project directory containing devsync.toml (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add configuration entries
    Add(AddArgs),

    /// Remove configuration entries
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// List configuration entries
    #[command(alias = "ls")]
    List(ListArgs),
}

#[derive(Args)]
struct AddArgs {
    #[command(subcommand)]
    command: AddSubcommand,
}

#[derive(Subcommand)]
enum AddSubcommand {
    /// Add a sync path
    Sync {
        /// Local path to sync
        #[arg(long)]
        local: String,

        /// Absolute path inside the container
        #[arg(long)]
        container: String,

        /// Namespace of the target workload
        #[arg(long)]
        namespace: Option<String>,

        /// Label selector of the target workload (e.g. "release=myapp,tier=backend")
        #[arg(long)]
        label_selector: Option<String>,

        /// Comma-separated paths to exclude from sync
        #[arg(long)]
        exclude: Option<String>,

        /// Service whose label selector should be used
        #[arg(long)]
        service: Option<String>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct RemoveArgs {
    #[command(subcommand)]
    command: RemoveSubcommand,
}

#[derive(Subcommand)]
enum RemoveSubcommand {
    /// Remove sync paths matching any of the given criteria
    Sync {
        /// Remove all sync paths
        #[arg(long)]
        all: bool,

        /// Remove sync paths with this local path
        #[arg(long)]
        local: Option<String>,

        /// Remove sync paths with this container path
        #[arg(long)]
        container: Option<String>,

        /// Remove sync paths with exactly this label selector
        #[arg(long)]
        label_selector: Option<String>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct ListArgs {
    #[command(subcommand)]
    command: ListSubcommand,
}

#[derive(Subcommand)]
enum ListSubcommand {
    /// List configured sync paths
    Sync {
        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// No output on success
    Quiet,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devsync=info,devsync_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let (cmd, working_dir) = resolve_project(cli.project.as_deref())?;
    debug!(
        config = %cmd.config_store().config_path().display(),
        "Resolved project"
    );

    match cli.command {
        Commands::Add(args) => run_add(&cmd, working_dir.as_ref(), args.command),
        Commands::Remove(args) => run_remove(&cmd, args.command),
        Commands::List(args) => run_list(&cmd, args.command),
    }
}

/// Local paths are made relative to `--project` when given, else to the process cwd
fn resolve_project(project: Option<&Path>) -> Result<(SyncCommand, Box<dyn WorkingDirectory>)> {
    match project {
        Some(project) => {
            let root = std::path::absolute(project)?;
            let working_dir = FixedWorkingDirectory(root.to_string_lossy().into_owned());
            Ok((SyncCommand::with_project_root(root), Box::new(working_dir)))
        }
        None => Ok((SyncCommand::with_defaults()?, Box::new(ProcessWorkingDirectory))),
    }
}

fn run_add(
    cmd: &SyncCommand,
    working_dir: &dyn WorkingDirectory,
    command: AddSubcommand,
) -> Result<()> {
    let AddSubcommand::Sync {
        local,
        container,
        namespace,
        label_selector,
        exclude,
        service,
        format,
    } = command;

    let options = AddOptions::new(local, container)
        .with_namespace(namespace.unwrap_or_default())
        .with_label_selector(label_selector.unwrap_or_default())
        .with_exclude_paths(exclude.unwrap_or_default())
        .with_service(service.unwrap_or_default());

    let report = cmd.add(&options, working_dir)?;

    match format {
        OutputFormat::Table => {
            if let Some(mapping) = &report.added {
                println!(
                    "Added sync path {} -> {} ({})",
                    display_local(&mapping.local_path),
                    mapping.container_path,
                    target_label(mapping)
                );
            }
        }
        OutputFormat::Json => print_report_json(&report)?,
        OutputFormat::Quiet => {}
    }

    Ok(())
}

fn run_remove(cmd: &SyncCommand, command: RemoveSubcommand) -> Result<()> {
    let RemoveSubcommand::Sync {
        all,
        local,
        container,
        label_selector,
        format,
    } = command;

    let options = RemoveOptions::new()
        .with_all(all)
        .with_local_path(local.unwrap_or_default())
        .with_container_path(container.unwrap_or_default())
        .with_label_selector(label_selector.unwrap_or_default());

    let report = cmd.remove(&options)?;

    match format {
        OutputFormat::Table => {
            if report.changed {
                println!(
                    "Removed {} sync path(s), {} remaining",
                    report.removed, report.total
                );
            } else {
                println!("No sync path matched");
            }
        }
        OutputFormat::Json => print_report_json(&report)?,
        OutputFormat::Quiet => {}
    }

    Ok(())
}

fn run_list(cmd: &SyncCommand, command: ListSubcommand) -> Result<()> {
    let ListSubcommand::Sync { format } = command;
    let mappings = cmd.list()?;

    match format {
        OutputFormat::Table => print_sync_table(&mappings),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&mappings)?);
        }
        OutputFormat::Quiet => {
            if mappings.is_empty() {
                println!("No sync paths configured");
            }
        }
    }

    Ok(())
}

fn print_report_json(report: &SyncReport) -> Result<()> {
    let output = serde_json::json!({
        "changed": report.changed,
        "added": report.added,
        "removed": report.removed,
        "total": report.total,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_sync_table(mappings: &[SyncMapping]) {
    if mappings.is_empty() {
        println!("No sync paths configured.");
        println!("Add one with: devsync add sync --local <path> --container <path>");
        return;
    }

    println!(
        "{:<24} {:<24} {:<28} Excluded",
        "Local", "Container", "Target"
    );
    println!("{}", "-".repeat(90));

    for mapping in mappings {
        let excluded = if mapping.exclude_paths.is_empty() {
            "-".to_string()
        } else {
            mapping.exclude_paths.join(", ")
        };

        println!(
            "{:<24} {:<24} {:<28} {}",
            truncate(display_local(&mapping.local_path), 24),
            truncate(&mapping.container_path, 24),
            truncate(&target_label(mapping), 28),
            excluded
        );
    }
}

fn target_label(mapping: &SyncMapping) -> String {
    let target = match (&mapping.service, &mapping.label_selector) {
        (Some(service), _) => format!("service:{}", service),
        (None, Some(selector)) if !selector.is_empty() => selector.to_string(),
        _ => "-".to_string(),
    };
    match &mapping.namespace {
        Some(namespace) => format!("{}/{}", namespace, target),
        None => target,
    }
}

fn display_local(local_path: &str) -> &str {
    if local_path.is_empty() { "." } else { local_path }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
