//! snapdiff: cluster snapshot diff and workload categorization tool

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use snapdiff::{
    cli,
    config::{AppConfig, CategorizeConfig, DiffConfig, DiffPaths, Validatable},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snapdiff")]
#[command(version)]
#[command(about = "Cluster snapshot diff and workload categorization tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (or changes without a fail flag)
    1  Changes detected with --fail-on-change
    2  Critical changes detected with --fail-on-critical
    3  Error occurred

EXAMPLES:
    # Compare two snapshots
    snapdiff diff snapshot-0900.json snapshot-1000.json

    # Compare the two newest snapshots in a directory, failing CI on critical changes
    snapdiff diff-latest ./snapshots --fail-on-critical

    # Licensing and criticality breakdown as JSON
    snapdiff categorize snapshot.json --rules categories.yaml -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Output flags shared by report-producing commands
#[derive(clap::Args)]
struct OutputArgs {
    /// Output format [default: summary, or the config file's format]
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Flags shared by the diff commands
#[derive(clap::Args)]
struct DiffFlags {
    /// Total restart count at which a workload restart is critical
    #[arg(long)]
    restart_threshold: Option<u32>,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// Exit with code 2 if critical changes are detected
    #[arg(long)]
    fail_on_critical: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two snapshot files
    Diff {
        /// Earlier snapshot
        previous: PathBuf,
        /// Later snapshot
        current: PathBuf,
        #[command(flatten)]
        flags: DiffFlags,
    },

    /// Compare the two most recent snapshot-*.json files in a directory
    DiffLatest {
        /// Directory holding snapshot files
        dir: PathBuf,
        #[command(flatten)]
        flags: DiffFlags,
    },

    /// Categorize the workloads of a snapshot
    Categorize {
        /// Snapshot to categorize
        snapshot: PathBuf,

        /// Rule configuration file (falls back to `categorize.rules_file` in config)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Show which rule decided each workload's classification
        #[arg(long)]
        explain: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate a rule configuration file
    Rules {
        /// Rule configuration file
        file: PathBuf,

        /// Exit with code 3 if any pattern is malformed
        #[arg(long)]
        strict: bool,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .snapdiff.yaml in the current directory
    Init,
    /// Print the JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}

/// Effective config: file values with global CLI flags layered on top.
fn load_config(cli: &Cli, output: &OutputArgs) -> AppConfig {
    let overrides = AppConfig::builder()
        .quiet(cli.quiet)
        .no_color(cli.no_color)
        .output_file(output.output_file.clone())
        .build();
    let (mut config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    // Explicit flags win even when they equal the default.
    if let Some(format) = output.output {
        config.output.format = format;
    }
    for error in config.validate() {
        tracing::warn!("Config: {error}");
    }
    config
}

fn diff_app_config(cli: &Cli, flags: &DiffFlags) -> AppConfig {
    let mut config = load_config(cli, &flags.output);
    if let Some(threshold) = flags.restart_threshold {
        config.diff.restart_threshold = threshold;
    }
    config.behavior.fail_on_change |= flags.fail_on_change;
    config.behavior.fail_on_critical |= flags.fail_on_critical;
    config
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Diff {
            previous,
            current,
            flags,
        } => {
            let config = diff_app_config(&cli, flags);
            cli::run_diff(DiffConfig {
                paths: DiffPaths {
                    previous: previous.clone(),
                    current: current.clone(),
                },
                settings: config.diff,
                output: config.output,
                behavior: config.behavior,
            })
        }

        Commands::DiffLatest { dir, flags } => {
            let config = diff_app_config(&cli, flags);
            cli::run_diff_latest(dir, config.diff, config.output, config.behavior)
        }

        Commands::Categorize {
            snapshot,
            rules,
            explain,
            output,
        } => {
            let config = load_config(&cli, output);
            let rules_file = rules
                .clone()
                .or_else(|| config.categorize.rules_file.clone())
                .context("no rules file given; pass --rules or set categorize.rules_file")?;
            let quiet = config.behavior.quiet;
            cli::run_categorize(
                CategorizeConfig {
                    snapshot: snapshot.clone(),
                    rules_file,
                    explain: *explain,
                    output: config.output,
                },
                quiet,
            )
        }

        Commands::Rules { file, strict } => cli::run_rules(file, *strict, cli.quiet),

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => cli::run_config_show(cli.config.as_deref())?,
                ConfigAction::Path => cli::run_config_path(cli.config.as_deref())?,
                ConfigAction::Init => {
                    let cwd =
                        std::env::current_dir().context("cannot determine current directory")?;
                    cli::run_config_init(&cwd)?;
                }
                ConfigAction::Schema { output } => cli::run_config_schema(output.as_deref())?,
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "snapdiff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_diff_flags() {
        let cli = Cli::try_parse_from([
            "snapdiff",
            "diff",
            "a.json",
            "b.json",
            "-o",
            "json",
            "--fail-on-critical",
            "--restart-threshold",
            "3",
        ])
        .unwrap();
        let Commands::Diff { flags, .. } = cli.command else {
            panic!("expected diff");
        };
        assert_eq!(flags.output.output, Some(ReportFormat::Json));
        assert!(flags.fail_on_critical);
        assert_eq!(flags.restart_threshold, Some(3));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["snapdiff", "rules", "categories.yaml", "-q", "--no-color"])
            .unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
    }
}
