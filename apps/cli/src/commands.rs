//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use invtag_core::pipeline::{self, PipelineConfig, PipelineResult, ProgressReporter};
use invtag_core::stages::{STAGES, StageSpec, find_stage};
use invtag_core::tagger::{self, TagOutcome};
use invtag_shared::{AppConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Incremental status tagging for the master inventory table.
#[derive(Parser)]
#[command(
    name = "invtag",
    version,
    about = "Annotate the master inventory table with status columns derived from reference exports.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run a single tagging stage against the table.
    Tag {
        /// Stage name (see `invtag stages`).
        stage: String,

        /// Table file (defaults to the configured master table).
        table: Option<PathBuf>,

        /// Reference export (defaults to the stage's file in the data directory).
        reference: Option<PathBuf>,
    },

    /// Run every tagging stage in pipeline order.
    Run {
        /// Data directory (defaults to the configured one).
        data_dir: Option<PathBuf>,
    },

    /// List the pipeline stages.
    Stages,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "invtag=info",
        1 => "invtag=debug",
        _ => "invtag=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tag {
            stage,
            table,
            reference,
        } => cmd_tag(&stage, table, reference),
        Command::Run { data_dir } => cmd_run(data_dir),
        Command::Stages => cmd_stages(),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_tag(stage_name: &str, table: Option<PathBuf>, reference: Option<PathBuf>) -> Result<()> {
    let stage = find_stage(stage_name).ok_or_else(|| {
        eyre!("unknown stage '{stage_name}'. Run `invtag stages` to list the pipeline stages.")
    })?;

    let config = load_config()?;
    let table_path = table.unwrap_or_else(|| config.table_path());
    let reference_path = reference.unwrap_or_else(|| config.reference_path(stage.reference_file));

    info!(
        stage = stage.name,
        table = %table_path.display(),
        reference = %reference_path.display(),
        "tagging status column"
    );

    let outcome = tagger::tag(stage, &table_path, &reference_path)?;
    print_outcome(&outcome);

    Ok(())
}

fn cmd_run(data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let pipeline_config = PipelineConfig {
        data_dir: data_dir.unwrap_or_else(|| PathBuf::from(&config.defaults.data_dir)),
        table_file: config.defaults.table_file.clone(),
    };

    info!(data_dir = %pipeline_config.data_dir.display(), "running tagging pipeline");

    let reporter = CliProgress::new();
    let result = pipeline::run_pipeline(&pipeline_config, &reporter)?;

    let rows = result.outcomes.last().map_or(0, |o| o.rows_tagged);

    println!();
    println!("  Inventory table tagged!");
    println!("  Table:  {}", pipeline_config.table_path().display());
    println!("  Stages: {}", result.outcomes.len());
    println!("  Rows:   {rows}");
    println!("  Time:   {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_stages() -> Result<()> {
    println!("Pipeline stages, in execution order:");
    println!();
    for (i, stage) in STAGES.iter().enumerate() {
        println!("  {:>2}. {:<26} {}", i + 1, stage.name, stage.column);
        println!("      anchors:   {}", stage.anchors.join(", "));
        println!("      reference: {}", stage.reference_file);
    }
    println!();
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

/// One-line summary of a tagging operation.
fn print_outcome(outcome: &TagOutcome) {
    if outcome.updated {
        println!(
            "Updated '{}' with '{}' column using {} reference computer names.",
            outcome.table_path.display(),
            outcome.column,
            outcome.reference_keys
        );
    } else {
        println!(
            "Table '{}' has no rows; nothing to tag.",
            outcome.table_path.display()
        );
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn stage_started(&self, stage: &StageSpec, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Tagging [{current}/{total}] {}", stage.column));
    }

    fn stage_finished(&self, _stage: &StageSpec, _outcome: &TagOutcome) {}

    fn done(&self, _result: &PipelineResult) {
        self.spinner.finish_and_clear();
    }
}
