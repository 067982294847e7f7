//! sbom-merge: merge per-tool SPDX SBOMs into one document
//!
//! Several generators scan the same directory; this tool reconciles their
//! files, packages and external references into a single SPDX 2.2 document.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_merge::{
    cli,
    config::{self, AppConfig, CliOverrides, MergeCommandConfig},
    pipeline::{exit_codes, ToolInput},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Formats:",
        "\n  SPDX: 2.2, 2.3 (JSON, tag-value)",
        "\n\nOutput Format:",
        "\n  SPDX 2.2 JSON"
    )
}

#[derive(Parser)]
#[command(name = "sbom-merge")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Merge per-tool SPDX SBOMs into one document", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Merged document written
    1  Error occurred

EXAMPLES:
    # Merge three generators' output for the same checkout
    sbom-merge merge --scan-dir . \\
        --input k8s-bom=out/k8s-bom.spdx \\
        --input syft=out/syft.spdx.json \\
        --input trivy=out/trivy.spdx.json -O merged.spdx.json

    # Deterministic, compact output for diffing in CI
    sbom-merge merge --scan-dir . --input syft=syft.json --sort --compact")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `merge` subcommand
#[derive(Parser)]
struct MergeArgs {
    /// Directory the SBOM generators scanned
    #[arg(long, default_value = ".")]
    scan_dir: PathBuf,

    /// Tool SBOM as TOOL=PATH (repeatable; order decides first-seen precedence)
    #[arg(short, long = "input", value_name = "TOOL=PATH", required = true)]
    inputs: Vec<ToolInput>,

    /// Tool whose file records take precedence
    #[arg(long, env = "SBOM_MERGE_AUTHORITATIVE_TOOL")]
    authoritative_tool: Option<String>,

    /// Sort creators, files, packages and external references by stable keys
    /// (tool attributions in reference comments keep input order)
    #[arg(long)]
    sort: bool,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge per-tool SBOMs into one document
    Merge(MergeArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-merge.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
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

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge(args) => {
            let overrides = CliOverrides {
                authoritative_tool: args.authoritative_tool,
                sort_output: args.sort,
                output_file: args.output_file,
                compact: args.compact,
            };
            let (app, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = &loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }

            let config = MergeCommandConfig {
                scan_dir: args.scan_dir,
                inputs: args.inputs,
                app,
                quiet: cli.quiet,
            };
            cli::run_merge(config)?;
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-merge", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema =
                config::generate_json_schema().context("failed to serialize config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("sbom-merge").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".sbom-merge.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
