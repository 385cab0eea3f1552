//! @ai:module:intent CLI entry point for syncing coding standards into AI tool configs
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on pipeline, config, output

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use standards_sync::{
    output, Error, OutputFormat, SyncConfig, SyncPipeline, Tool, DEFAULT_CONFIG_FILE,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "standards-sync")]
#[command(author, version, about = "Sync a coding standards document into AI assistant configurations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args)]
struct GlobalArgs {
    /// Path to the standards document (overrides config)
    #[arg(long, global = true)]
    context: Option<PathBuf>,

    /// Configuration file (defaults to standards-sync.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root directory for generated files (overrides config)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Comma-separated tool roster in merge order (overrides config)
    #[arg(long, global = true, value_enum, value_delimiter = ',')]
    tools: Vec<Tool>,

    /// Preview generated files without writing them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Show debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, transform, validate and write tool configurations (default)
    Sync,

    /// Print the rules extracted from the standards document
    Rules {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Write a default configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(cli.global.verbose) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }

    let result = match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => load_config(&cli.global)
            .and_then(|config| run_sync(SyncPipeline::new(config, cli.global.dry_run))),
        Commands::Rules { format } => load_config(&cli.global)
            .and_then(|config| run_rules(SyncPipeline::new(config, true), format)),
        Commands::Init { output, force } => run_init(output, force),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {} stage failed: {}", "✗".red().bold(), e.stage(), e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("standards_sync={}", level).parse()?),
        )
        .init();
    Ok(())
}

/// @ai:intent Load configuration and apply command-line overrides
/// @ai:effects fs:read
fn load_config(args: &GlobalArgs) -> Result<SyncConfig, Error> {
    let mut config = SyncConfig::load_or_default(args.config.as_deref())?;

    if let Some(context) = &args.context {
        config.paths.context = context.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.paths.output_dir = output_dir.clone();
    }
    if !args.tools.is_empty() {
        config.tools = args.tools.clone();
    }

    Ok(config)
}

/// @ai:intent Run all stages, printing progress after each
/// @ai:effects fs:read, fs:write, io
fn run_sync(pipeline: SyncPipeline) -> Result<(), Error> {
    let config = pipeline.config();
    if pipeline.is_dry_run() {
        println!("{}", "DRY RUN: no files will be written".yellow().bold());
    }

    println!("{} Parsing {}", "[1/4]".bold(), config.paths.context.display());
    let rules = pipeline.parse()?;
    println!("  Found {} rules", rules.len());
    print!("{}", output::format_rules_summary(&rules));

    println!("{} Transforming for {} tools", "[2/4]".bold(), config.tools.len());
    let files = pipeline.transform(&rules)?;
    for path in files.keys() {
        println!("  - {}", path);
    }

    println!("{} Validating {} files", "[3/4]".bold(), files.len());
    let report = pipeline.validate(&files);
    print!("{}", output::format_validation_report(&report, OutputFormat::Text));
    if !report.passed() {
        return Err(Error::Validation {
            errors: report.errors,
            warnings: report.warnings,
        });
    }

    if pipeline.is_dry_run() {
        println!("{} Preview", "[4/4]".bold());
        print!("{}", output::format_dry_run(&files));
        println!(
            "\n{} Dry run complete: {} rules, {} files",
            "✓".green().bold(),
            rules.len(),
            files.len()
        );
        return Ok(());
    }

    println!("{} Writing to {}", "[4/4]".bold(), config.paths.output_dir.display());
    let written = pipeline.write(&files)?;
    print!("{}", output::format_written(&written));
    println!(
        "\n{} Synced {} rules into {} files",
        "✓".green().bold(),
        rules.len(),
        written.len()
    );

    Ok(())
}

/// @ai:effects fs:read, io
fn run_rules(pipeline: SyncPipeline, format: Format) -> Result<(), Error> {
    let rules = pipeline.parse()?;
    println!("{}", output::format_rules(&rules, format.into()));
    Ok(())
}

/// @ai:effects fs:write, io
fn run_init(output: PathBuf, force: bool) -> Result<(), Error> {
    if output.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )));
    }

    SyncConfig::default().save(&output)?;
    println!("{} Created {}", "✓".green().bold(), output.display());
    Ok(())
}
