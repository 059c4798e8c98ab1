use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use searchunused::config::Config;
use searchunused::corpus::{CorpusBuilder, Passes};
use searchunused::patterns::SymbolExclusions;
use searchunused::report::{write_deletion_list, Report, ReportFormat, Reporter};
use searchunused::resolve::{AssetResolver, SymbolResolver};

/// SearchUnused - find unreferenced image assets and types in Swift projects
#[derive(Parser, Debug)]
#[command(name = "searchunused")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path substrings to exclude, case-insensitive (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Names never reported, e.g. "*Cell" (can be specified multiple times)
    #[arg(short, long)]
    retain: Vec<String>,

    /// Which detection passes to run
    #[arg(long, value_enum, default_value = "all")]
    detect: Detect,

    /// Output format (defaults to the config file's report.format)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write unreferenced type names, one per line, to this file
    #[arg(long, value_name = "FILE")]
    deletion_list: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum Detect {
    #[default]
    All,
    Assets,
    Symbols,
}

impl From<Detect> for Passes {
    fn from(detect: Detect) -> Self {
        match detect {
            Detect::All => Passes::all(),
            Detect::Assets => Passes::assets_only(),
            Detect::Symbols => Passes::symbols_only(),
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Terminal,
    Json,
    Ndjson,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Ndjson => ReportFormat::Ndjson,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("SearchUnused v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    run_analysis(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if !cli.retain.is_empty() {
        config.retain_patterns.extend(cli.retain.clone());
    }

    Ok(config)
}

fn report_format(config: &Config, cli: &Cli) -> Result<ReportFormat> {
    match cli.format {
        Some(format) => Ok(format.into()),
        None => ReportFormat::parse(&config.report.format)
            .ok_or_else(|| miette::miette!("Unknown report format in config: {}", config.report.format)),
    }
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} types")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<()> {
    let start_time = Instant::now();
    let format = report_format(config, cli)?;

    // Step 1: Walk the tree and freeze the corpus
    info!("Scanning {}...", cli.path.display());
    let corpus = CorpusBuilder::new(config)
        .with_passes(cli.detect.into())
        .build(&cli.path)
        .into_diagnostic()?;

    // Step 2: Resolve asset names
    let asset_results = if corpus.passes.assets {
        info!("Resolving {} asset names...", corpus.assets.len());
        AssetResolver::new(&corpus.search).resolve_all(&corpus.assets)
    } else {
        Vec::new()
    };

    // Step 3: Resolve symbols
    let exclusions = SymbolExclusions::new(&config.symbols);
    let symbol_results = if corpus.passes.symbols {
        info!("Resolving {} declared types...", corpus.symbols.len());
        let pb = progress_bar(cli.quiet);
        let results = SymbolResolver::new(&corpus.search, &exclusions)
            .resolve_all(&corpus.symbols, &pb);
        pb.finish_and_clear();
        results
    } else {
        Vec::new()
    };

    // Step 4: Report results
    let report = Report::build(&corpus, &asset_results, &symbol_results, config);
    info!(
        "Found {} unreferenced assets, {} unreferenced types",
        report.unreferenced_assets.len(),
        report.unreferenced_symbols.len()
    );

    Reporter::new(format, cli.output.clone()).report(&report)?;

    if let Some(path) = &cli.deletion_list {
        write_deletion_list(&report, path)?;
        info!("Deletion list written to {}", path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}
