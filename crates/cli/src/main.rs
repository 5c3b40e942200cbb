use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use failtrace_extractor::LinkBuilder;
use failtrace_triage::{JobMetadata, Pipeline, TriageConfig};
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

mod report;

use report::render_markdown;

#[derive(Parser)]
#[command(name = "failtrace")]
#[command(about = "Reduce a failed CI log and list the source files it points at", long_about = None)]
#[command(version)]
struct Cli {
    /// Log file to read (stdin when omitted or `-`)
    log: Option<PathBuf>,

    /// Repository as owner/name (default: $GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// Commit the log was produced for (default: $GITHUB_SHA)
    #[arg(long)]
    sha: Option<String>,

    /// Code host base URL (default: $GITHUB_SERVER_URL or https://github.com)
    #[arg(long)]
    server_url: Option<String>,

    /// Failed job name, for display
    #[arg(long)]
    job: Option<String>,

    /// Failed step name, for display
    #[arg(long)]
    step: Option<String>,

    /// Exit code of the failed step
    #[arg(long, allow_hyphen_values = true)]
    exit_code: Option<i32>,

    /// Job duration in seconds
    #[arg(long)]
    duration: Option<u64>,

    /// Lines kept per failing section (overrides the config file)
    #[arg(long)]
    max_lines: Option<usize>,

    /// TOML configuration file with [reducer] and [extractor] tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Affected files listed in markdown output
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full report: job, cleaned log, affected files, stats
    Json,
    /// Job summary with linked affected files
    Markdown,
    /// Cleaned log only
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    let repo = cli.repo.clone().or_else(|| env_value("GITHUB_REPOSITORY"));
    let sha = cli.sha.clone().or_else(|| env_value("GITHUB_SHA"));
    let server_url = cli.server_url.clone().or_else(|| env_value("GITHUB_SERVER_URL"));
    let links = LinkBuilder::new(server_url.as_deref(), repo.as_deref(), sha.as_deref())
        .context("Invalid repository link settings")?;
    if links.commit().is_none() {
        log::debug!("no commit given, affected files get search links");
    }

    let pipeline = Pipeline::new(config, links)?;
    let job = JobMetadata {
        job_name: cli.job.clone().unwrap_or_default(),
        step_name: cli.step.clone().unwrap_or_default(),
        exit_code: cli.exit_code,
        duration_seconds: cli.duration,
        repository: repo,
        commit: sha,
    };

    let raw = read_log(&cli)?;
    let report = pipeline
        .run_bytes(&raw, &job)
        .context("Failed to process log")?;

    let rendered = match cli.format {
        OutputFormat::Json => report.to_json().context("Failed to serialize report")?,
        OutputFormat::Markdown => render_markdown(&report, cli.limit),
        OutputFormat::Clean => report.cleaned_log.clone(),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end()).context("Failed to write output")?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<TriageConfig> {
    let mut config = match &cli.config {
        Some(path) => TriageConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TriageConfig::default(),
    };
    if let Some(max_lines) = cli.max_lines {
        config.reducer.max_lines_per_section = max_lines;
    }
    Ok(config)
}

fn read_log(cli: &Cli) -> Result<Vec<u8>> {
    match &cli.log {
        Some(path) if path.as_os_str() != "-" => {
            fs::read(path).with_context(|| format!("Failed to read log from {}", path.display()))
        }
        _ => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read log from stdin")?;
            Ok(buffer)
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
