//! Domain Scout CLI Application
//!
//! Generates candidate domain names from a keyword configuration, checks their
//! availability over RDAP, and ranks the available ones. Each stage is its own
//! subcommand; `pipeline` runs all three.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use domain_scout_lib::config::{parse_seconds, parse_timeout_string};
use domain_scout_lib::utils::{is_well_formed_domain, read_check_records, read_domain_list};
use domain_scout_lib::{
    expand_domain_inputs, generate_candidates, load_env_config, rank_domains,
    AvailabilityVerifier, CheckConfig, CheckResult, ConfigManager, DomainScoutError, EnvConfig,
    ScoutConfig, VerifyOutcome,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use chrono::Local;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-scout
#[derive(Parser, Debug)]
#[command(name = "domain-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate, check and rank domain name candidates")]
#[command(
    long_about = "Generate candidate domain names from keyword categories, check their availability over RDAP, and rank the available ones by a configurable score.\n\nRun the stages one by one (generate, check, rank) or all at once with `pipeline`."
)]
#[command(styles = STYLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Use specific config file instead of automatic discovery
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Configuration"
    )]
    pub config: Option<PathBuf>,

    /// Verbose logging (debug level, to stderr)
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        help_heading = "Configuration"
    )]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate candidate names from the keyword configuration
    Generate(GenerateArgs),
    /// Check domain availability over RDAP
    Check(CheckArgs),
    /// Score and rank available domains
    Rank(RankArgs),
    /// Generate, check and rank in one run
    Pipeline(PipelineArgs),
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// Output file (prints to stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum number of candidates (overrides config)
    #[arg(short = 'm', long = "max-domains", value_name = "N")]
    pub max_domains: Option<usize>,

    /// Seed for reproducible sampling when the cap is exceeded
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = ListFormat::Txt)]
    pub format: ListFormat,
}

#[derive(ClapArgs, Debug)]
pub struct CheckArgs {
    /// Domain names to check (bare names or FQDNs)
    #[arg(value_name = "DOMAINS", help_heading = "Domain Selection")]
    pub domains: Vec<String>,

    /// Input file with domains (one per line, '#' comments allowed)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Domain Selection"
    )]
    pub file: Option<PathBuf>,

    /// TLDs for bare names (comma-separated or multiple -t flags)
    #[arg(short = 't', long = "tld", value_name = "TLD", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "Domain Selection")]
    pub tlds: Option<Vec<String>>,

    /// Skip domains that are not well-formed before checking
    #[arg(long = "validate", help_heading = "Domain Selection")]
    pub validate: bool,

    #[command(flatten)]
    pub verifier: VerifierArgs,

    /// Output file (format inferred from .csv/.md unless --format is given)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output Format"
    )]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, help_heading = "Output Format")]
    pub format: Option<OutputFormat>,

    /// Only show available domains
    #[arg(long = "only-free", help_heading = "Output Format")]
    pub only_free: bool,
}

#[derive(ClapArgs, Debug)]
pub struct RankArgs {
    /// Check results (CSV) or a plain domain list
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        default_value = "available_domains.csv"
    )]
    pub input: PathBuf,

    /// Output CSV for the full ranking
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "ranked_domains.csv"
    )]
    pub output: PathBuf,

    /// Comma-separated keywords to boost (added as the "custom" category)
    #[arg(short = 'k', long = "keywords", value_name = "WORDS", value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,

    /// Bonus points for --keywords matches
    #[arg(long = "keyword-bonus", value_name = "N", default_value_t = 15)]
    pub keyword_bonus: i64,

    /// Show only the top N results
    #[arg(short = 'n', long = "top", value_name = "N", default_value_t = 50)]
    pub top: usize,

    /// Drop domains with more than N syllables
    #[arg(short = 'm', long = "max-syllables", value_name = "N")]
    pub max_syllables: Option<u32>,

    /// Suppress the console table
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(ClapArgs, Debug)]
pub struct PipelineArgs {
    /// Directory for domains.txt, results.csv and ranked_domains.csv
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Maximum number of candidates (overrides config)
    #[arg(short = 'm', long = "max-domains", value_name = "N")]
    pub max_domains: Option<usize>,

    /// Seed for reproducible sampling when the cap is exceeded
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub verifier: VerifierArgs,

    /// Show only the top N results
    #[arg(short = 'n', long = "top", value_name = "N", default_value_t = 50)]
    pub top: usize,
}

/// Verifier tuning shared by `check` and `pipeline`.
#[derive(ClapArgs, Debug, Default)]
pub struct VerifierArgs {
    /// Concurrent workers (default: 6, max: 100)
    #[arg(short = 'w', long = "workers", value_name = "N", help_heading = "Performance")]
    pub workers: Option<usize>,

    /// Seconds between requests, across all workers (default: 0.1)
    #[arg(long = "rate-limit", value_name = "SECS", help_heading = "Performance")]
    pub rate_limit: Option<String>,

    /// Per-request timeout, e.g. 5s or 1m (default: 5s)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Retries after a transport failure (default: 1)
    #[arg(long = "retries", value_name = "N", help_heading = "Performance")]
    pub retries: Option<u32>,

    /// Write the results that finished before an interrupt
    #[arg(long = "keep-partial", help_heading = "Performance")]
    pub keep_partial: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFormat {
    /// One domain per line, TLD appended per domain_settings
    Txt,
    /// `domain` header followed by bare names
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Infer a file format from its extension; CSV unless it ends in .md.
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("markdown") => OutputFormat::Markdown,
            Some("txt") => OutputFormat::Console,
            _ => OutputFormat::Csv,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Console => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Markdown => "md",
        }
    }

    /// Render check results as file content in this format.
    fn render(self, results: &[CheckResult], only_free: bool) -> String {
        match self {
            OutputFormat::Console => {
                let mut text = ui::format_check_console(results, only_free);
                if !text.is_empty() {
                    text.push('\n');
                }
                text
            }
            OutputFormat::Csv => ui::format_check_csv(results, only_free),
            OutputFormat::Markdown => {
                ui::format_check_markdown(results, only_free, &Local::now())
            }
        }
    }
}

/// Where interrupted checks leave their finished results.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PartialOutput {
    path: PathBuf,
    format: OutputFormat,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Send logs to stderr. `-v` forces debug for our crates; otherwise RUST_LOG
/// applies, defaulting to warn.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,domain_scout=debug,domain_scout_lib=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    match &args.command {
        Command::Generate(a) => {
            validate_max_domains(a.max_domains)?;
        }
        Command::Check(a) => {
            if a.domains.is_empty() && a.file.is_none() {
                return Err(
                    "You must specify domain names or a file with --file".to_string(),
                );
            }
            validate_verifier(&a.verifier)?;
        }
        Command::Rank(a) => {
            if a.top == 0 {
                return Err("--top must be at least 1".to_string());
            }
            if a.max_syllables == Some(0) {
                return Err("--max-syllables must be at least 1".to_string());
            }
            if matches!(&a.keywords, Some(words) if words.iter().all(|w| w.trim().is_empty())) {
                return Err("--keywords needs at least one word".to_string());
            }
        }
        Command::Pipeline(a) => {
            validate_max_domains(a.max_domains)?;
            validate_verifier(&a.verifier)?;
            if a.top == 0 {
                return Err("--top must be at least 1".to_string());
            }
        }
    }
    Ok(())
}

fn validate_max_domains(max_domains: Option<usize>) -> Result<(), String> {
    if max_domains == Some(0) {
        return Err("--max-domains must be at least 1".to_string());
    }
    Ok(())
}

fn validate_verifier(args: &VerifierArgs) -> Result<(), String> {
    if let Some(workers) = args.workers {
        if workers == 0 || workers > 100 {
            return Err("Workers must be between 1 and 100".to_string());
        }
    }
    if let Some(rate) = &args.rate_limit {
        if parse_seconds(rate).is_none() {
            return Err(format!(
                "Invalid --rate-limit '{}', use seconds like '0.1'",
                rate
            ));
        }
    }
    if let Some(timeout) = &args.timeout {
        match parse_timeout_string(timeout) {
            Some(secs) if secs > 0 => {}
            _ => {
                return Err(format!(
                    "Invalid --timeout '{}', use format like '5s', '30s', '2m'",
                    timeout
                ))
            }
        }
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let env_config = load_env_config();

    match &args.command {
        Command::Generate(a) => run_generate(&args, a, &env_config),
        Command::Check(a) => run_check(a, &env_config).await,
        Command::Rank(a) => run_rank(&args, a, &env_config),
        Command::Pipeline(a) => run_pipeline(&args, a, &env_config).await,
    }
}

/// Load the configuration document: --config, then DS_CONFIG, then discovery.
fn load_scout_config(args: &Args, env_config: &EnvConfig) -> Result<ScoutConfig, DomainScoutError> {
    let explicit = args
        .config
        .clone()
        .or_else(|| env_config.config.as_ref().map(PathBuf::from));
    ConfigManager::new().load(explicit.as_deref())
}

/// Defaults, then DS_* environment, then command-line flags.
fn build_check_config(args: &VerifierArgs, env_config: &EnvConfig) -> CheckConfig {
    let mut config = env_config.apply(CheckConfig::default());

    if let Some(workers) = args.workers {
        config = config.with_concurrency(workers);
    }
    if let Some(rate) = args.rate_limit.as_deref().and_then(parse_seconds) {
        config = config.with_rate_limit(rate);
    }
    if let Some(secs) = args.timeout.as_deref().and_then(parse_timeout_string) {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = args.retries {
        config = config.with_retry_count(retries);
    }

    config
}

fn write_file(path: &Path, content: &str) -> Result<(), DomainScoutError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            DomainScoutError::file_error(parent.to_string_lossy(), e.to_string())
        })?;
    }
    fs::write(path, content)
        .map_err(|e| DomainScoutError::file_error(path.to_string_lossy(), e.to_string()))
}

fn lines_to_text<I: IntoIterator<Item = String>>(lines: I) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

// ── generate ─────────────────────────────────────────────────────────────────

fn run_generate(
    args: &Args,
    opts: &GenerateArgs,
    env_config: &EnvConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_scout_config(args, env_config)?;
    if let Some(max) = opts.max_domains {
        config.generation.max_domains = max;
    }

    let result = generate_candidates(&config, opts.seed);
    let content = match opts.format {
        ListFormat::Txt => lines_to_text(
            result
                .names
                .iter()
                .map(|n| config.domain_settings.qualify(n)),
        ),
        ListFormat::Csv => lines_to_text(
            std::iter::once("domain".to_string()).chain(result.names.iter().cloned()),
        ),
    };

    if result.sampled {
        eprintln!(
            "Limited output to {} domains (generated {} total)",
            result.names.len(),
            result.total_generated
        );
    }

    match &opts.output {
        Some(path) => {
            write_file(path, &content)?;
            eprintln!(
                "Generated {} domains, saved to {}",
                result.names.len(),
                path.display()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

// ── check ────────────────────────────────────────────────────────────────────

async fn run_check(
    check: &CheckArgs,
    env_config: &EnvConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut inputs = check.domains.clone();
    if let Some(file) = &check.file {
        inputs.extend(read_domain_list(file)?);
    }

    let tlds = check.tlds.clone().unwrap_or_default();
    let mut domains = expand_domain_inputs(&inputs, &tlds);
    if check.validate {
        domains = keep_well_formed(domains);
        println!("Validated {} domains", domains.len());
    }
    if domains.is_empty() {
        return Err("No domains to check".into());
    }

    let config = build_check_config(&check.verifier, env_config);
    let format = check.format.unwrap_or_else(|| {
        check
            .output
            .as_deref()
            .map(OutputFormat::from_path)
            .unwrap_or(OutputFormat::Console)
    });

    let partial = check
        .verifier
        .keep_partial
        .then(|| partial_output(check.output.as_deref(), format));

    let started = Instant::now();
    let results = verify(&domains, config, partial.as_ref(), check.only_free).await?;
    let elapsed = started.elapsed();

    let rendered = format.render(&results, check.only_free);

    match &check.output {
        Some(path) => {
            write_file(path, &rendered)?;
            ui::print_check_summary(&results, elapsed);
            println!("Results saved to: {}", path.display());
        }
        None if format == OutputFormat::Console => {
            ui::print_check_results(&results, check.only_free);
            if results.len() > 1 {
                println!();
                ui::print_check_summary(&results, elapsed);
            }
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Drop malformed domains, warning about each one.
fn keep_well_formed(domains: Vec<String>) -> Vec<String> {
    domains
        .into_iter()
        .filter(|domain| {
            let ok = is_well_formed_domain(domain);
            if !ok {
                eprintln!("Warning: Invalid domain format: {}", domain);
            }
            ok
        })
        .collect()
}

/// Partial results go to the output file when there is one, otherwise to
/// `partial_results.<ext>`, written in the same format as the full results.
fn partial_output(output: Option<&Path>, format: OutputFormat) -> PartialOutput {
    PartialOutput {
        path: output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(format!("partial_results.{}", format.extension()))),
        format,
    }
}

/// Watch channel that flips to `true` on Ctrl-C.
fn abort_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping checks");
            let _ = tx.send(true);
        }
    });
    rx
}

/// Run the verifier and return results in input order.
///
/// On interrupt, the finished results are written to `partial` (when given)
/// and an `Interrupted` error is returned.
async fn verify(
    domains: &[String],
    config: CheckConfig,
    partial: Option<&PartialOutput>,
    only_free: bool,
) -> Result<Vec<CheckResult>, Box<dyn std::error::Error>> {
    info!(
        domains = domains.len(),
        workers = config.concurrency,
        "checking availability"
    );
    let verifier = AvailabilityVerifier::rdap(config)?;

    match verifier
        .check_domains_with_abort(domains, abort_on_ctrl_c())
        .await?
    {
        VerifyOutcome::Completed(results) => Ok(in_input_order(domains, results)),
        VerifyOutcome::Interrupted { completed, pending } => {
            let checked = completed.len();
            if let Some(out) = partial {
                let finished = in_input_order(domains, completed);
                write_file(&out.path, &out.format.render(&finished, only_free))?;
                eprintln!("Partial results saved to: {}", out.path.display());
            }
            Err(Box::new(DomainScoutError::Interrupted {
                completed: checked,
                pending,
            }))
        }
    }
}

/// Reorder results to follow the input list.
fn in_input_order(domains: &[String], results: Vec<CheckResult>) -> Vec<CheckResult> {
    let mut by_domain: HashMap<String, CheckResult> = results
        .into_iter()
        .map(|r| (r.domain.clone(), r))
        .collect();
    domains.iter().filter_map(|d| by_domain.remove(d)).collect()
}

// ── rank ─────────────────────────────────────────────────────────────────────

fn run_rank(
    args: &Args,
    rank: &RankArgs,
    env_config: &EnvConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_scout_config(args, env_config)?;
    if let Some(words) = &rank.keywords {
        config = config.with_custom_keywords(words.clone(), rank.keyword_bonus);
    }

    let records = read_check_records(&rank.input)?;
    let max_syllables = rank.max_syllables.or(config.generation.max_syllables);
    let ranked = rank_domains(&records, &config, max_syllables);

    write_file(&rank.output, &ui::format_ranked_csv(&ranked))?;

    if !rank.quiet {
        ui::print_ranked_table(&ranked, rank.top);
        println!();
        println!("Rankings saved to: {}", rank.output.display());
    }

    Ok(())
}

// ── pipeline ─────────────────────────────────────────────────────────────────

async fn run_pipeline(
    args: &Args,
    pipe: &PipelineArgs,
    env_config: &EnvConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_scout_config(args, env_config)?;
    if let Some(max) = pipe.max_domains {
        config.generation.max_domains = max;
    }

    let generated = generate_candidates(&config, pipe.seed);
    let domains = expand_domain_inputs(
        &generated.names,
        &[config.domain_settings.default_tld.clone()],
    );
    let dir = &pipe.output_dir;
    write_file(&dir.join("domains.txt"), &lines_to_text(domains.iter().cloned()))?;
    println!(
        "Generated {} domains ({} before cap)",
        domains.len(),
        generated.total_generated
    );

    let check_config = build_check_config(&pipe.verifier, env_config);
    let results_path = dir.join("results.csv");
    let partial = pipe
        .verifier
        .keep_partial
        .then(|| partial_output(Some(&results_path), OutputFormat::Csv));

    let started = Instant::now();
    let results = verify(&domains, check_config, partial.as_ref(), false).await?;
    write_file(&results_path, &ui::format_check_csv(&results, false))?;
    ui::print_check_summary(&results, started.elapsed());

    let ranked = rank_domains(&results, &config, config.generation.max_syllables);
    let ranked_path = dir.join("ranked_domains.csv");
    write_file(&ranked_path, &ui::format_ranked_csv(&ranked))?;

    println!();
    ui::print_ranked_table(&ranked, pipe.top);
    println!();
    println!("Output saved to: {}", dir.display());

    Ok(())
}
