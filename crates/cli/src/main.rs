mod echo;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};

use aranea_core::{
    CancellationToken, Extractor, FetchConfig, MapReport, MapperConfig, SiteMapper, mirror_map,
    patterns,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Map a website and mine pattern-matched data from its pages
#[derive(Parser, Debug)]
#[command(name = "aranea")]
#[command(author = "Aranea Contributors")]
#[command(version = VERSION)]
#[command(about = "Map a website and mine pattern-matched data from its pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the map of pages reachable from a root URL
    Map(MapArgs),
    /// Map a site and extract pattern-matched text from its pages
    Extract(ExtractArgs),
}

/// Options shared by every traversal.
#[derive(Args, Debug)]
struct CrawlArgs {
    /// Root URL to start from
    #[arg(value_name = "URL")]
    url: String,

    /// Greatest link depth to follow (default: unlimited)
    #[arg(short, long, value_name = "N")]
    depth: Option<usize>,

    /// Follow links that leave the root's domain
    #[arg(long)]
    follow_external: bool,

    /// Number of concurrent fetches
    #[arg(long, default_value = "8", value_name = "N")]
    jobs: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Report pages as they are visited
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct MapArgs {
    #[command(flatten)]
    crawl: CrawlArgs,

    /// Write the map as a JSON object of url -> children
    #[arg(long)]
    json: bool,

    /// Mirror every fetched page under --path
    #[arg(long)]
    copy: bool,

    /// Directory that receives the mirrored pages
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    path: PathBuf,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("patterns")
        .args(["email", "phone", "regex"])
        .multiple(true)
        .required(true)
))]
struct ExtractArgs {
    #[command(flatten)]
    crawl: CrawlArgs,

    /// Extract email addresses
    #[arg(long)]
    email: bool,

    /// Extract phone numbers
    #[arg(long)]
    phone: bool,

    /// Extract matches of the given regular expression or alias
    /// (`email`, `phone`); repeatable
    #[arg(short, long, value_name = "PATTERN")]
    regex: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Map(args) => run_map(args).await,
        Command::Extract(args) => run_extract(args).await,
    }
}

async fn run_map(args: MapArgs) -> anyhow::Result<()> {
    let report = crawl(&args.crawl).await?;

    if args.json {
        let json = report.pages.to_json().context("Failed to encode the map")?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        for url in report.pages.urls() {
            println!("{url}");
        }
    }

    if args.copy {
        let written = mirror_map(&report.pages, &args.path)
            .with_context(|| format!("Failed to mirror into {}", args.path.display()))?;
        echo::print_success(&format!("Mirrored {} pages under {}", written, args.path.display()));
    }

    Ok(())
}

async fn run_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let mut selected: Vec<&str> = Vec::new();
    if args.email {
        selected.push(patterns::EMAIL);
    }
    if args.phone {
        selected.push(patterns::PHONE_NUMBER);
    }
    selected.extend(
        args.regex
            .iter()
            .map(|pattern| patterns::resolve(pattern).unwrap_or(pattern.as_str())),
    );

    // A bad pattern has to abort before the first fetch.
    let extractor = Extractor::new(&selected).context("Invalid extraction pattern")?;

    let report = crawl(&args.crawl).await?;
    let found = extractor.extract(&report.pages);

    for item in &found {
        println!("{item}");
    }

    Ok(())
}

/// Runs a traversal with the shared crawl options, reporting failures on
/// stderr and stopping early on Ctrl-C.
async fn crawl(args: &CrawlArgs) -> anyhow::Result<MapReport> {
    anyhow::ensure!(args.jobs > 0, "--jobs must be at least 1");

    let config = MapperConfig {
        max_depth: args.depth,
        follow_external: args.follow_external,
        concurrency: args.jobs,
        fetch: FetchConfig { timeout: args.timeout, ..Default::default() },
    };

    let mut mapper = SiteMapper::new(config).context("Failed to set up the crawler")?;
    if args.verbose {
        echo::print_banner();
        mapper = mapper.with_progress(Arc::new(echo::EchoProgress));
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            echo::print_warning("Interrupted, keeping what was mapped so far");
            interrupt.cancel();
        }
    });

    let report = mapper
        .run_with_cancel(&args.url, cancel)
        .await
        .with_context(|| format!("Failed to map '{}'", args.url))?;

    for failure in &report.failures {
        echo::print_warning(&format!("could not map '{}': {}", failure.url, failure.error));
    }

    Ok(report)
}
