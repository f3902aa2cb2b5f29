//! chatblocks command line entry point
//!
//! Reads agent text from a file or stdin and prints the render decision as
//! JSON, optionally enriching a server directory with registration snippets.

use chatblocks::config::ReplyConfig;
use chatblocks::detect::detect_server_list;
use chatblocks::directory::{format_directory_reply, DirectoryScraper};
use chatblocks::enrich::{ConfigResolver, HttpDocumentSource};
use chatblocks::error::ReplyResult;
use chatblocks::observability::init_default_logging;
use chatblocks::render::render_reply;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["chatblocks.toml", "config/chatblocks.toml"];

/// Agent reply post-processing
#[derive(Parser)]
#[command(name = "chatblocks")]
#[command(about = "Turn agent replies into render blocks and structured payloads")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "CHATBLOCKS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the render decision for an agent reply as JSON
    Render {
        /// Reply text file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Look up registration snippets for every server in a directory reply
    Enrich {
        /// Reply text file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Fetch the server directory and print it as an agent reply
    Directory,
    /// Validate configuration
    Config {
        /// Show the effective configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Render { file } => run_render(file.as_deref()),
        Commands::Enrich { file } => run_enrich(&config, file.as_deref()).await,
        Commands::Directory => run_directory(&config).await,
        Commands::Config { show } => run_config(&config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_configuration(path: Option<&Path>) -> ReplyResult<ReplyConfig> {
    if let Some(path) = path {
        info!("Loading configuration from: {}", path.display());
        return Ok(ReplyConfig::load_from_file(path)?);
    }

    for candidate in DEFAULT_CONFIG_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            info!("Loading configuration from: {}", path.display());
            return Ok(ReplyConfig::load_from_file(path)?);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(ReplyConfig::default())
}

fn read_input(file: Option<&Path>) -> ReplyResult<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run_render(file: Option<&Path>) -> ReplyResult<()> {
    let text = read_input(file)?;
    let reply = render_reply(&text);
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

async fn run_enrich(config: &ReplyConfig, file: Option<&Path>) -> ReplyResult<()> {
    let text = read_input(file)?;
    let Some(entries) = detect_server_list(&text) else {
        info!("Reply contains no server directory, nothing to enrich");
        return Ok(());
    };

    let source = HttpDocumentSource::from_config(&config.http)?;
    let resolver = ConfigResolver::new(
        source,
        config.docs_locator(),
        config.docs.config_key.clone(),
    );

    let mut lookups = Box::pin(resolver.resolve_as_completed(&entries));
    while let Some((index, lookup)) = lookups.next().await {
        let entry = &entries[index];
        let line = json!({
            "index": index,
            "name": entry.name,
            "link": entry.link,
            "config": lookup,
        });
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(())
}

async fn run_directory(config: &ReplyConfig) -> ReplyResult<()> {
    let source = HttpDocumentSource::from_config(&config.http)?;
    let scraper = DirectoryScraper::new(source, config.directory.source_url.clone());

    let entries = scraper.fetch_entries().await;
    println!(
        "{}",
        format_directory_reply(&entries, &config.directory.repo_url)
    );
    Ok(())
}

fn run_config(config: &ReplyConfig, show: bool) -> ReplyResult<()> {
    config.validate()?;
    info!("Configuration is valid");

    if show {
        println!("{}", toml::to_string_pretty(config)?);
    }

    Ok(())
}
