// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use project_search::utils::logging::{format_error, format_success, format_warning};
use project_search::{
    AppState, Config, ElasticsearchClient, IndexManager, PROJECTS_INDEX, SearchBackend,
    SearchMode, extract_hits,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "project_search")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "HTTP search facade for the projects index", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        #[arg(long, value_name = "ADDR")]
        listen: Option<SocketAddr>,
    },

    /// Create the projects index if it is missing, then exit
    Bootstrap,

    /// Run one search against the engine and print the matching projects
    Search {
        query: String,

        #[arg(short, long, value_enum, default_value_t = ModeArg::Fuzzy)]
        mode: ModeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Users,
    Hashtags,
    Fuzzy,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Users => SearchMode::Users,
            ModeArg::Hashtags => SearchMode::Hashtags,
            ModeArg::Fuzzy => SearchMode::Fuzzy,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    project_search::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using defaults and environment",
            cli.config.display()
        );
        Config::load(None).context("Failed to load configuration")?
    };

    match cli.command.unwrap_or(Commands::Serve { listen: None }) {
        Commands::Serve { listen } => {
            cmd_serve(&config, listen).await?;
        }
        Commands::Bootstrap => {
            cmd_bootstrap(&config).await?;
        }
        Commands::Search { query, mode } => {
            cmd_search(&config, &query, mode.into()).await?;
        }
    }

    Ok(())
}

fn connect(config: &Config) -> Result<Arc<ElasticsearchClient>> {
    let client = ElasticsearchClient::new(config.engine.clone())
        .context("Failed to create search engine client")?;
    Ok(Arc::new(client))
}

async fn cmd_serve(config: &Config, listen: Option<SocketAddr>) -> Result<()> {
    let client = connect(config)?;

    if config.server.bootstrap_index {
        if let Err(e) = IndexManager::new(client.as_ref())
            .ensure_index(PROJECTS_INDEX)
            .await
        {
            error!("Index bootstrap failed, serving anyway: {}", e);
        }
    }

    let state = Arc::new(AppState::new(client, PROJECTS_INDEX));
    let listen = listen.unwrap_or(config.server.listen);

    project_search::server::serve(listen, state)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn cmd_bootstrap(config: &Config) -> Result<()> {
    let client = connect(config)?;

    if !client.ping().await.context("Cannot reach search engine")? {
        println!("{}", format_error("Search engine answered with an error status"));
        return Err(anyhow::anyhow!("Search engine connection failed"));
    }

    let status = IndexManager::new(client.as_ref())
        .ensure_index(PROJECTS_INDEX)
        .await
        .context("Failed to bootstrap index")?;

    println!(
        "{}",
        format_success(&format!("Index '{}': {:?}", PROJECTS_INDEX, status))
    );

    Ok(())
}

async fn cmd_search(config: &Config, query: &str, mode: SearchMode) -> Result<()> {
    info!("Searching {} for: {}", mode.as_str(), query);

    let client = connect(config)?;
    let body = mode.build(query).to_json()?;

    let response = client
        .search(PROJECTS_INDEX, body)
        .await
        .context("Search request failed")?;

    if !response.is_success() {
        println!(
            "{}",
            format_warning(&format!("Engine answered with status {}", response.status))
        );
    }

    let hits = extract_hits(&response.body).context("Engine response had no hits")?;
    let projects = hits.projects()?;

    if projects.is_empty() {
        println!("\nNo results found for query: \"{}\"\n", query);
        return Ok(());
    }

    println!("\nSearch Results for: \"{}\" ({})\n", query, mode.as_str());
    println!("Found {} result(s)\n", projects.len());
    println!("{}", "=".repeat(80));

    for (idx, hit) in projects.iter().enumerate() {
        println!("\n{}. {}", idx + 1, hit.source.format_summary(hit.score));
    }

    println!("\n{}", "=".repeat(80));

    Ok(())
}
