use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use refdesk::config::Config;
use refdesk::gateway::{GatewayClientConfig, connect_pair};
use refdesk::intent::IntentResolver;
use refdesk::llm::{OpenAiClient, OpenAiConfig};
use refdesk::orchestrator::Orchestrator;
use refdesk::tools::{Dispatcher, ToolCatalog};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("refdesk")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("refdesk.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let llm_config = OpenAiConfig {
        endpoint: config.llm.endpoint.clone(),
        model: config.llm.model.clone(),
        max_tokens: config.llm.max_tokens,
        temperature: config.llm.temperature,
        timeout: Duration::from_millis(config.llm.timeout_ms),
    };
    let client = OpenAiClient::from_env(&config.llm.api_key_env, llm_config)
        .context("Failed to create LLM client")?;

    let tools = ToolCatalog::standard();
    let resolver = IntentResolver::new(Arc::new(client), &tools);

    // Both gateway connections are opened before the first query and closed
    // together on every exit path, including a half-finished bootstrap.
    let (directory, catalog) = connect_pair(
        GatewayClientConfig {
            socket_path: config.gateways.directory_socket.clone(),
            request_timeout_ms: config.gateways.request_timeout_ms,
        },
        GatewayClientConfig {
            socket_path: config.gateways.catalog_socket.clone(),
            request_timeout_ms: config.gateways.request_timeout_ms,
        },
    )
    .await
    .context("Failed to connect to backend gateways")?;

    let dispatcher = Dispatcher::new(tools, directory.clone(), catalog.clone());
    let orchestrator = Orchestrator::new(resolver, dispatcher);

    let result = match &cli.command {
        Some(Commands::Ask { query }) => run_single_query(&orchestrator, query).await,
        None => run_interactive(&orchestrator).await,
    };

    directory.shutdown().await;
    catalog.shutdown().await;
    info!("Shutdown complete");

    result
}

async fn run_single_query(orchestrator: &Orchestrator, query: &str) -> Result<()> {
    let response = orchestrator
        .process_query(query)
        .await
        .context("Query failed")?;
    println!("{}", response);
    Ok(())
}

async fn run_interactive(orchestrator: &Orchestrator) -> Result<()> {
    use tokio::io::AsyncBufReadExt;

    println!(
        "{}",
        "refdesk interactive mode. Type a query, or 'quit' to exit.".cyan()
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("{} ", ">".green());
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();

        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") {
            break;
        }

        match orchestrator.process_query(query).await {
            Ok(response) => println!("{}", response),
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    println!("{}", "Goodbye.".cyan());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();
    info!("Parsed CLI arguments: {:?}", cli);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    run_application(&cli, &config).await
}
