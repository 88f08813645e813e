use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flowlink_fabric::agent::HttpAgentConnector;
use flowlink_fabric::{ClientConfig, Environment, InvocationResult, Invoker, Session};

mod address;

/// Query parameter a page URL carries the canister id in
const CANISTER_ID_PARAM: &str = "canisterId";

#[derive(Parser, Debug)]
#[command(name = "flowlink", about = "Call the workflow canister", version)]
struct Cli {
    /// Canister id of the workflow service
    #[arg(long, global = true)]
    canister_id: Option<String>,

    /// Page URL to read the `canisterId` query parameter from
    #[arg(long, global = true)]
    url: Option<String>,

    /// Replica host (defaults to FLOWLINK_HOST or the local replica)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Skip the root key fetch used against local replicas
    #[arg(long, global = true)]
    production: bool,

    /// Never build a network agent; always use raw calls
    #[arg(long, global = true)]
    raw_only: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the workflow with a question
    Run {
        /// Question to ask
        question: String,
    },
    /// Run the built-in test with the default question
    Test,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = config(&cli)?;
    let session = if cli.raw_only {
        Session::raw_only(config)
    } else {
        Session::with_agent(config, HttpAgentConnector)
    };
    let session = session.context("failed to create session")?;
    let mut invoker = Invoker::new(session);

    let canister_id = match (&cli.canister_id, &cli.url) {
        (Some(id), _) => id.clone(),
        (None, Some(url)) => {
            let detected = address::from_page_url(url, CANISTER_ID_PARAM)?;
            if let Some(id) = &detected {
                println!("🎯 Auto-detected canister: {id}");
            }
            detected.unwrap_or_default()
        }
        (None, None) => String::new(),
    };

    println!("🔄 Calling canister...");
    let result = match &cli.command {
        Command::Run { question } => invoker.run_workflow(&canister_id, question).await,
        Command::Test => invoker.test(&canister_id).await,
    };

    Ok(report(result))
}

fn config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("invalid environment configuration")?;
    if let Some(host) = &cli.host {
        config = ClientConfig::builder()
            .host(host.as_str())
            .environment(config.environment)
            .build()
            .context("invalid --host")?;
    }
    if cli.production {
        config.environment = Environment::Production;
    }
    Ok(config)
}

fn report(result: InvocationResult) -> ExitCode {
    match result {
        Ok(reply) if reply.degraded => {
            println!("⚠️  Service unreachable, showing placeholder answer");
            println!("{}", reply.text);
            ExitCode::SUCCESS
        }
        Ok(reply) => {
            println!("✅ Completed via {} channel", reply.via);
            println!("{}", reply.text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
