//! prompt-enhancer - HTTP service and CLI client for prompt enhancement

use std::net::SocketAddr;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prompt_enhancer::config::{Config, ConfigOptions};
use prompt_enhancer::contract::EnhanceRequest;
use prompt_enhancer::enhancer::{OptimizationLevel, UserRole};
use prompt_enhancer::error::EnhanceError;
use prompt_enhancer::orchestrator::{EnhanceOutcome, Orchestrator, TriggerOutcome};
use prompt_enhancer::server::AppServer;
use prompt_enhancer::supervisor::RenderSupervisor;

#[derive(ValueEnum, Debug, Copy, Clone)]
enum RoleArg {
    Developer,
    Designer,
    Marketer,
    ContentCreator,
    Analyst,
    General,
}

impl From<RoleArg> for UserRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Developer => UserRole::Developer,
            RoleArg::Designer => UserRole::Designer,
            RoleArg::Marketer => UserRole::Marketer,
            RoleArg::ContentCreator => UserRole::ContentCreator,
            RoleArg::Analyst => UserRole::Analyst,
            RoleArg::General => UserRole::General,
        }
    }
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum LevelArg {
    Conservative,
    Balanced,
    Aggressive,
}

impl From<LevelArg> for OptimizationLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Conservative => OptimizationLevel::Conservative,
            LevelArg::Balanced => OptimizationLevel::Balanced,
            LevelArg::Aggressive => OptimizationLevel::Aggressive,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "prompt-enhancer")]
#[command(about = "Prompt enhancement service with a web UI and CLI client")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service and web UI
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8787")]
        listen: SocketAddr,

        /// Service name reported by the health endpoint
        #[arg(long)]
        service_name: Option<String>,

        /// USD price per 1000 tokens used for cost stats
        #[arg(long)]
        cost_per_1k_tokens: Option<f64>,

        /// Open the web UI in the default browser once the server is up
        #[arg(long)]
        open: bool,
    },
    /// Enhance one prompt against a running service
    Enhance {
        /// The prompt to enhance
        #[arg(long)]
        prompt: String,

        /// Audience profile for the rewrite
        #[arg(long, value_enum, default_value = "general")]
        role: RoleArg,

        /// How far the rewrite may expand the prompt
        #[arg(long, value_enum, default_value = "balanced")]
        level: LevelArg,

        /// Base URL of the service
        #[arg(long, default_value = "http://127.0.0.1:8787")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Serve {
            listen,
            service_name,
            cost_per_1k_tokens,
            open,
        } => serve(listen, service_name, cost_per_1k_tokens, open).await,
        Command::Enhance {
            prompt,
            role,
            level,
            base_url,
        } => enhance(prompt, role.into(), level.into(), base_url).await,
    }
}

async fn serve(
    listen: SocketAddr,
    service_name: Option<String>,
    cost_per_1k_tokens: Option<f64>,
    open_browser: bool,
) -> Result<()> {
    let config = Config::for_service(ConfigOptions {
        service_name,
        cost_per_1k_tokens,
        ..Default::default()
    })?;

    let server = AppServer::new(config, listen);
    let addr = server.start().await?;
    let url = format!("http://{}", addr);

    info!("Web UI available at {}", url);

    if open_browser {
        if let Err(e) = open::that(&url) {
            warn!("Failed to open browser: {}", e);
        }
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    Ok(())
}

async fn enhance(
    prompt: String,
    role: UserRole,
    level: OptimizationLevel,
    base_url: String,
) -> Result<()> {
    let config = Config::new(base_url, ConfigOptions::default())?;
    let orchestrator = Orchestrator::new(config)?;

    let request = EnhanceRequest::new(prompt)
        .with_role(role)
        .with_level(level);

    match orchestrator.trigger(request).await {
        TriggerOutcome::Completed(outcome) => {
            let mut supervisor = RenderSupervisor::new();
            let rendered = supervisor.render(|| format_outcome(&outcome));
            if let Some(failure) = supervisor.failure() {
                error!("Could not render the result: {}", failure.message);
            }
            println!("{}", rendered);
            Ok(())
        }
        TriggerOutcome::Rejected(message) | TriggerOutcome::Failed(message) => {
            error!("{}", message);
            std::process::exit(1);
        }
        TriggerOutcome::Busy | TriggerOutcome::Superseded => {
            // Single-shot session; neither outcome is reachable here
            error!("Enhancement session is busy");
            std::process::exit(1);
        }
    }
}

fn format_outcome(outcome: &EnhanceOutcome) -> Result<String, EnhanceError> {
    let stats = &outcome.stats;
    let mut out = String::new();
    out.push_str(&outcome.response.enhanced_prompt);
    out.push_str("\n\n--- Stats ---\n");
    out.push_str(&format!("Original tokens:   {}\n", stats.original_tokens));
    out.push_str(&format!("Enhanced tokens:   {}\n", stats.enhanced_tokens));
    out.push_str(&format!(
        "Enhancement ratio: {:.1}%\n",
        stats.enhancement_ratio
    ));
    out.push_str(&format!(
        "Processing time:   {:.2}s\n",
        stats.processing_time
    ));
    out.push_str(&format!(
        "Cost impact:       {}${:.6}\n",
        if stats.cost_difference < 0.0 { "-" } else { "" },
        stats.cost_difference.abs()
    ));
    Ok(out)
}
