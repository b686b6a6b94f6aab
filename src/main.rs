//! prompt-enhancer command line.
//!
//! Usage:
//!   prompt-enhancer serve [--bind 127.0.0.1:8788]
//!   prompt-enhancer enhance "Write a blog post about coffee" --tone casual --words short
//!   prompt-enhancer history --user alice
//!   prompt-enhancer frameworks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prettytable::{Table, row};
use prompt_enhancer::config::{Config, RuntimeConfig, load_env_file};
use prompt_enhancer::deserializers::WORD_COUNT_PRESETS;
use prompt_enhancer::storage::open_store;
use prompt_enhancer::{FrameworkId, PromptParameters, PromptService, http};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prompt-enhancer")]
#[command(about = "Turn rough prompts into structured ones", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Enhance one prompt and print the result
    Enhance {
        input: String,
        #[arg(long)]
        audience: Option<String>,
        #[arg(long)]
        tone: Option<String>,
        #[arg(long)]
        format: Option<String>,
        /// Word count, or one of short / medium / long
        #[arg(long)]
        words: Option<String>,
        /// Save the result under this user id
        #[arg(long)]
        user: Option<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved prompts for a user
    History {
        #[arg(long)]
        user: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the framework catalog
    Frameworks,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Subscriber goes up before Config::load so its warnings are visible.
    load_env_file();
    let runtime = RuntimeConfig::load_from_env();
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), &runtime.log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Serve { bind } => serve(config, bind).await,
        Commands::Enhance {
            input,
            audience,
            tone,
            format,
            words,
            user,
            json,
        } => {
            let params = build_parameters(&config, audience, tone, format, words)?;
            enhance(&config, &input, params, user, json).await
        }
        Commands::History { user, limit } => history(&config, &user, limit).await,
        Commands::Frameworks => {
            frameworks();
            Ok(())
        }
    }
}

/// RUST_LOG when set and parseable, else the configured level.
fn log_filter(rust_log: Option<&str>, configured: &str) -> EnvFilter {
    rust_log
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("prompt_enhancer=info"))
}

async fn serve(mut config: Config, bind: Option<SocketAddr>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.http_bind = bind;
    }
    let store = open_store(&config.storage).await?;
    info!("Starting prompt-enhancer v{}", env!("CARGO_PKG_VERSION"));
    http::start_http_server(Arc::new(config), PromptService::with_store(store)).await
}

fn parse_words(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    if let Some((_, n)) = WORD_COUNT_PRESETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw))
    {
        return Ok(*n);
    }
    raw.parse::<u32>()
        .with_context(|| format!("--words expects a number or short/medium/long, got '{}'", raw))
}

fn build_parameters(
    config: &Config,
    audience: Option<String>,
    tone: Option<String>,
    format: Option<String>,
    words: Option<String>,
) -> Result<PromptParameters> {
    let mut params = config.defaults.parameters();
    if let Some(a) = audience {
        params.audience_level = a.parse()?;
    }
    if let Some(t) = tone {
        params.tone = t.parse()?;
    }
    if let Some(f) = format {
        params.output_format = f.parse()?;
    }
    if let Some(w) = words {
        params.word_count = parse_words(&w)?;
    }
    params.validate()?;
    Ok(params)
}

async fn enhance(
    config: &Config,
    input: &str,
    params: PromptParameters,
    user: Option<String>,
    json: bool,
) -> Result<()> {
    let service = match user {
        Some(_) => PromptService::with_store(open_store(&config.storage).await?),
        None => PromptService::new(),
    };
    let outcome = service
        .enhance_and_save(input, &params, user.as_deref())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("{}", outcome.enhanced.final_prompt);
    eprintln!();
    for c in &outcome.candidates {
        eprintln!(
            "{} {} ({:.2}): {}",
            if c.applicable { "+" } else { "-" },
            c.framework,
            c.confidence,
            c.rationale
        );
    }
    eprintln!("use case: {}", outcome.enhanced.use_case);
    if let Some(id) = outcome.saved_id {
        eprintln!("saved as {}", id);
    }
    Ok(())
}

async fn history(config: &Config, user: &str, limit: Option<usize>) -> Result<()> {
    let store = open_store(&config.storage).await?;
    let mut prompts = store.list_by_user(user).await?;
    prompts.truncate(limit.unwrap_or(config.server.list_limit));

    if prompts.is_empty() {
        println!("No saved prompts for user '{}'.", user);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["Created", "Id", "Use Case", "Frameworks", "Input"]);
    for p in prompts {
        let mut input: String = p.original_input.chars().take(60).collect();
        if p.original_input.chars().count() > 60 {
            input.push_str("...");
        }
        table.add_row(row![
            p.created_at.format("%Y-%m-%d %H:%M"),
            p.id,
            p.use_case,
            p.frameworks.join(", "),
            input,
        ]);
    }
    table.printstd();
    Ok(())
}

fn frameworks() {
    let mut table = Table::new();
    table.add_row(row!["Id", "Components", "Description"]);
    for id in FrameworkId::ALL {
        table.add_row(row![id, id.components().join(" / "), id.description()]);
    }
    table.printstd();
}
