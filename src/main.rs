use superego::config::ClientConfig;
use superego::context::ClientContext;
use superego::error::CryptoError;
use superego::logging::init_tracing;
use superego::traits::KeyEncryptor;

use async_trait::async_trait;
use color_eyre::Result;
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "usage: superego <threads|sessions|models>

  threads    list known thread ids in first-seen order
  sessions   list stored UI sessions
  models     load and print the provider/model directory

environment:
  SUPEREGO_API_BASE_URL   backend base URL (default http://localhost:8000/api)
  SUPEREGO_DATA_DIR       durable store directory (default ~/.superego)
  RUST_LOG                log filter (default superego=info)";

/// The CLI never submits keys.
struct NoEncryptor;

#[async_trait]
impl KeyEncryptor for NoEncryptor {
    async fn encrypt(&self, _raw_key: &str) -> Result<String, CryptoError> {
        Err(CryptoError("no key encryptor configured".to_string()))
    }
}

fn print_threads(ctx: &ClientContext) {
    let threads = ctx.known_threads().list();
    if threads.is_empty() {
        println!("No known threads.");
        return;
    }
    for thread_id in threads {
        println!("{}", thread_id);
    }
}

fn print_sessions(ctx: &ClientContext) {
    let sessions = ctx.sessions().all();
    if sessions.is_empty() {
        println!("No sessions.");
        return;
    }
    for (session_id, state) in sessions {
        let name = if state.name.is_empty() {
            "(unnamed)"
        } else {
            state.name.as_str()
        };
        println!(
            "{}  {}  thread={}  last_active={}",
            session_id,
            name,
            state.thread_id.as_deref().unwrap_or("-"),
            state.last_active.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

async fn print_models(ctx: &ClientContext) -> Result<()> {
    let snapshot = ctx.directory().load().await;
    snapshot.check()?;
    for provider in snapshot.provider_names() {
        println!("{}", provider);
        for model in snapshot.models_for(Some(&provider)) {
            println!("  {}", model);
        }
        for param in snapshot.params_for(Some(&provider)) {
            let required = if param.optional { "" } else { " (required)" };
            println!("  param {}: {:?}{}", param.key, param.param_type, required);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("superego {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;
    init_tracing();

    let command = std::env::args().nth(1);
    let config = ClientConfig::from_env();
    let ctx = ClientContext::from_config(config, Arc::new(NoEncryptor));

    match command.as_deref() {
        Some("threads") => print_threads(&ctx),
        Some("sessions") => print_sessions(&ctx),
        Some("models") => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(print_models(&ctx))?;
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
    Ok(())
}
