use std::sync::Arc;

use clap::Parser;
use tango_config::Config;
use tango_types::{AppEvent, View};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod i18n;
pub mod io;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Typed-recall vocabulary practice
#[derive(Parser)]
#[command(name = "tango", version)]
struct Args {
    /// Profile to load from the config directory
    #[arg(long, default_value = "main")]
    profile: String,

    /// Use the built-in sample words instead of Supabase
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = load_config(&args);

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);

    // held until main returns so the terminal is restored on every exit path
    let raw_mode = io::RawModeGuard::enable();

    let mut tasks = controller.spawn_tasks();
    let _input = controller.spawn_input(raw_mode.is_some());

    controller.sender().send(AppEvent::RefreshWords).await?;
    controller.sender().send(AppEvent::Navigate(View::Home)).await?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}

fn load_config(args: &Args) -> Config {
    if let Err(e) = profile::init_user_config() {
        tracing::warn!("Failed to initialize profiles: {e:#}");
    }

    let mut config = profile::load_user_profile(&args.profile).unwrap_or_else(|e| {
        tracing::error!("Failed to load profile {}: {e:#}, using defaults", args.profile);
        Config::default()
    });

    config.apply_env();
    if args.offline {
        config.offline = true;
    }

    config
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("TANGO_LOG_JSON").is_ok_and(|v| v == "1");

    // logs go to stderr so they don't interleave with the practice prompts
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .init();
    }
}
