//! Voxkit CLI and HTTP entry point.
//!
//! Binary name: `voxkit`
//!
//! Parses CLI arguments, assembles the skill state, then either starts the
//! HTTP endpoint or exports the deployment artifacts.

mod cli;
mod http;
mod state;

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,voxkit=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init()?;

    match cli.command {
        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Voxkit skill endpoint listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}/v1/skill")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Export { output, pretty } => {
            export(&state, output.as_deref(), pretty)?;
        }
    }

    Ok(())
}

/// Build the manifest and models and write them to disk or stdout.
fn export(state: &AppState, output: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let skill = state.skill.build()?;
    let models = state.skill.build_models()?;

    match output {
        Some(dir) => {
            let models_dir = dir.join("models");
            std::fs::create_dir_all(&models_dir)?;

            let skill_path = dir.join("skill.json");
            std::fs::write(&skill_path, to_json(&skill, pretty)?)?;
            println!(
                "  {} wrote {}",
                console::style("✓").green(),
                skill_path.display()
            );

            for (locale, model) in &models {
                let model_path = models_dir.join(format!("{locale}.json"));
                std::fs::write(&model_path, to_json(model, pretty)?)?;
                println!(
                    "  {} wrote {}",
                    console::style("✓").green(),
                    model_path.display()
                );
            }
        }
        None => {
            let combined = serde_json::json!({
                "skill": skill,
                "models": models,
            });
            println!("{}", to_json(&combined, pretty)?);
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
