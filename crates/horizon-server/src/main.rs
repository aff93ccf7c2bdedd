//! Horizon: study notes and quizzes from plain text.

use std::path::PathBuf;
use std::sync::Arc;

use horizon_server::{build_router, AppState};
use horizon_store::SqliteQuizStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("HORIZON_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" | "help" => {
                println!("Horizon — study notes and quizzes from plain text");
                println!();
                println!("Usage: horizon [command]");
                println!();
                println!("Commands:");
                println!("  (none)    Start the server");
                println!("  help      Show this help message");
                println!();
                println!("Environment:");
                println!("  PORT                       HTTP port (default 5000)");
                println!("  HORIZON_DATA_DIR           Data directory (default ./data)");
                println!("  HORIZON_MAX_TEXT_LENGTH    Longest accepted input, in characters");
                println!("  HORIZON_MIN_NOTES_LENGTH   Shortest input accepted for notes");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'horizon help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = horizon_core::HorizonConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = SqliteQuizStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    let state = Arc::new(AppState::new(config, Arc::new(store)));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Horizon server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
