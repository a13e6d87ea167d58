use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::config::Config;
use todo_api::domain::repository::TodoRepository;
use todo_api::http::routes::todos;
use todo_api::http::routing;
use todo_api::infrastructure::sqlite_repo::{self, SqliteTodoRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    prepare_sqlite_file(&config.database_url)?;
    let repo = SqliteTodoRepository::connect(&config.database_url).await?;
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    let router = routing::app(todos::router(todos::AppState { service }));

    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(config.bind_addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown");
}

/// Make sure a file-backed SQLite URL points at something openable before the
/// pool connects to it.
fn prepare_sqlite_file(database_url: &str) -> anyhow::Result<()> {
    if sqlite_repo::is_in_memory_url(database_url) {
        return Ok(());
    }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        use std::fs::{self, OpenOptions};
        use std::path::Path;

        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            OpenOptions::new().create(true).append(true).open(path)?;
        }
    }
    Ok(())
}
