use std::net::SocketAddr;

use tracing::{Level, info};

use jobboard::config::AppConfig;
use jobboard::state::AppState;
use jobboard::{database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::ensure_indexes(&db).await?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState { db, config };
    let app = jobboard::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
