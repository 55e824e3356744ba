//src/main.rs

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use supplyflow::{
    config::{AppConfig, AppState},
    db, routes,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supplyflow=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;

    let db_pool = db::connect(&config.db_path).await?;
    tracing::info!("✅ Conexão com o banco de dados estabelecida ({})", config.db_path);

    db::run_migrations(&db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    if config.seed_data {
        db::seed::seed_if_empty(&db_pool).await?;
    }

    let app = routes::build_router(AppState::from_pool(db_pool, &config), &config.cors_origins);

    // Inicia o servidor
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
