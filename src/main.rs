use std::net::SocketAddr;
use std::sync::Arc;

use referral_backend::{
    build_router,
    config::{get_config, init_config, LogFormat},
    database::pool::{create_pool, run_migrations},
    services::{
        candidate_store::CandidateStore, memory_candidate_store::MemoryCandidateStore,
        pg_candidate_store::PgCandidateStore, upload_service::UploadService,
    },
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    let store: Arc<dyn CandidateStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            info!("Using PostgreSQL candidate store");
            Arc::new(PgCandidateStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; candidates are kept in memory only");
            Arc::new(MemoryCandidateStore::new())
        }
    };

    let uploads = UploadService::new(&config.uploads_dir);
    uploads.ensure_dir().await?;
    info!("Serving uploads from: {}", config.uploads_dir);

    let app = build_router(AppState::new(store, uploads), config.max_upload_bytes);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
