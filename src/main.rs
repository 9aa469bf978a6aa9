use clap::Parser;
use products_api::{
    config::{load_config, StoreBackend},
    create_router,
    infrastructure::{
        database::{CassandraStore, MemoryStore, ProductStore},
        logger::Logger,
    },
    AppState,
};
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// 商品 CRUD 服务
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// 配置文件路径，默认依次查找 config.toml、./config/config.toml
    #[arg(long, env = "PRODUCTS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let _guard = Logger::init(&config.logging)?;

    info!("Starting products service...");
    info!(?config, "Configuration loaded");

    let store: Arc<dyn ProductStore> = match config.database.backend {
        StoreBackend::Cassandra => {
            let store = CassandraStore::connect(&config.database).await.map_err(|e| {
                error!("Failed to initialize database: {}", e);
                e
            })?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store, data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let app = create_router(AppState::new(store));

    let listener = TcpListener::bind(config.http.listen_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 Products service running on http://{}", addr);
    info!("📖 Endpoints:");
    info!("   GET    /products?filter=     - List products, optional name/price prefix filter");
    info!("   POST   /products             - Create product");
    info!("   PUT    /products/:product_id - Update product");
    info!("   DELETE /products/:product_id - Delete product");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // 无法监听信号时保持运行
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
