#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tracing::info;
use std::sync::Arc;
use vd_rs::{
    auth::Auth, detect::Detector, utils::logger, AppContext, BIND_ADDR, SQLITE_PATH,
};
use vd_rs::auth::types::ApiKey;
use vd_rs::auth::storage::ApiKeyStore;
use vd_rs::storage::api_key::sqlite::SqliteApiKeyStore;
use vd_rs::storage::detection_log::sqlite::SqliteDetectionLogStore;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    let _guard = logger::init("./logs".to_string())?;
    vd_rs::init_env();

    info!("Starting voice detection service...");

    // 初始化 storage
    info!("Initializing Storage...");
    let key_store = Arc::new(SqliteApiKeyStore::new(&SQLITE_PATH).await?);
    let log_store = Arc::new(SqliteDetectionLogStore::new(&SQLITE_PATH).await?);

    // 可选的引导 key，方便本地联调
    if let Ok(bootstrap) = std::env::var("VD_BOOTSTRAP_KEY") {
        if key_store.find_active(&bootstrap).await?.is_none() {
            let key = ApiKey::with_key(bootstrap, "bootstrap".to_string());
            key_store.insert(&key).await?;
            info!("Inserted bootstrap API key '{}'", key.name);
        }
    }

    // 初始化认证管理器
    info!("Initializing Auth...");
    let auth = Auth::new(key_store);

    let ctx = Arc::new(AppContext {
        auth: Arc::new(auth),
        detector: Arc::new(Detector::new()),
        logs: log_store,
    });

    let addr: std::net::SocketAddr = BIND_ADDR.parse()?;
    info!("Starting HTTP server at http://{}", addr);

    match vd_rs::web::start_server(ctx, addr).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            tracing::error!("Server error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
