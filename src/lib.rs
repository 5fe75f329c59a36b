pub mod auth;
pub mod detect;
pub mod storage;
pub mod utils;
pub mod web;

use std::{env, sync::Arc};
use auth::Auth;
use detect::Detector;
use once_cell::sync::Lazy;
use storage::detection_log::DetectionLogStore;

pub struct AppContext {
    pub auth: Arc<Auth>,
    pub detector: Arc<Detector>,
    pub logs: Arc<dyn DetectionLogStore>,
}

const VD_SQLITE_PATH: &str = "sqlite://./vd_data/database/storage.db?mode=rwc";
const VD_BIND_ADDR: &str = "127.0.0.1:7300";

pub static SQLITE_PATH: Lazy<String> = Lazy::new(|| {
    match env::var("VD_SQLITE_PATH") {
        Ok(path) => path,
        Err(_) => {
            dotenv::var("VD_SQLITE_PATH").unwrap_or_else(|_| VD_SQLITE_PATH.to_string())
        }
    }
});

pub static BIND_ADDR: Lazy<String> = Lazy::new(|| {
    match env::var("VD_BIND_ADDR") {
        Ok(addr) => addr,
        Err(_) => {
            dotenv::var("VD_BIND_ADDR").unwrap_or_else(|_| VD_BIND_ADDR.to_string())
        }
    }
});

pub fn init_env() {
    dotenv::dotenv().ok();

    // 确保数据目录存在
    if let Some(db_path) = SQLITE_PATH.strip_prefix("sqlite://") {
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        if let Some(dir) = std::path::Path::new(db_path).parent() {
            std::fs::create_dir_all(dir).unwrap_or_else(|e| {
                eprintln!("Failed to create database directory: {}", e);
            });
        }
    }
}
