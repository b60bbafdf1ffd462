use std::{env, path::PathBuf};

pub const DEFAULT_STORE_KEY: &str = "ganimart";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_dir: PathBuf,
    pub store_key: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let store_dir = env::var("STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let store_key = env::var("STORE_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_KEY.to_string());
        if store_key.contains(['/', '\\']) {
            anyhow::bail!("STORE_KEY must not contain path separators: {store_key}");
        }
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            store_dir,
            store_key,
            host,
            port,
        })
    }
}
