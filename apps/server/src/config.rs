use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use pointfolio_feeds::provider::{extended, octav};

/// Wallet tracked when `PF_WALLET_ADDRESS` is not set.
pub const DEFAULT_WALLET_ADDRESS: &str = "0x4c82cfF7398f3D43b36e41B10fF6F42b14DD9385";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub wallet_address: String,
    pub portfolio_api_url: String,
    pub portfolio_api_key: String,
    pub points_api_url: String,
    pub points_api_key: String,
    pub points_source_name: String,
    /// Serve the static demo snapshot instead of calling the points API.
    pub points_demo: bool,
    /// `None` disables the background refresh.
    pub points_refresh: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = parse_var("PF_LISTEN_ADDR", "0.0.0.0:8080")?;
        let db_path = var_or("PF_DB_PATH", "./db/app.db");
        let cors_allow = var_or("PF_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_var("PF_REQUEST_TIMEOUT_MS", "30000")?;
        let refresh_secs: u64 = parse_var("PF_POINTS_REFRESH_SECS", "300")?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            wallet_address: var_or("PF_WALLET_ADDRESS", DEFAULT_WALLET_ADDRESS),
            portfolio_api_url: var_or("PF_PORTFOLIO_API_URL", octav::DEFAULT_BASE_URL),
            portfolio_api_key: var_or("PF_PORTFOLIO_API_KEY", ""),
            points_api_url: var_or("PF_POINTS_API_URL", extended::DEFAULT_STATS_URL),
            points_api_key: var_or("PF_POINTS_API_KEY", ""),
            points_source_name: var_or("PF_POINTS_SOURCE_NAME", extended::DEFAULT_SOURCE_NAME),
            points_demo: parse_var("PF_POINTS_DEMO", "false")?,
            points_refresh: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = var_or(key, default);
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {key}: {raw:?}"))
}
