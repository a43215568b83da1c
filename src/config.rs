use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::dispatch::DispatchPolicy;
use crate::matching::DEFAULT_RADIUS_KM;

/// Application-level constants
pub const APP_NAME: &str = "Raktlink";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,raktlink=debug".to_string()
}

/// Get the application data directory (~/.raktlink)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".raktlink")
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,
    pub fcm_endpoint: String,
    pub fcm_server_key: String,
    /// Matching radius in kilometers.
    pub radius_km: f64,
    /// Timeout applied to every external HTTP call.
    pub http_timeout: Duration,
    pub dispatch_policy: DispatchPolicy,
    /// Header carrying the authenticated user id, set by the upstream
    /// identity gateway.
    pub user_id_header: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".parse().expect("valid default addr"),
            db_path: app_data_dir().join("raktlink.db"),
            geocoder_base_url: "https://nominatim.openstreetmap.org".into(),
            geocoder_user_agent: format!("{APP_NAME}/{APP_VERSION}"),
            fcm_endpoint: "https://fcm.googleapis.com/v1/messages:send".into(),
            fcm_server_key: String::new(),
            radius_km: DEFAULT_RADIUS_KM,
            http_timeout: Duration::from_secs(10),
            dispatch_policy: DispatchPolicy::Awaited,
            user_id_header: "x-user-id".into(),
        }
    }
}

impl Config {
    /// Build configuration from `RAKTLINK_*` environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(addr) = env_parse::<SocketAddr>("RAKTLINK_BIND") {
            config.bind_addr = addr;
        }
        if let Ok(path) = std::env::var("RAKTLINK_DB") {
            config.db_path = PathBuf::from(path);
        }
        if let Ok(url) = std::env::var("RAKTLINK_GEOCODER_URL") {
            config.geocoder_base_url = url;
        }
        if let Ok(ua) = std::env::var("RAKTLINK_GEOCODER_USER_AGENT") {
            config.geocoder_user_agent = ua;
        }
        if let Ok(endpoint) = std::env::var("RAKTLINK_FCM_ENDPOINT") {
            config.fcm_endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("RAKTLINK_FCM_KEY") {
            config.fcm_server_key = key;
        }
        if let Some(radius) = env_parse::<f64>("RAKTLINK_RADIUS_KM") {
            config.radius_km = radius;
        }
        if let Some(secs) = env_parse::<u64>("RAKTLINK_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Ok(policy) = std::env::var("RAKTLINK_DISPATCH") {
            match policy.as_str() {
                "detached" => config.dispatch_policy = DispatchPolicy::Detached,
                "awaited" => config.dispatch_policy = DispatchPolicy::Awaited,
                other => tracing::warn!(policy = other, "Unknown dispatch policy, using default"),
            }
        }
        if let Ok(header) = std::env::var("RAKTLINK_USER_ID_HEADER") {
            config.user_id_header = header.to_ascii_lowercase();
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.parse().ok()
}
