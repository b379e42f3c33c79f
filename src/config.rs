use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the facial analysis service (DeepFace REST API)
    #[serde(default = "default_analyzer_url")]
    pub analyzer_url: String,

    /// Listings search URL; the genre filter is appended per emotion
    #[serde(default = "default_listings_url")]
    pub listings_url: String,

    /// Timeout applied to every outbound HTTP call
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Number of titles returned when the caller gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Upper bound on a caller-supplied limit
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_analyzer_url() -> String {
    "http://127.0.0.1:5005".to_string()
}

fn default_listings_url() -> String {
    "https://www.imdb.com/search/title/?title_type=feature".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    50
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
