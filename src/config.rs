use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub dealerships: DealershipsConfig,

    pub nlu: NluConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/dealership.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8000,
            cors_allowed_origins: vec![
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
            ],
        }
    }
}

/// Endpoints of the dealership cloud functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DealershipsConfig {
    /// Serves the full listing, `?dealerId=` lookups and `?state=` filters.
    pub dealers_url: String,

    /// Serves review listings (GET) and review submissions (POST).
    pub reviews_url: String,

    pub request_timeout_seconds: u64,
}

impl Default for DealershipsConfig {
    fn default() -> Self {
        Self {
            dealers_url: "http://localhost:3000/dealerships/get".to_string(),
            reviews_url: "http://localhost:5000/api/review".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

/// Credentials for the natural-language-understanding service.
///
/// Built once at startup and handed to the sentiment client; nothing reads
/// the environment after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NluConfig {
    pub url: Option<String>,

    pub api_key: Option<String>,

    pub iam_url: String,

    pub version: String,
}

pub const NLU_API_VERSION: &str = "2021-08-01";

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            iam_url: "https://iam.cloud.ibm.com/identity/token".to_string(),
            version: NLU_API_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies environment overrides through `lookup` so tests can feed a map.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("WATSON_NLU_URL") {
            self.nlu.url = Some(url);
        }
        if let Some(key) = lookup("WATSON_NLU_API_KEY") {
            self.nlu.api_key = Some(key);
        }
        if let Some(db) = lookup("DEALERSHIP_DATABASE_URL") {
            self.general.database_path = db;
        }
        if let Some(url) = lookup("DEALERSHIP_DEALERS_URL") {
            self.dealerships.dealers_url = url;
        }
        if let Some(url) = lookup("DEALERSHIP_REVIEWS_URL") {
            self.dealerships.reviews_url = url;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("dealership").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".dealership").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.enabled {
            if self.dealerships.dealers_url.is_empty() {
                anyhow::bail!("dealerships.dealers_url cannot be empty when the server is enabled");
            }
            if self.dealerships.reviews_url.is_empty() {
                anyhow::bail!("dealerships.reviews_url cannot be empty when the server is enabled");
            }
        }

        if self.dealerships.request_timeout_seconds == 0 {
            anyhow::bail!("dealerships.request_timeout_seconds must be > 0");
        }

        Ok(())
    }
}
