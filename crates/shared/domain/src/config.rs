use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub server: ServerConfig,
    pub templates: TemplateConfig,
    pub data: DataConfig,
    pub features: FeatureConfig,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Template and static asset locations.
///
/// `dir` must contain `base.tmpl`, a `helpers/` directory and a `pages/` directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dir: PathBuf,
    pub static_dir: PathBuf,
    /// Recompile every template set before each render (development mode only).
    pub reload: bool,
}

/// Which concrete data source backs the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceMode {
    /// Full store with every capability.
    #[default]
    Store,
    /// Restricted read-through source in front of the store.
    ReadThrough,
}

/// Data source selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub mode: DataSourceMode,
    /// JSON seed file loaded into the store at startup.
    pub seed: Option<PathBuf>,
    pub cache_capacity: u64,
    /// Lifetime of read-through cache entries, in seconds.
    pub cache_ttl_secs: u64,
}

/// Experiment switches.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Serve pages from the version-aware directory model instead of the legacy one.
    pub use_directories: bool,
}

/// Logging knobs forwarded to the logger builder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub filter: Option<String>,
    pub dir: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8080, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content/html"),
            static_dir: PathBuf::from("content/static"),
            reload: false,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            mode: DataSourceMode::Store,
            seed: None,
            cache_capacity: 10_000,
            cache_ttl_secs: 300,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, dir: None, json: false }
    }
}
