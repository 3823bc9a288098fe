use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`DOCSITE__TEMPLATES__RELOAD=true`).
pub const ENV_PREFIX: &str = "DOCSITE";

#[docsite_derive::docsite_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration value from a file overlaid with environment variables.
///
/// Layers, lowest precedence first:
/// 1. **Base File**: `path` (any format the `config` crate recognizes by extension); defaults
///    to `server`, which resolves to `server.toml` in the working directory.
/// 2. **Environment Overrides**: variables prefixed with `DOCSITE__`, nested keys separated by
///    double underscores (`DOCSITE__DATA__MODE=read_through` maps to `data.mode`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, cannot be parsed, or does not match
/// the structure of `T`.
///
/// # Example
/// ```rust
/// use docsite_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
