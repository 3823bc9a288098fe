use anyhow::Context;
use docsite_kernel::config::load_config;
use docsite_kernel::domain::config::AppConfig;
use docsite_logger::{LevelFilter, Logger};
use docsite_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: AppConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let level = cfg.log.level.parse::<LevelFilter>().context("Invalid log level")?;
    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).json(cfg.log.json);
    if let Some(filter) = &cfg.log.filter {
        logger = logger.env_filter(filter);
    }
    if let Some(dir) = &cfg.log.dir {
        logger = logger.path(dir);
    }
    let _log = logger.init()?;

    Server::builder().config(cfg).build()?.run().await
}
