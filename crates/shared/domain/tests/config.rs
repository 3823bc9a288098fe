use docsite_domain::config::{AppConfig, DataConfig, DataSourceMode, ServerConfig, TemplateConfig};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 8080);
    assert!(server.ssl.is_none());

    let templates = TemplateConfig::default();
    assert_eq!(templates.dir, PathBuf::from("content/html"));
    assert!(!templates.reload);

    let data = DataConfig::default();
    assert_eq!(data.mode, DataSourceMode::Store);
    assert!(data.seed.is_none());

    let cfg = AppConfig::default();
    assert!(!cfg.features.use_directories);
    assert_eq!(cfg.log.level, "info");
}

#[test]
fn app_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 9090 },
        "templates": { "dir": "/srv/html", "static_dir": "/srv/static", "reload": true },
        "data": { "mode": "read_through", "seed": "/srv/seed.json", "cache_capacity": 64, "cache_ttl_secs": 5 },
        "features": { "use_directories": true }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 9090);
    assert!(cfg.templates.reload);
    assert_eq!(cfg.data.mode, DataSourceMode::ReadThrough);
    assert_eq!(cfg.data.cache_capacity, 64);
    assert_eq!(cfg.data.cache_ttl_secs, 5);
    assert_eq!(cfg.data.seed.as_deref(), Some(std::path::Path::new("/srv/seed.json")));
    assert!(cfg.features.use_directories);
}

#[test]
fn config_clones_share_until_mutated() {
    let base = AppConfig::default();
    let mut dev = base.clone();
    dev.templates.reload = true;

    assert!(!base.templates.reload);
    assert!(dev.templates.reload);
}
