use docsite_details::{DataSource, Dispatcher};
use docsite_domain::config::AppConfig;
use docsite_domain::tabs::TabRegistry;
use docsite_render::Renderer;
use std::sync::Arc;

/// Shared, read-only request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub registry: Arc<TabRegistry>,
    pub source: Arc<dyn DataSource>,
    pub dispatcher: Dispatcher,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    /// Builds the tab registry once and hands it to the dispatcher.
    pub fn new(config: AppConfig, source: Arc<dyn DataSource>, renderer: Renderer) -> Self {
        let registry = Arc::new(TabRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&source), Arc::clone(&registry))
            .with_directories(config.features.use_directories);
        Self { config, registry, source, dispatcher, renderer: Arc::new(renderer) }
    }
}
