//! Maps a (resource kind, tab) pair to the fetcher that produces its content.

use crate::error::DetailsError;
use crate::fetch::{self, directory, imports, licenses, overview, versions};
use crate::payload::{Details, IMPORTED_BY_LIMIT};
use crate::source::DataSource;
use crate::view::{LegacyDirectoryView, ModuleView, ResourceView, Shape};
use docsite_domain::capabilities::Capabilities;
use docsite_domain::model::{DirectoryMeta, LegacyPackage, VersionedDirectory, licenses_to_metadata};
use docsite_domain::paths::series_path;
use docsite_domain::tabs::{ResourceKind, TabId, TabRegistry};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Resolves tab content for every resource kind and shape.
///
/// The data source capabilities are read once at construction; tabs needing a capability the
/// source lacks fail with [`DetailsError::Unsupported`] before the source is queried.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    source: Arc<dyn DataSource>,
    registry: Arc<TabRegistry>,
    capabilities: Capabilities,
    use_directories: bool,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn DataSource>, registry: Arc<TabRegistry>) -> Self {
        let capabilities = source.capabilities();
        Self { source, registry, capabilities, use_directories: false }
    }

    /// Serve module package listings from the version-aware directory model.
    #[must_use]
    pub const fn with_directories(mut self, use_directories: bool) -> Self {
        self.use_directories = use_directories;
        self
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Produces the content of `tab` for `view`.
    ///
    /// `versioned` tells whether the request pinned a version. A tab the registry does not
    /// list (or disables) for the view's kind is an [`DetailsError::UnknownTab`].
    #[instrument(skip_all, fields(kind = %view.kind(), tab = %tab), err(Display))]
    pub async fn dispatch(
        &self,
        tab: &str,
        view: ResourceView<'_>,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        let kind = view.kind();
        let setting = self
            .registry
            .lookup(kind, tab)
            .filter(|setting| !setting.disabled)
            .ok_or_else(|| DetailsError::unknown_tab(kind, tab))?;

        debug!(template = setting.template, "dispatching tab");
        match view {
            ResourceView::Package(shape) => self.package_tab(setting.id, &shape, versioned).await,
            ResourceView::Directory(shape) => {
                self.directory_tab(setting.id, &shape, versioned).await
            }
            ResourceView::Module(module) => self.module_tab(setting.id, module, versioned).await,
        }
    }

    pub async fn dispatch_legacy_package(
        &self,
        tab: &str,
        package: &LegacyPackage,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        self.dispatch(tab, ResourceView::Package(Shape::Legacy(package)), versioned).await
    }

    pub async fn dispatch_package(
        &self,
        tab: &str,
        package: &VersionedDirectory,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        self.dispatch(tab, ResourceView::Package(Shape::Versioned(package)), versioned).await
    }

    pub async fn dispatch_module(
        &self,
        tab: &str,
        module: &ModuleView,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        self.dispatch(tab, ResourceView::Module(module), versioned).await
    }

    pub async fn dispatch_legacy_directory(
        &self,
        tab: &str,
        directory: &LegacyDirectoryView,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        self.dispatch(tab, ResourceView::Directory(Shape::Legacy(directory)), versioned).await
    }

    pub async fn dispatch_directory(
        &self,
        tab: &str,
        directory: &VersionedDirectory,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        self.dispatch(tab, ResourceView::Directory(Shape::Versioned(directory)), versioned).await
    }

    async fn package_tab(
        &self,
        id: TabId,
        shape: &Shape<'_, LegacyPackage>,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        let source = self.source.as_ref();
        let meta = shape.meta();
        let details = match id {
            TabId::Doc => Details::Documentation(fetch::documentation(meta)),
            TabId::Overview => Details::Overview(overview::compose(meta, versioned)),
            TabId::Subdirectories => {
                Details::Directory(directory::fetch(source, meta, false).await?)
            }
            TabId::Versions => Details::Versions(versions::for_package(source, meta).await?),
            TabId::Imports => Details::Imports(imports::fetch(source, meta).await?),
            TabId::ImportedBy => {
                let importers = self
                    .capabilities
                    .contains(Capabilities::IMPORTED_BY)
                    .then(|| source.imported_by_source())
                    .flatten();
                let Some(importers) = importers else {
                    warn!(path = %meta.path(), "imported-by lookups unavailable");
                    return Err(DetailsError::unsupported(id.as_ref()));
                };
                Details::ImportedBy(
                    imports::fetch_imported_by(importers, meta, IMPORTED_BY_LIMIT).await?,
                )
            }
            TabId::Licenses => Details::Licenses(licenses::fetch(source, meta).await?),
            TabId::Packages => return Err(DetailsError::unknown_tab(ResourceKind::Package, id.as_ref())),
        };
        Ok(details)
    }

    async fn module_tab(
        &self,
        id: TabId,
        module: &ModuleView,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        let source = self.source.as_ref();
        let info = &module.info;
        let details = match id {
            TabId::Overview => Details::Overview(overview::compose(module, versioned)),
            TabId::Packages if self.use_directories => {
                let directory = VersionedDirectory {
                    module: info.clone(),
                    meta: DirectoryMeta {
                        path: info.module_path.clone(),
                        series_path: series_path(&info.module_path).to_owned(),
                        is_redistributable: info.is_redistributable,
                        licenses: licenses_to_metadata(&module.licenses),
                    },
                    readme: None,
                    package: None,
                };
                Details::Directory(directory::fetch(source, &directory, true).await?)
            }
            TabId::Packages => {
                let legacy =
                    source.legacy_directory(&info.module_path, &info.module_path, &info.version).await?;
                Details::Directory(directory::from_packages(module, legacy.packages, true))
            }
            TabId::Versions => Details::Versions(versions::for_module(source, &info.module_path).await?),
            TabId::Licenses => Details::Licenses(licenses::transform(&module.licenses, info)),
            TabId::Doc
            | TabId::Subdirectories
            | TabId::Imports
            | TabId::ImportedBy => {
                return Err(DetailsError::unknown_tab(ResourceKind::Module, id.as_ref()));
            }
        };
        Ok(details)
    }

    async fn directory_tab(
        &self,
        id: TabId,
        shape: &Shape<'_, LegacyDirectoryView>,
        versioned: bool,
    ) -> Result<Details, DetailsError> {
        let source = self.source.as_ref();
        let details = match (id, shape) {
            (TabId::Overview, _) => Details::Overview(overview::compose(shape.meta(), versioned)),
            (TabId::Subdirectories, Shape::Legacy(view)) => Details::Directory(
                directory::from_packages(*view, view.directory.packages.clone(), false),
            ),
            (TabId::Subdirectories, Shape::Versioned(dir)) => {
                Details::Directory(directory::fetch(source, *dir, false).await?)
            }
            (TabId::Licenses, Shape::Legacy(view)) => {
                Details::Licenses(licenses::transform(&view.licenses, &view.directory.module))
            }
            (TabId::Licenses, Shape::Versioned(dir)) => {
                Details::Licenses(licenses::fetch(source, *dir).await?)
            }
            _ => {
                return Err(DetailsError::unknown_tab(ResourceKind::Directory, id.as_ref()));
            }
        };
        Ok(details)
    }
}
