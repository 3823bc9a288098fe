//! Package, directory and module pages.

use super::error::{HttpError, error_response};
use super::{PageQuery, reload_templates, render};
use crate::csp::Nonce;
use crate::page::{DetailsPage, PageHeader};
use crate::request::DetailsPath;
use crate::state::AppState;
use axum::Extension;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Response;
use docsite_details::{
    DataSource, LegacyDirectoryView, ModuleView, ResourceMeta, ResourceView, Shape,
};
use docsite_domain::constants::{MODULE_NAMESPACE, PACKAGE_NAMESPACE};
use docsite_domain::paths::module_url;
use docsite_domain::tabs::{ResourceKind, TabId, TabRegistry, TabSetting};
use docsite_render::BasePage;
use tracing::{debug, instrument};

/// `GET /<path>[@<version>][/<suffix>]`: a package or directory, or a module root.
pub(crate) async fn package_page(
    State(state): State<AppState>,
    Extension(nonce): Extension<Nonce>,
    uri: Uri,
    query: PageQuery,
) -> Response {
    reload_templates(&state).await;
    let base = query.base("", &nonce);
    let result = match DetailsPath::parse(uri.path()) {
        Ok(request) => serve_path(&state, &request, query.tab.as_deref(), base.clone()).await,
        Err(err) => Err(err.into()),
    };
    result.unwrap_or_else(|err| error_response(&state, base, err))
}

/// `GET /mod/<module>[@<version>]`.
pub(crate) async fn module_page(
    State(state): State<AppState>,
    Extension(nonce): Extension<Nonce>,
    Path(raw): Path<String>,
    query: PageQuery,
) -> Response {
    reload_templates(&state).await;
    let base = query.base("", &nonce);
    let result = match DetailsPath::parse_module(&raw) {
        Ok(request) => serve_module(&state, &request, query.tab.as_deref(), base.clone()).await,
        Err(err) => Err(err.into()),
    };
    result.unwrap_or_else(|err| error_response(&state, base, err))
}

#[instrument(skip(state, request, base), fields(path = %request.path, version = %request.version))]
async fn serve_path(
    state: &AppState,
    request: &DetailsPath,
    tab: Option<&str>,
    base: BasePage,
) -> Result<Response, HttpError> {
    let source = state.source.as_ref();
    let info =
        source.path_info(&request.path, request.module_path.as_deref(), &request.version).await?;
    let path = request.path.as_str();
    let (module_path, version) = (info.module_path.as_str(), info.version.as_str());
    let use_directories = state.config.features.use_directories;
    debug!(module = module_path, resolved = version, is_package = info.is_package, "path resolved");

    if !info.is_package && path == module_path {
        let module = load_module(source, module_path, version).await?;
        return serve(state, ResourceView::Module(&module), tab, request, base).await;
    }

    match (info.is_package, use_directories) {
        (true, true) => {
            let package = source.versioned_directory(path, module_path, version).await?;
            serve(state, ResourceView::Package(Shape::Versioned(&package)), tab, request, base).await
        }
        (true, false) => {
            let package = source.legacy_package(path, module_path, version).await?;
            serve(state, ResourceView::Package(Shape::Legacy(&package)), tab, request, base).await
        }
        (false, true) => {
            let directory = source.versioned_directory(path, module_path, version).await?;
            serve(state, ResourceView::Directory(Shape::Versioned(&directory)), tab, request, base)
                .await
        }
        (false, false) => {
            let view = LegacyDirectoryView {
                directory: source.legacy_directory(path, module_path, version).await?,
                licenses: source.package_licenses(path, module_path, version).await?,
            };
            serve(state, ResourceView::Directory(Shape::Legacy(&view)), tab, request, base).await
        }
    }
}

#[instrument(skip(state, request, base), fields(module = %request.path, version = %request.version))]
async fn serve_module(
    state: &AppState,
    request: &DetailsPath,
    tab: Option<&str>,
    base: BasePage,
) -> Result<Response, HttpError> {
    let module = load_module(state.source.as_ref(), &request.path, &request.version).await?;
    serve(state, ResourceView::Module(&module), tab, request, base).await
}

async fn load_module(
    source: &dyn DataSource,
    module_path: &str,
    version: &str,
) -> Result<ModuleView, HttpError> {
    let info = source.module_info(module_path, version).await?;
    let licenses = source.module_licenses(module_path, &info.version).await?;
    let readme = source.module_readme(module_path, &info.version).await?;
    Ok(ModuleView { info, licenses, readme })
}

/// The requested tab, or overview when it is missing, unknown or disabled for the kind.
fn select_tab<'a>(
    registry: &'a TabRegistry,
    kind: ResourceKind,
    requested: Option<&str>,
) -> Result<&'a TabSetting, HttpError> {
    requested
        .and_then(|tab| registry.lookup(kind, tab))
        .filter(|setting| !setting.disabled)
        .or_else(|| registry.get(kind, TabId::Overview))
        .ok_or_else(|| HttpError::internal(format!("no overview tab for {kind}")))
}

fn page_header(meta: &dyn ResourceMeta, kind: ResourceKind, versioned: bool) -> PageHeader {
    let module = meta.module();
    let (url, latest_url) = match kind {
        ResourceKind::Module => (
            module_url(&module.module_path, versioned.then_some(module.version.as_str())),
            module_url(&module.module_path, None),
        ),
        ResourceKind::Package | ResourceKind::Directory => {
            let latest = format!("/{}", meta.path());
            let url =
                if versioned { format!("{latest}@{}", module.version) } else { latest.clone() };
            (url, latest)
        }
    };

    PageHeader {
        title: match kind {
            ResourceKind::Package => meta.path().rsplit('/').next().unwrap_or_default().to_owned(),
            ResourceKind::Module | ResourceKind::Directory => meta.path().to_owned(),
        },
        path: meta.path().to_owned(),
        module_path: module.module_path.clone(),
        version: module.version.clone(),
        synopsis: meta.synopsis().to_owned(),
        is_redistributable: meta.is_redistributable(),
        latest_url,
        url,
    }
}

async fn serve(
    state: &AppState,
    view: ResourceView<'_>,
    tab: Option<&str>,
    request: &DetailsPath,
    mut base: BasePage,
) -> Result<Response, HttpError> {
    let kind = view.kind();
    let settings = select_tab(&state.registry, kind, tab)?;
    let header = page_header(view.meta(), kind, request.versioned);

    let details = state.dispatcher.dispatch(settings.id.as_ref(), view, request.versioned).await?;

    base.html_title = format!("{} {kind}", header.title);
    let page = DetailsPage {
        base,
        name: header.title.clone(),
        namespace: if kind == ResourceKind::Module { MODULE_NAMESPACE } else { PACKAGE_NAMESPACE },
        page_type: kind,
        settings,
        tabs: state.registry.enabled_tabs(kind).collect(),
        can_show_details: header.is_redistributable || settings.always_show_details,
        header,
        details,
    };
    Ok(render(state, settings.template, &page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_or_disabled_tabs_fall_back_to_overview() {
        let registry = TabRegistry::new();
        let pick = |kind, tab| select_tab(&registry, kind, tab).unwrap().id;

        assert_eq!(pick(ResourceKind::Package, None), TabId::Overview);
        assert_eq!(pick(ResourceKind::Package, Some("bogus")), TabId::Overview);
        assert_eq!(pick(ResourceKind::Package, Some("imports")), TabId::Imports);
        assert_eq!(pick(ResourceKind::Directory, Some("imports")), TabId::Overview);
        assert_eq!(pick(ResourceKind::Directory, Some("licenses")), TabId::Licenses);
        assert_eq!(pick(ResourceKind::Module, Some("packages")), TabId::Packages);
        assert_eq!(pick(ResourceKind::Module, Some("doc")), TabId::Overview);
    }
}
