use async_trait::async_trait;
use docsite_details::payload::Details;
use docsite_details::prelude::*;
use docsite_domain::capabilities::Capabilities;
use docsite_domain::model::{
    DirectoryMeta, LegacyDirectory, LegacyPackage, License, LicenseMetadata, ModuleInfo,
    PackageDoc, PackageMeta, PathInfo, Readme, VersionedDirectory,
};
use docsite_domain::tabs::{ResourceKind, TabId, TabRegistry};
use std::sync::Arc;

const MODULE: &str = "github.com/a/b";
const VERSION: &str = "v1.1.0";

#[derive(Debug)]
struct FakeSource {
    full: bool,
}

fn module_info() -> ModuleInfo {
    ModuleInfo {
        module_path: MODULE.to_owned(),
        version: VERSION.to_owned(),
        commit_time: Some("2024-01-02T03:04:05Z".to_owned()),
        is_redistributable: true,
        repository_url: Some("https://github.com/a/b".to_owned()),
    }
}

fn licenses() -> Vec<License> {
    vec![License {
        types: vec!["MIT".to_owned()],
        file_path: "LICENSE".to_owned(),
        contents: "Permission is hereby granted".to_owned(),
    }]
}

fn readme() -> Readme {
    Readme { file_path: "README.md".to_owned(), contents: "# b".to_owned() }
}

fn package_meta(suffix: &str) -> PackageMeta {
    let path = if suffix.is_empty() { MODULE.to_owned() } else { format!("{MODULE}/{suffix}") };
    PackageMeta {
        name: path.rsplit('/').next().unwrap_or_default().to_owned(),
        path,
        synopsis: format!("package {suffix}"),
        is_redistributable: true,
        licenses: vec![LicenseMetadata { types: vec!["MIT".to_owned()], file_path: "LICENSE".to_owned() }],
    }
}

fn all_packages() -> Vec<PackageMeta> {
    vec![package_meta("c/d"), package_meta(""), package_meta("c")]
}

fn legacy_package() -> LegacyPackage {
    LegacyPackage {
        module: module_info(),
        path: format!("{MODULE}/c"),
        series_path: format!("{MODULE}/c"),
        name: "c".to_owned(),
        synopsis: "package c".to_owned(),
        is_redistributable: true,
        licenses: vec![LicenseMetadata { types: vec!["MIT".to_owned()], file_path: "LICENSE".to_owned() }],
        documentation_html: "<p>docs</p>".to_owned(),
        module_readme: Some(readme()),
    }
}

fn versioned_package() -> VersionedDirectory {
    VersionedDirectory {
        module: module_info(),
        meta: DirectoryMeta {
            path: format!("{MODULE}/c"),
            series_path: format!("{MODULE}/c"),
            is_redistributable: true,
            licenses: vec![LicenseMetadata { types: vec!["MIT".to_owned()], file_path: "LICENSE".to_owned() }],
        },
        readme: Some(readme()),
        package: Some(PackageDoc {
            name: "c".to_owned(),
            synopsis: "package c".to_owned(),
            documentation_html: "<p>docs</p>".to_owned(),
        }),
    }
}

fn module_view() -> ModuleView {
    ModuleView { info: module_info(), licenses: licenses(), readme: Some(readme()) }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn path_info(
        &self,
        path: &str,
        _module_path: Option<&str>,
        version: &str,
    ) -> Result<PathInfo, DataSourceError> {
        Ok(PathInfo { module_path: MODULE.to_owned(), version: version.to_owned(), is_package: path != MODULE })
    }

    async fn legacy_package(&self, _: &str, _: &str, _: &str) -> Result<LegacyPackage, DataSourceError> {
        Ok(legacy_package())
    }

    async fn versioned_directory(&self, _: &str, _: &str, _: &str) -> Result<VersionedDirectory, DataSourceError> {
        Ok(versioned_package())
    }

    async fn legacy_directory(
        &self,
        path: &str,
        _: &str,
        _: &str,
    ) -> Result<LegacyDirectory, DataSourceError> {
        Ok(LegacyDirectory {
            module: module_info(),
            path: path.to_owned(),
            readme: Some(readme()),
            packages: all_packages(),
        })
    }

    async fn module_info(&self, _: &str, _: &str) -> Result<ModuleInfo, DataSourceError> {
        Ok(module_info())
    }

    async fn module_licenses(&self, _: &str, _: &str) -> Result<Vec<License>, DataSourceError> {
        Ok(licenses())
    }

    async fn package_licenses(&self, _: &str, _: &str, _: &str) -> Result<Vec<License>, DataSourceError> {
        Ok(licenses())
    }

    async fn module_readme(&self, _: &str, _: &str) -> Result<Option<Readme>, DataSourceError> {
        Ok(Some(readme()))
    }

    async fn imports(&self, _: &str, _: &str, _: &str) -> Result<Vec<String>, DataSourceError> {
        Ok(vec!["fmt".to_owned(), format!("{MODULE}/c/d"), "golang.org/x/text".to_owned()])
    }

    async fn package_versions(&self, _: &str) -> Result<Vec<ModuleInfo>, DataSourceError> {
        self.module_versions(MODULE).await
    }

    async fn module_versions(&self, _: &str) -> Result<Vec<ModuleInfo>, DataSourceError> {
        let mut older = module_info();
        older.version = "v1.0.0".to_owned();
        Ok(vec![older, module_info()])
    }

    async fn packages_in_directory(
        &self,
        dir_path: &str,
        _: &str,
        _: &str,
    ) -> Result<Vec<PackageMeta>, DataSourceError> {
        Ok(all_packages()
            .into_iter()
            .filter(|p| p.path == dir_path || p.path.starts_with(&format!("{dir_path}/")))
            .collect())
    }

    fn imported_by_source(&self) -> Option<&dyn ImportedBySource> {
        self.full.then_some(self as &dyn ImportedBySource)
    }
}

#[async_trait]
impl ImportedBySource for FakeSource {
    async fn imported_by(&self, _: &str, _: &str, _: usize) -> Result<Vec<String>, DataSourceError> {
        Ok(vec!["github.com/z/z".to_owned(), "github.com/y/y".to_owned(), "github.com/z/z".to_owned()])
    }
}

fn dispatcher(full: bool) -> Dispatcher {
    Dispatcher::new(Arc::new(FakeSource { full }), Arc::new(TabRegistry::new()))
}

#[tokio::test]
async fn every_package_tab_dispatches_on_full_source() {
    let dispatcher = dispatcher(true);
    assert!(dispatcher.capabilities().contains(Capabilities::IMPORTED_BY));

    let registry = TabRegistry::new();
    let package = legacy_package();
    for tab in registry.tabs_for(ResourceKind::Package) {
        let details = dispatcher.dispatch_legacy_package(tab.id.as_ref(), &package, false).await;
        assert!(details.is_ok(), "tab {} failed: {details:?}", tab.id);
    }
}

#[tokio::test]
async fn imported_by_is_unsupported_on_restricted_source() {
    let dispatcher = dispatcher(false);
    assert!(dispatcher.capabilities().is_empty());

    let registry = TabRegistry::new();
    let package = legacy_package();
    for tab in registry.tabs_for(ResourceKind::Package) {
        let details = dispatcher.dispatch_legacy_package(tab.id.as_ref(), &package, false).await;
        if tab.id == TabId::ImportedBy {
            assert!(matches!(details, Err(DetailsError::Unsupported { .. })), "{details:?}");
        } else {
            assert!(details.is_ok(), "tab {} failed: {details:?}", tab.id);
        }
    }
}

#[tokio::test]
async fn imported_by_is_deduplicated_and_sorted() {
    let details = dispatcher(true)
        .dispatch_legacy_package("importedby", &legacy_package(), false)
        .await
        .unwrap();
    let Details::ImportedBy(imported_by) = details else { panic!("unexpected {details:?}") };
    assert_eq!(imported_by.imported_by, ["github.com/y/y", "github.com/z/z"]);
    assert_eq!(imported_by.total, 2);
    assert!(!imported_by.truncated);
}

#[tokio::test]
async fn unknown_tabs_are_classified() {
    let dispatcher = dispatcher(true);
    let package = legacy_package();
    let module = module_view();
    let directory = versioned_package();

    for tab in ["", "bogus", "Overview", "packages"] {
        let result = dispatcher.dispatch_legacy_package(tab, &package, false).await;
        assert!(matches!(result, Err(DetailsError::UnknownTab { .. })), "{tab}: {result:?}");
    }
    for tab in ["doc", "imports", "importedby", "subdirectories"] {
        let result = dispatcher.dispatch_module(tab, &module, false).await;
        assert!(matches!(result, Err(DetailsError::UnknownTab { .. })), "{tab}: {result:?}");
    }
    for tab in ["doc", "versions", "imports", "importedby"] {
        let result = dispatcher.dispatch_directory(tab, &directory, false).await;
        assert!(matches!(result, Err(DetailsError::UnknownTab { .. })), "{tab}: {result:?}");
    }
}

#[tokio::test]
async fn package_shapes_produce_equivalent_content() {
    let dispatcher = dispatcher(true);
    let legacy = legacy_package();
    let versioned = versioned_package();
    for tab in ["doc", "overview", "versions", "licenses", "imports", "subdirectories"] {
        let a = dispatcher.dispatch_legacy_package(tab, &legacy, true).await.unwrap();
        let b = dispatcher.dispatch_package(tab, &versioned, true).await.unwrap();
        assert_eq!(a, b, "tab {tab}");
    }
}

#[tokio::test]
async fn module_packages_match_across_directory_modes() {
    let module = module_view();
    let legacy = dispatcher(true).dispatch_module("packages", &module, false).await.unwrap();
    let versioned = dispatcher(true)
        .with_directories(true)
        .dispatch_module("packages", &module, false)
        .await
        .unwrap();
    assert_eq!(legacy, versioned);

    let Details::Directory(listing) = legacy else { panic!("unexpected {legacy:?}") };
    let suffixes: Vec<&str> = listing.packages.iter().map(|p| p.suffix.as_str()).collect();
    assert_eq!(suffixes, ["", "c", "c/d"]);
    assert_eq!(listing.licenses, ["MIT"]);
    assert!(listing.is_redistributable);
}

#[tokio::test]
async fn directory_shapes_agree() {
    let dispatcher = dispatcher(false);
    let legacy = LegacyDirectoryView {
        directory: LegacyDirectory {
            module: module_info(),
            path: format!("{MODULE}/c"),
            readme: Some(readme()),
            packages: all_packages(),
        },
        licenses: licenses(),
    };
    let versioned = VersionedDirectory {
        module: module_info(),
        meta: DirectoryMeta {
            path: format!("{MODULE}/c"),
            series_path: format!("{MODULE}/c"),
            is_redistributable: true,
            licenses: vec![LicenseMetadata { types: vec!["MIT".to_owned()], file_path: "LICENSE".to_owned() }],
        },
        readme: Some(readme()),
        package: None,
    };

    for tab in ["overview", "subdirectories", "licenses"] {
        let a = dispatcher.dispatch_legacy_directory(tab, &legacy, false).await.unwrap();
        let b = dispatcher.dispatch_directory(tab, &versioned, false).await.unwrap();
        assert_eq!(a, b, "tab {tab}");
    }

    let listing = dispatcher.dispatch_directory("subdirectories", &versioned, false).await.unwrap();
    let Details::Directory(listing) = listing else { panic!("unexpected {listing:?}") };
    assert_eq!(listing.licenses, ["MIT"]);
}

#[tokio::test]
async fn unredistributable_directory_listing_keeps_flag() {
    let mut directory = versioned_package();
    directory.package = None;
    directory.meta.is_redistributable = false;
    let listing =
        dispatcher(false).dispatch_directory("subdirectories", &directory, false).await.unwrap();
    let Details::Directory(listing) = listing else { panic!("unexpected {listing:?}") };
    assert!(!listing.is_redistributable);
}

#[tokio::test]
async fn versions_link_to_pinned_package_pages() {
    let details =
        dispatcher(false).dispatch_legacy_package("versions", &legacy_package(), false).await.unwrap();
    let Details::Versions(versions) = details else { panic!("unexpected {details:?}") };
    let links: Vec<&str> =
        versions.this_module[0].versions.iter().map(|v| v.link.as_str()).collect();
    assert_eq!(links, ["/github.com/a/b/c@v1.1.0", "/github.com/a/b/c@v1.0.0"]);
}
