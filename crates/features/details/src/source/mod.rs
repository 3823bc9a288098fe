//! The data source contract consumed by the dispatcher.
//!
//! A data source resolves paths and versions into module, package and directory metadata.
//! Every implementation provides the base [`DataSource`] queries; optional query families
//! are advertised through [`DataSource::capabilities`] and reached through typed accessors
//! such as [`DataSource::imported_by_source`], so a caller can tell up front whether a query
//! is available instead of discovering it through a failed call.

mod error;

pub use error::{DataSourceError, DataSourceErrorExt};

use async_trait::async_trait;
use docsite_domain::capabilities::Capabilities;
use docsite_domain::model::{
    LegacyDirectory, LegacyPackage, License, ModuleInfo, PackageMeta, PathInfo, Readme,
    VersionedDirectory,
};
use std::fmt::Debug;

/// Base queries every data source answers. `version` may be `latest`.
#[async_trait]
pub trait DataSource: Debug + Send + Sync {
    /// Resolves a full path to its module and version, and reports whether it is a package.
    /// `module_path` is `None` when the request did not pin one.
    async fn path_info(
        &self,
        path: &str,
        module_path: Option<&str>,
        version: &str,
    ) -> Result<PathInfo, DataSourceError>;

    async fn legacy_package(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<LegacyPackage, DataSourceError>;

    async fn versioned_directory(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<VersionedDirectory, DataSourceError>;

    async fn legacy_directory(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<LegacyDirectory, DataSourceError>;

    async fn module_info(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<ModuleInfo, DataSourceError>;

    async fn module_licenses(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<License>, DataSourceError>;

    /// Licenses that apply to the directory at `path`.
    async fn package_licenses(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<License>, DataSourceError>;

    async fn module_readme(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<Option<Readme>, DataSourceError>;

    async fn imports(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<String>, DataSourceError>;

    /// Every version of every module in the series that contains the package whose
    /// series-relative path is `series_path`.
    async fn package_versions(&self, series_path: &str)
    -> Result<Vec<ModuleInfo>, DataSourceError>;

    /// Every version of every module in the series of `module_path`.
    async fn module_versions(&self, module_path: &str) -> Result<Vec<ModuleInfo>, DataSourceError>;

    /// Packages at or below `dir_path` in the given module version.
    async fn packages_in_directory(
        &self,
        dir_path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<PackageMeta>, DataSourceError>;

    /// Reverse import lookups, when this source supports them.
    fn imported_by_source(&self) -> Option<&dyn ImportedBySource> {
        None
    }

    /// The optional query families this source answers.
    fn capabilities(&self) -> Capabilities {
        let mut capabilities = Capabilities::empty();
        capabilities.set(Capabilities::IMPORTED_BY, self.imported_by_source().is_some());
        capabilities
    }
}

/// Reverse import index, only available on a full store.
#[async_trait]
pub trait ImportedBySource: Send + Sync {
    /// Paths of packages importing `path`, at most `limit` of them.
    async fn imported_by(
        &self,
        path: &str,
        module_path: &str,
        limit: usize,
    ) -> Result<Vec<String>, DataSourceError>;
}
