use async_trait::async_trait;
use docsite_details::source::{DataSource, DataSourceError};
use docsite_domain::constants::LATEST_VERSION;
use docsite_domain::model::{
    LegacyDirectory, LegacyPackage, License, ModuleInfo, PackageMeta, PathInfo, Readme,
    VersionedDirectory,
};
use moka::future::Cache;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// (path, module path, version); the module path is empty when the request did not pin one.
type Key = (String, String, String);

/// Restricted data source in front of an upstream one.
///
/// Caches path resolution and package and module lookups of pinned versions for a bounded
/// time. Lookups of `latest` always go upstream, so a new release is visible on the next
/// request. It answers only the base queries: optional query families of the upstream source
/// are not forwarded, so it advertises no capabilities.
#[derive(Debug, Clone)]
pub struct ReadThroughSource {
    upstream: Arc<dyn DataSource>,
    path_infos: Cache<Key, PathInfo>,
    packages: Cache<Key, LegacyPackage>,
    modules: Cache<(String, String), ModuleInfo>,
}

fn key(path: &str, module_path: &str, version: &str) -> Key {
    (path.to_owned(), module_path.to_owned(), version.to_owned())
}

/// Errors are not cached; the shared error handed out by the cache is cloned back.
fn unshare(err: Arc<DataSourceError>) -> DataSourceError {
    Arc::unwrap_or_clone(err)
}

fn cache<K, V>(capacity: u64, ttl: Duration) -> Cache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder().max_capacity(capacity).time_to_live(ttl).build()
}

/// Answers from `cache` unless `version` is the moving `latest` alias.
async fn read_through<K, V>(
    cache: &Cache<K, V>,
    key: K,
    version: &str,
    load: impl Future<Output = Result<V, DataSourceError>>,
) -> Result<V, DataSourceError>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    if version == LATEST_VERSION {
        return load.await;
    }
    cache.try_get_with(key, load).await.map_err(unshare)
}

impl ReadThroughSource {
    /// `capacity` bounds each cache; entries expire `ttl` after insertion.
    pub fn new(upstream: Arc<dyn DataSource>, capacity: u64, ttl: Duration) -> Self {
        Self {
            upstream,
            path_infos: cache(capacity, ttl),
            packages: cache(capacity, ttl),
            modules: cache(capacity, ttl),
        }
    }
}

#[async_trait]
impl DataSource for ReadThroughSource {
    #[instrument(skip(self))]
    async fn path_info(
        &self,
        path: &str,
        module_path: Option<&str>,
        version: &str,
    ) -> Result<PathInfo, DataSourceError> {
        let key = key(path, module_path.unwrap_or_default(), version);
        read_through(&self.path_infos, key, version, async {
            debug!("path info cache miss");
            self.upstream.path_info(path, module_path, version).await
        })
        .await
    }

    #[instrument(skip(self))]
    async fn legacy_package(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<LegacyPackage, DataSourceError> {
        read_through(&self.packages, key(path, module_path, version), version, async {
            debug!("package cache miss");
            self.upstream.legacy_package(path, module_path, version).await
        })
        .await
    }

    async fn versioned_directory(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<VersionedDirectory, DataSourceError> {
        self.upstream.versioned_directory(path, module_path, version).await
    }

    async fn legacy_directory(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<LegacyDirectory, DataSourceError> {
        self.upstream.legacy_directory(path, module_path, version).await
    }

    #[instrument(skip(self))]
    async fn module_info(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<ModuleInfo, DataSourceError> {
        let key = (module_path.to_owned(), version.to_owned());
        read_through(&self.modules, key, version, async {
            debug!("module cache miss");
            self.upstream.module_info(module_path, version).await
        })
        .await
    }

    async fn module_licenses(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<License>, DataSourceError> {
        self.upstream.module_licenses(module_path, version).await
    }

    async fn package_licenses(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<License>, DataSourceError> {
        self.upstream.package_licenses(path, module_path, version).await
    }

    async fn module_readme(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<Option<Readme>, DataSourceError> {
        self.upstream.module_readme(module_path, version).await
    }

    async fn imports(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<String>, DataSourceError> {
        self.upstream.imports(path, module_path, version).await
    }

    async fn package_versions(&self, series_path: &str) -> Result<Vec<ModuleInfo>, DataSourceError> {
        self.upstream.package_versions(series_path).await
    }

    async fn module_versions(&self, module_path: &str) -> Result<Vec<ModuleInfo>, DataSourceError> {
        self.upstream.module_versions(module_path).await
    }

    async fn packages_in_directory(
        &self,
        dir_path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<PackageMeta>, DataSourceError> {
        self.upstream.packages_in_directory(dir_path, module_path, version).await
    }
}
