use crate::error::{StoreError, StoreErrorExt};
use crate::seed::{Seed, SeedModule, SeedPackage, is_within};
use async_trait::async_trait;
use docsite_details::source::{DataSource, DataSourceError, ImportedBySource};
use docsite_domain::constants::{LATEST_VERSION, STDLIB_MODULE_PATH};
use docsite_domain::model::{
    DirectoryMeta, LegacyDirectory, LegacyPackage, License, ModuleInfo, PackageDoc, PackageMeta,
    PathInfo, Readme, VersionedDirectory,
};
use docsite_domain::paths::{is_std_lib_path, path_in_module, series_path, series_path_for_package};
use fxhash::FxHashMap;
use semver::Version;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, instrument};

/// Full in-memory data source, including the reverse import index.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Versions of each module, keyed by module path.
    modules: FxHashMap<String, Vec<SeedModule>>,
    /// Importee path to the paths of packages importing it.
    importers: FxHashMap<String, BTreeSet<String>>,
}

impl MemoryStore {
    /// Loads a JSON seed file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).context(format!("reading {}", path.display()))?;
        let store = Self::from_json(&raw).context(format!("parsing {}", path.display()))?;
        info!(
            path = %path.display(),
            modules = store.modules.len(),
            "seed loaded"
        );
        Ok(store)
    }

    pub fn from_json(raw: &[u8]) -> Result<Self, StoreError> {
        let seed: Seed = serde_json::from_slice(raw)?;
        Ok(Self::from_seed(seed))
    }

    fn from_seed(seed: Seed) -> Self {
        let mut store = Self::default();
        for module in seed.modules {
            for package in &module.packages {
                for import in &package.imports {
                    store.importers.entry(import.clone()).or_default().insert(package.path.clone());
                }
            }
            store.modules.entry(module.info.module_path.clone()).or_default().push(module);
        }
        store
    }

    /// Resolves a module version, `latest` meaning the highest release (or the highest
    /// pre-release when no release exists).
    fn module(&self, module_path: &str, version: &str) -> Result<&SeedModule, DataSourceError> {
        let versions = self
            .modules
            .get(module_path)
            .ok_or_else(|| DataSourceError::not_found(format!("module {module_path}")))?;

        let found = if version == LATEST_VERSION {
            latest(versions)
        } else {
            versions.iter().find(|module| module.info.version == version)
        };
        found.ok_or_else(|| DataSourceError::not_found(format!("{module_path}@{version}")))
    }

    fn package(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<(&SeedModule, &SeedPackage), DataSourceError> {
        let module = self.module(module_path, version)?;
        let package = module
            .package(path)
            .ok_or_else(|| DataSourceError::not_found(format!("package {path}")))?;
        Ok((module, package))
    }

    /// Resolves a directory, which must be the module root or contain at least one package.
    fn directory(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<&SeedModule, DataSourceError> {
        let module = self.module(module_path, version)?;
        if path != module_path && module.packages_under(path).next().is_none() {
            return Err(DataSourceError::not_found(format!("directory {path}")));
        }
        Ok(module)
    }

    fn root_readme(module: &SeedModule, path: &str) -> Option<Readme> {
        (path == module.info.module_path).then(|| module.readme.clone()).flatten()
    }

    /// Every version of every module sharing the series of `series`.
    fn series_modules<'a>(&'a self, series: &'a str) -> impl Iterator<Item = &'a SeedModule> + 'a {
        self.modules
            .iter()
            .filter(move |(module_path, _)| series_path(module_path) == series)
            .flat_map(|(_, versions)| versions)
    }
}

/// Reports whether a series-relative package path can live in `module_path`.
fn in_series(series_package_path: &str, module_path: &str) -> bool {
    if module_path == STDLIB_MODULE_PATH {
        return is_std_lib_path(series_package_path);
    }
    is_within(series_package_path, series_path(module_path))
}

fn parse_version(version: &str) -> Option<Version> {
    Version::parse(version.strip_prefix('v').unwrap_or(version)).ok()
}

fn latest(versions: &[SeedModule]) -> Option<&SeedModule> {
    let parsed = versions.iter().filter_map(|m| parse_version(&m.info.version).map(|v| (v, m)));
    let (releases, prereleases): (Vec<_>, Vec<_>) = parsed.partition(|(v, _)| v.pre.is_empty());
    highest(releases).or_else(|| highest(prereleases)).or_else(|| versions.last())
}

fn highest(candidates: Vec<(Version, &SeedModule)>) -> Option<&SeedModule> {
    candidates.into_iter().max_by(|(a, _), (b, _)| a.cmp(b)).map(|(_, module)| module)
}

fn package_meta(module: &SeedModule, package: &SeedPackage) -> PackageMeta {
    PackageMeta {
        path: package.path.clone(),
        name: package.name.clone(),
        synopsis: package.synopsis.clone(),
        is_redistributable: package.is_redistributable && module.info.is_redistributable,
        licenses: module.license_metadata(&package.path),
    }
}

#[async_trait]
impl DataSource for MemoryStore {
    #[instrument(skip(self))]
    async fn path_info(
        &self,
        path: &str,
        module_path: Option<&str>,
        version: &str,
    ) -> Result<PathInfo, DataSourceError> {
        if path.is_empty() {
            return Err(DataSourceError::InvalidArgument {
                message: "empty path".into(),
                context: None,
            });
        }

        let contains = |module: &SeedModule| -> bool {
            module.info.module_path == path || module.packages_under(path).next().is_some()
        };

        let module = if let Some(module_path) = module_path {
            Some(self.module(module_path, version)?).filter(|module| contains(*module))
        } else {
            // The longest module path containing `path` wins.
            let mut candidates: Vec<&str> = self
                .modules
                .keys()
                .map(String::as_str)
                .filter(|module_path| {
                    is_within(path, module_path)
                        || (*module_path == STDLIB_MODULE_PATH && is_std_lib_path(path))
                })
                .collect();
            candidates.sort_by_key(|module_path| std::cmp::Reverse(module_path.len()));
            candidates
                .into_iter()
                .filter_map(|module_path| self.module(module_path, version).ok())
                .find(|module| contains(*module))
        };

        let module = module.ok_or_else(|| DataSourceError::not_found(format!("{path}@{version}")))?;
        Ok(PathInfo {
            module_path: module.info.module_path.clone(),
            version: module.info.version.clone(),
            is_package: module.package(path).is_some(),
        })
    }

    #[instrument(skip(self))]
    async fn legacy_package(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<LegacyPackage, DataSourceError> {
        let (module, package) = self.package(path, module_path, version)?;
        Ok(LegacyPackage {
            module: module.info.clone(),
            path: package.path.clone(),
            series_path: series_path_for_package(&package.path, module_path),
            name: package.name.clone(),
            synopsis: package.synopsis.clone(),
            is_redistributable: package.is_redistributable && module.info.is_redistributable,
            licenses: module.license_metadata(path),
            documentation_html: package.documentation_html.clone(),
            module_readme: module.readme.clone(),
        })
    }

    #[instrument(skip(self))]
    async fn versioned_directory(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<VersionedDirectory, DataSourceError> {
        let module = self.directory(path, module_path, version)?;
        let package = module.package(path);
        Ok(VersionedDirectory {
            module: module.info.clone(),
            meta: DirectoryMeta {
                path: path.to_owned(),
                series_path: series_path_for_package(path, module_path),
                is_redistributable: module.info.is_redistributable
                    && package.is_none_or(|package| package.is_redistributable),
                licenses: module.license_metadata(path),
            },
            readme: Self::root_readme(module, path),
            package: package.map(|package| PackageDoc {
                name: package.name.clone(),
                synopsis: package.synopsis.clone(),
                documentation_html: package.documentation_html.clone(),
            }),
        })
    }

    #[instrument(skip(self))]
    async fn legacy_directory(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<LegacyDirectory, DataSourceError> {
        let module = self.directory(path, module_path, version)?;
        Ok(LegacyDirectory {
            module: module.info.clone(),
            path: path.to_owned(),
            readme: Self::root_readme(module, path),
            packages: module.packages_under(path).map(|package| package_meta(module, package)).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn module_info(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<ModuleInfo, DataSourceError> {
        Ok(self.module(module_path, version)?.info.clone())
    }

    #[instrument(skip(self))]
    async fn module_licenses(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<License>, DataSourceError> {
        Ok(self.module(module_path, version)?.licenses.clone())
    }

    #[instrument(skip(self))]
    async fn package_licenses(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<License>, DataSourceError> {
        let module = self.directory(path, module_path, version)?;
        Ok(module.licenses_for(path).cloned().collect())
    }

    #[instrument(skip(self))]
    async fn module_readme(
        &self,
        module_path: &str,
        version: &str,
    ) -> Result<Option<Readme>, DataSourceError> {
        Ok(self.module(module_path, version)?.readme.clone())
    }

    #[instrument(skip(self))]
    async fn imports(
        &self,
        path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<String>, DataSourceError> {
        let (_, package) = self.package(path, module_path, version)?;
        Ok(package.imports.clone())
    }

    #[instrument(skip(self))]
    async fn package_versions(&self, series_path: &str) -> Result<Vec<ModuleInfo>, DataSourceError> {
        let infos: Vec<ModuleInfo> = self
            .modules
            .keys()
            .filter(|module_path| in_series(series_path, module_path))
            .flat_map(|module_path| {
                let path = path_in_module(series_path, module_path);
                self.modules[module_path]
                    .iter()
                    .filter(move |module| module.package(&path).is_some())
                    .map(|module| module.info.clone())
            })
            .collect();
        if infos.is_empty() {
            return Err(DataSourceError::not_found(format!("package series {series_path}")));
        }
        Ok(infos)
    }

    #[instrument(skip(self))]
    async fn module_versions(&self, module_path: &str) -> Result<Vec<ModuleInfo>, DataSourceError> {
        let infos: Vec<ModuleInfo> =
            self.series_modules(series_path(module_path)).map(|module| module.info.clone()).collect();
        if infos.is_empty() {
            return Err(DataSourceError::not_found(format!("module {module_path}")));
        }
        Ok(infos)
    }

    #[instrument(skip(self))]
    async fn packages_in_directory(
        &self,
        dir_path: &str,
        module_path: &str,
        version: &str,
    ) -> Result<Vec<PackageMeta>, DataSourceError> {
        let module = self.module(module_path, version)?;
        Ok(module.packages_under(dir_path).map(|package| package_meta(module, package)).collect())
    }

    fn imported_by_source(&self) -> Option<&dyn ImportedBySource> {
        Some(self)
    }
}

#[async_trait]
impl ImportedBySource for MemoryStore {
    #[instrument(skip(self))]
    async fn imported_by(
        &self,
        path: &str,
        module_path: &str,
        limit: usize,
    ) -> Result<Vec<String>, DataSourceError> {
        Ok(self
            .importers
            .get(path)
            .into_iter()
            .flatten()
            .filter(|importer| !is_within(importer, module_path))
            .take(limit)
            .cloned()
            .collect())
    }
}
