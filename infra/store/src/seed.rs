//! On-disk seed format of the memory store.

use docsite_domain::model::{License, LicenseMetadata, ModuleInfo, Readme};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Seed {
    pub modules: Vec<SeedModule>,
}

/// One module version with its packages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SeedModule {
    #[serde(flatten)]
    pub info: ModuleInfo,
    pub readme: Option<Readme>,
    pub licenses: Vec<License>,
    pub packages: Vec<SeedPackage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct SeedPackage {
    pub path: String,
    pub name: String,
    pub synopsis: String,
    pub is_redistributable: bool,
    pub documentation_html: String,
    pub imports: Vec<String>,
}

impl Default for SeedPackage {
    fn default() -> Self {
        Self {
            path: String::new(),
            name: String::new(),
            synopsis: String::new(),
            is_redistributable: true,
            documentation_html: String::new(),
            imports: Vec::new(),
        }
    }
}

impl SeedModule {
    pub(crate) fn package(&self, path: &str) -> Option<&SeedPackage> {
        self.packages.iter().find(|package| package.path == path)
    }

    /// Packages at or below `dir`.
    pub(crate) fn packages_under<'a>(
        &'a self,
        dir: &'a str,
    ) -> impl Iterator<Item = &'a SeedPackage> + 'a {
        self.packages.iter().filter(move |package| is_within(&package.path, dir))
    }

    /// Licenses whose file sits in `dir` or one of its parents.
    pub(crate) fn licenses_for<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = &'a License> + 'a {
        let suffix = docsite_domain::paths::package_suffix(dir, &self.info.module_path);
        self.licenses.iter().filter(move |license| {
            let license_dir = license.file_path.rsplit_once('/').map_or("", |(dir, _)| dir);
            license_dir.is_empty() || is_within(suffix, license_dir)
        })
    }

    pub(crate) fn license_metadata(&self, dir: &str) -> Vec<LicenseMetadata> {
        self.licenses_for(dir).map(License::metadata).collect()
    }
}

/// Reports whether `path` equals `dir` or lies below it.
pub(crate) fn is_within(path: &str, dir: &str) -> bool {
    path == dir || path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
}
