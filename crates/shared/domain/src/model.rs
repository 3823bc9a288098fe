//! Resource metadata as served by a data source.
//!
//! Packages and directories exist in two shapes while the directory migration is in
//! flight: the legacy, package-centric shape ([`LegacyPackage`], [`LegacyDirectory`]) and the
//! version-aware shape ([`VersionedDirectory`]). Both describe the same resources.

use serde::{Deserialize, Serialize};

/// A module at a specific version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleInfo {
    pub module_path: String,
    pub version: String,
    /// RFC 3339 commit timestamp, when known.
    pub commit_time: Option<String>,
    pub is_redistributable: bool,
    pub repository_url: Option<String>,
}

/// A license file detected in a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub types: Vec<String>,
    pub file_path: String,
    pub contents: String,
}

impl License {
    #[must_use]
    pub fn metadata(&self) -> LicenseMetadata {
        LicenseMetadata { types: self.types.clone(), file_path: self.file_path.clone() }
    }
}

/// License identity without the file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseMetadata {
    pub types: Vec<String>,
    pub file_path: String,
}

/// Converts full licenses into their metadata.
#[must_use]
pub fn licenses_to_metadata(licenses: &[License]) -> Vec<LicenseMetadata> {
    licenses.iter().map(License::metadata).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Readme {
    pub file_path: String,
    pub contents: String,
}

/// Summary of a package, as listed inside a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageMeta {
    pub path: String,
    pub name: String,
    pub synopsis: String,
    pub is_redistributable: bool,
    pub licenses: Vec<LicenseMetadata>,
}

/// Package documentation attached to a version-aware directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageDoc {
    pub name: String,
    pub synopsis: String,
    pub documentation_html: String,
}

/// Pre-migration package shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyPackage {
    pub module: ModuleInfo,
    pub path: String,
    /// Path of the package within the major-version series of its module.
    pub series_path: String,
    pub name: String,
    pub synopsis: String,
    pub is_redistributable: bool,
    pub licenses: Vec<LicenseMetadata>,
    pub documentation_html: String,
    /// The module readme, carried on the legacy module record.
    pub module_readme: Option<Readme>,
}

/// Pre-migration directory shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyDirectory {
    pub module: ModuleInfo,
    pub path: String,
    pub readme: Option<Readme>,
    pub packages: Vec<PackageMeta>,
}

/// Identity of a directory shared by every version-aware resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryMeta {
    pub path: String,
    pub series_path: String,
    pub is_redistributable: bool,
    pub licenses: Vec<LicenseMetadata>,
}

/// Version-aware directory; a package is a directory with `package` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionedDirectory {
    pub module: ModuleInfo,
    pub meta: DirectoryMeta,
    pub readme: Option<Readme>,
    pub package: Option<PackageDoc>,
}

/// Where a requested path lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInfo {
    pub module_path: String,
    pub version: String,
    pub is_package: bool,
}
