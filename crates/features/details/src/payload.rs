//! Display-ready tab content.
//!
//! Every variant serializes as a flat object so templates read `details.<field>` without
//! caring which tab produced it.

use serde::Serialize;

/// Upper bound on importers listed on the "Imported By" tab.
pub const IMPORTED_BY_LIMIT: usize = 20_000;

/// Content of one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Details {
    Documentation(Documentation),
    Overview(Overview),
    Directory(Directory),
    Versions(Versions),
    Imports(Imports),
    ImportedBy(ImportedBy),
    Licenses(Licenses),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Documentation {
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub module_path: String,
    pub module_url: String,
    pub package_source_url: Option<String>,
    pub repository_url: Option<String>,
    pub readme_source: Option<String>,
    pub readme_html: Option<String>,
    pub redistributable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Directory {
    pub path: String,
    pub module_path: String,
    pub version: String,
    pub is_redistributable: bool,
    /// License types of the listed directory itself.
    pub licenses: Vec<String>,
    pub packages: Vec<PackageSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub path: String,
    /// Path relative to the listed directory; empty for the directory's own package.
    pub suffix: String,
    pub synopsis: String,
    pub is_redistributable: bool,
    pub licenses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Versions {
    /// Versions of the module the page belongs to.
    pub this_module: Vec<VersionList>,
    /// Versions of other major-version modules in the same series.
    pub other_modules: Vec<VersionList>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionList {
    pub module_path: String,
    pub major: String,
    pub versions: Vec<VersionSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionSummary {
    pub version: String,
    pub link: String,
    pub commit_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Imports {
    pub module_path: String,
    pub std_lib: Vec<String>,
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportedBy {
    pub module_path: String,
    pub imported_by: Vec<String>,
    pub total: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Licenses {
    pub licenses: Vec<LicenseView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseView {
    pub anchor: String,
    pub types: Vec<String>,
    pub file_path: String,
    pub contents: String,
    pub source_url: Option<String>,
}
