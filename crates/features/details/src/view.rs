//! The resource being viewed.
//!
//! Packages and directories arrive either in their legacy shape or in their version-aware
//! shape. [`ResourceMeta`] is the adapter both shapes implement, so every tab whose content
//! only depends on resource metadata goes through the same code regardless of shape.

use docsite_domain::model::{
    LegacyDirectory, LegacyPackage, License, LicenseMetadata, ModuleInfo, Readme,
    VersionedDirectory,
};
use docsite_domain::paths::series_path_for_package;
use docsite_domain::tabs::ResourceKind;
use std::borrow::Cow;

/// Metadata every viewable resource exposes.
pub trait ResourceMeta: Sync {
    fn path(&self) -> &str;

    fn module(&self) -> &ModuleInfo;

    /// Path of the resource inside the major-version series of its module.
    fn series_path(&self) -> Cow<'_, str>;

    fn is_redistributable(&self) -> bool;

    fn readme(&self) -> Option<&Readme>;

    /// License types that apply to the resource, in declaration order.
    fn license_types(&self) -> Vec<String>;

    fn synopsis(&self) -> &str {
        ""
    }

    fn documentation_html(&self) -> Option<&str> {
        None
    }
}

impl ResourceMeta for LegacyPackage {
    fn path(&self) -> &str {
        &self.path
    }

    fn module(&self) -> &ModuleInfo {
        &self.module
    }

    fn series_path(&self) -> Cow<'_, str> {
        if self.series_path.is_empty() {
            Cow::Owned(series_path_for_package(&self.path, &self.module.module_path))
        } else {
            Cow::Borrowed(&self.series_path)
        }
    }

    fn is_redistributable(&self) -> bool {
        self.is_redistributable
    }

    fn readme(&self) -> Option<&Readme> {
        self.module_readme.as_ref()
    }

    fn license_types(&self) -> Vec<String> {
        metadata_types(&self.licenses)
    }

    fn synopsis(&self) -> &str {
        &self.synopsis
    }

    fn documentation_html(&self) -> Option<&str> {
        Some(&self.documentation_html)
    }
}

impl ResourceMeta for VersionedDirectory {
    fn path(&self) -> &str {
        &self.meta.path
    }

    fn module(&self) -> &ModuleInfo {
        &self.module
    }

    fn series_path(&self) -> Cow<'_, str> {
        if self.meta.series_path.is_empty() {
            Cow::Owned(series_path_for_package(&self.meta.path, &self.module.module_path))
        } else {
            Cow::Borrowed(&self.meta.series_path)
        }
    }

    fn is_redistributable(&self) -> bool {
        self.meta.is_redistributable
    }

    fn readme(&self) -> Option<&Readme> {
        self.readme.as_ref()
    }

    fn license_types(&self) -> Vec<String> {
        metadata_types(&self.meta.licenses)
    }

    fn synopsis(&self) -> &str {
        self.package.as_ref().map_or("", |package| package.synopsis.as_str())
    }

    fn documentation_html(&self) -> Option<&str> {
        self.package.as_ref().map(|package| package.documentation_html.as_str())
    }
}

fn license_types(licenses: &[License]) -> Vec<String> {
    licenses.iter().flat_map(|license| license.types.iter().cloned()).collect()
}

fn metadata_types(licenses: &[LicenseMetadata]) -> Vec<String> {
    licenses.iter().flat_map(|license| license.types.iter().cloned()).collect()
}

/// A legacy directory together with the licenses that apply to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyDirectoryView {
    pub directory: LegacyDirectory,
    pub licenses: Vec<License>,
}

impl ResourceMeta for LegacyDirectoryView {
    fn path(&self) -> &str {
        &self.directory.path
    }

    fn module(&self) -> &ModuleInfo {
        &self.directory.module
    }

    fn series_path(&self) -> Cow<'_, str> {
        Cow::Owned(series_path_for_package(&self.directory.path, &self.directory.module.module_path))
    }

    fn is_redistributable(&self) -> bool {
        self.directory.module.is_redistributable
    }

    fn readme(&self) -> Option<&Readme> {
        self.directory.readme.as_ref()
    }

    fn license_types(&self) -> Vec<String> {
        license_types(&self.licenses)
    }
}

/// A module page: the module, its licenses and its readme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleView {
    pub info: ModuleInfo,
    pub licenses: Vec<License>,
    pub readme: Option<Readme>,
}

impl ResourceMeta for ModuleView {
    fn path(&self) -> &str {
        &self.info.module_path
    }

    fn module(&self) -> &ModuleInfo {
        &self.info
    }

    fn series_path(&self) -> Cow<'_, str> {
        Cow::Borrowed(docsite_domain::paths::series_path(&self.info.module_path))
    }

    fn is_redistributable(&self) -> bool {
        self.info.is_redistributable
    }

    fn readme(&self) -> Option<&Readme> {
        self.readme.as_ref()
    }

    fn license_types(&self) -> Vec<String> {
        license_types(&self.licenses)
    }
}

/// The two shapes a package or directory can arrive in.
#[derive(Debug)]
pub enum Shape<'a, L> {
    Legacy(&'a L),
    Versioned(&'a VersionedDirectory),
}

impl<'a, L: ResourceMeta> Shape<'a, L> {
    #[must_use]
    pub fn meta(&self) -> &'a dyn ResourceMeta {
        match *self {
            Self::Legacy(legacy) => legacy,
            Self::Versioned(directory) => directory,
        }
    }
}

/// What a details page shows, tagged by kind and shape.
#[derive(Debug)]
pub enum ResourceView<'a> {
    Package(Shape<'a, LegacyPackage>),
    Directory(Shape<'a, LegacyDirectoryView>),
    Module(&'a ModuleView),
}

impl ResourceView<'_> {
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Package(_) => ResourceKind::Package,
            Self::Directory(_) => ResourceKind::Directory,
            Self::Module(_) => ResourceKind::Module,
        }
    }

    #[must_use]
    pub fn meta(&self) -> &dyn ResourceMeta {
        match self {
            Self::Package(shape) => shape.meta(),
            Self::Directory(shape) => shape.meta(),
            Self::Module(module) => *module,
        }
    }
}
