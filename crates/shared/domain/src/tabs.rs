//! Tab registry.
//!
//! A details page shows one tab of a resource. The set of tabs, their labels and the template
//! each one renders with depend on the [`ResourceKind`]. The registry is built once with
//! [`TabRegistry::new`] and only read afterwards, so it can be shared freely across requests.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Tab identifiers, as they appear in the `?tab=` query parameter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TabId {
    Doc,
    Overview,
    Subdirectories,
    Packages,
    Versions,
    Imports,
    ImportedBy,
    Licenses,
}

/// The addressable resource kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Package,
    Module,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabSetting {
    pub id: TabId,
    pub display_name: &'static str,
    /// Render the tab even when the resource is not redistributable.
    pub always_show_details: bool,
    pub template: &'static str,
    pub disabled: bool,
}

impl TabSetting {
    const fn new(
        id: TabId,
        display_name: &'static str,
        always_show_details: bool,
        template: &'static str,
    ) -> Self {
        Self { id, display_name, always_show_details, template, disabled: false }
    }
}

const PACKAGE_TABS: [TabSetting; 7] = [
    TabSetting::new(TabId::Doc, "Doc", false, "pkg_doc.tmpl"),
    TabSetting::new(TabId::Overview, "Overview", true, "overview.tmpl"),
    TabSetting::new(TabId::Subdirectories, "Subdirectories", true, "subdirectories.tmpl"),
    TabSetting::new(TabId::Versions, "Versions", true, "versions.tmpl"),
    TabSetting::new(TabId::Imports, "Imports", true, "pkg_imports.tmpl"),
    TabSetting::new(TabId::ImportedBy, "Imported By", true, "pkg_importedby.tmpl"),
    TabSetting::new(TabId::Licenses, "Licenses", false, "licenses.tmpl"),
];

const MODULE_TABS: [TabSetting; 4] = [
    TabSetting::new(TabId::Overview, "Overview", true, "overview.tmpl"),
    TabSetting::new(TabId::Packages, "Packages", true, "subdirectories.tmpl"),
    TabSetting::new(TabId::Versions, "Versions", true, "versions.tmpl"),
    TabSetting::new(TabId::Licenses, "Licenses", false, "licenses.tmpl"),
];

/// Package tabs that stay enabled on a directory page.
pub const DIRECTORY_TABS: [TabId; 3] = [TabId::Overview, TabId::Subdirectories, TabId::Licenses];

/// Immutable per-kind tab catalogs.
#[derive(Debug, Clone)]
pub struct TabRegistry {
    package: Vec<TabSetting>,
    directory: Vec<TabSetting>,
    module: Vec<TabSetting>,
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistry {
    /// Builds the three catalogs. Directory tabs are the package tabs with everything outside
    /// [`DIRECTORY_TABS`] disabled.
    #[must_use]
    pub fn new() -> Self {
        let directory = PACKAGE_TABS
            .iter()
            .map(|tab| TabSetting { disabled: !DIRECTORY_TABS.contains(&tab.id), ..*tab })
            .collect();

        Self { package: PACKAGE_TABS.to_vec(), directory, module: MODULE_TABS.to_vec() }
    }

    /// All tabs of a kind, in display order (disabled ones included).
    #[must_use]
    pub fn tabs_for(&self, kind: ResourceKind) -> &[TabSetting] {
        match kind {
            ResourceKind::Package => &self.package,
            ResourceKind::Directory => &self.directory,
            ResourceKind::Module => &self.module,
        }
    }

    /// Tabs of a kind that can be navigated to.
    pub fn enabled_tabs(&self, kind: ResourceKind) -> impl Iterator<Item = &TabSetting> {
        self.tabs_for(kind).iter().filter(|tab| !tab.disabled)
    }

    #[must_use]
    pub fn get(&self, kind: ResourceKind, id: TabId) -> Option<&TabSetting> {
        self.tabs_for(kind).iter().find(|tab| tab.id == id)
    }

    /// Looks a tab up by its query-string name.
    #[must_use]
    pub fn lookup(&self, kind: ResourceKind, name: &str) -> Option<&TabSetting> {
        name.parse::<TabId>().ok().and_then(|id| self.get(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn tab_ids_use_query_names() {
        assert_eq!(TabId::ImportedBy.to_string(), "importedby");
        assert_eq!("subdirectories".parse::<TabId>().ok(), Some(TabId::Subdirectories));
        assert!("Overview".parse::<TabId>().is_err());
        assert!("".parse::<TabId>().is_err());
    }

    #[test]
    fn directory_tabs_mirror_package_tabs() {
        let registry = TabRegistry::new();
        let package = registry.tabs_for(ResourceKind::Package);
        let directory = registry.tabs_for(ResourceKind::Directory);
        assert_eq!(package.len(), directory.len());

        for (pkg, dir) in package.iter().zip(directory) {
            assert_eq!(pkg.id, dir.id);
            assert_eq!(pkg.template, dir.template);
            assert!(!pkg.disabled);
        }
    }

    #[test]
    fn directory_disables_everything_outside_allow_list() {
        let registry = TabRegistry::new();
        for id in TabId::iter() {
            let Some(tab) = registry.get(ResourceKind::Directory, id) else { continue };
            assert_eq!(tab.disabled, !DIRECTORY_TABS.contains(&id), "tab {id}");
        }
        let enabled: Vec<TabId> =
            registry.enabled_tabs(ResourceKind::Directory).map(|t| t.id).collect();
        assert_eq!(enabled, DIRECTORY_TABS);
    }

    #[test]
    fn module_packages_tab_reuses_subdirectories_template() {
        let registry = TabRegistry::new();
        let packages = registry.lookup(ResourceKind::Module, "packages").unwrap();
        assert_eq!(packages.template, "subdirectories.tmpl");
        assert!(registry.lookup(ResourceKind::Module, "doc").is_none());
        assert!(registry.lookup(ResourceKind::Package, "packages").is_none());
    }
}
