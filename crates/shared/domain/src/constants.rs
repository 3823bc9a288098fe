/// The version string that resolves to the newest release.
pub const LATEST_VERSION: &str = "latest";
/// Module path under which the standard library is published.
pub const STDLIB_MODULE_PATH: &str = "std";
/// Path prefix of module pages (`/mod/<module>`).
pub const MODULE_URL_PREFIX: &str = "mod";
/// Query parameter selecting the tab of a details page.
pub const TAB_QUERY_PARAM: &str = "tab";
/// Query parameter echoed into the search box.
pub const SEARCH_QUERY_PARAM: &str = "q";
/// Namespace rendered for package and directory pages.
pub const PACKAGE_NAMESPACE: &str = "pkg";
/// Namespace rendered for module pages.
pub const MODULE_NAMESPACE: &str = "mod";
