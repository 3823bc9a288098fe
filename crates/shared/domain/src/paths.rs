//! Import path helpers.

use crate::constants::{MODULE_URL_PREFIX, STDLIB_MODULE_PATH};

/// Reports whether a request path pins a version (`/<path>@<version>`).
#[must_use]
pub fn url_is_versioned(path: &str) -> bool {
    path.contains('@')
}

/// Reports whether an import path belongs to the standard library, i.e. its first element
/// has no dot in it.
#[must_use]
pub fn is_std_lib_path(path: &str) -> bool {
    let first = path.split('/').next().unwrap_or_default();
    !first.is_empty() && !first.contains('.')
}

/// Returns the major version of a module path (`2` for `example.com/m/v2`), or `None` for
/// v0/v1 module paths.
#[must_use]
pub fn major_version(module_path: &str) -> Option<u64> {
    let (_, last) = module_path.rsplit_once('/')?;
    let digits = last.strip_prefix('v').or_else(|| {
        let (_, suffix) = last.rsplit_once(".v")?;
        module_path.starts_with("gopkg.in/").then_some(suffix)
    })?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || digits.starts_with('0')
    {
        return None;
    }
    digits.parse::<u64>().ok().filter(|major| *major >= 2 || module_path.starts_with("gopkg.in/"))
}

/// Returns the path shared by every major version of a module: the module path without its
/// `/vN` (or `gopkg.in` `.vN`) suffix.
#[must_use]
pub fn series_path(module_path: &str) -> &str {
    if major_version(module_path).is_none() {
        return module_path;
    }
    if module_path.starts_with("gopkg.in/")
        && let Some((series, _)) = module_path.rsplit_once(".v")
        && !series.contains("/v")
    {
        return series;
    }
    module_path.rsplit_once('/').map_or(module_path, |(series, _)| series)
}

/// Returns `path` relative to `module_path` (empty when `path` is the module root).
#[must_use]
pub fn package_suffix<'a>(path: &'a str, module_path: &str) -> &'a str {
    if path == module_path {
        return "";
    }
    path.strip_prefix(module_path).and_then(|rest| rest.strip_prefix('/')).unwrap_or(path)
}

/// The series-relative path of a package: its module series path plus its suffix.
/// Standard library packages are their own series path.
#[must_use]
pub fn series_path_for_package(path: &str, module_path: &str) -> String {
    if module_path == STDLIB_MODULE_PATH {
        return path.to_owned();
    }
    join_path(series_path(module_path), package_suffix(path, module_path))
}

/// Translates a series-relative package path into the path it has inside `module_path`.
#[must_use]
pub fn path_in_module(series_package_path: &str, module_path: &str) -> String {
    if module_path == STDLIB_MODULE_PATH {
        return series_package_path.to_owned();
    }
    let series = series_path(module_path);
    let suffix = if series_package_path == series {
        ""
    } else {
        series_package_path
            .strip_prefix(series)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or_default()
    };
    join_path(module_path, suffix)
}

/// Returns the URL of a module page, `latest` links omitting the version.
#[must_use]
pub fn module_url(module_path: &str, link_version: Option<&str>) -> String {
    let mut url = String::from("/");
    if module_path != STDLIB_MODULE_PATH {
        url.push_str(MODULE_URL_PREFIX);
        url.push('/');
    }
    url.push_str(module_path);
    if let Some(version) = link_version {
        url.push('@');
        url.push_str(version);
    }
    url
}

fn join_path(base: &str, suffix: &str) -> String {
    if suffix.is_empty() { base.to_owned() } else { format!("{base}/{suffix}") }
}
