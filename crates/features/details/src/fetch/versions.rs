use crate::payload::{VersionList, VersionSummary, Versions};
use crate::source::{DataSource, DataSourceError};
use crate::view::ResourceMeta;
use docsite_domain::model::ModuleInfo;
use docsite_domain::paths::{module_url, path_in_module};
use semver::Version;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Every version of the package series, with links to the package inside each module.
pub(crate) async fn for_package(
    source: &dyn DataSource,
    meta: &dyn ResourceMeta,
) -> Result<Versions, DataSourceError> {
    let series = meta.series_path();
    let infos = source.package_versions(&series).await?;
    Ok(group(infos, &meta.module().module_path, |info| {
        format!("/{}@{}", path_in_module(&series, &info.module_path), info.version)
    }))
}

/// Every version of the module series, linking to module pages.
pub(crate) async fn for_module(
    source: &dyn DataSource,
    module_path: &str,
) -> Result<Versions, DataSourceError> {
    let infos = source.module_versions(module_path).await?;
    Ok(group(infos, module_path, |info| module_url(&info.module_path, Some(&info.version))))
}

fn parse(version: &str) -> Option<Version> {
    Version::parse(version.strip_prefix('v').unwrap_or(version)).ok()
}

/// Groups versions by module path, newest first, the current module split out from the rest.
fn group(
    infos: Vec<ModuleInfo>,
    current_module: &str,
    link: impl Fn(&ModuleInfo) -> String,
) -> Versions {
    let mut by_module: BTreeMap<String, Vec<ModuleInfo>> = BTreeMap::new();
    for info in infos {
        by_module.entry(info.module_path.clone()).or_default().push(info);
    }

    let mut lists: Vec<(Option<Version>, VersionList)> = by_module
        .into_iter()
        .map(|(module_path, mut infos)| {
            infos.sort_by_cached_key(|info| Reverse((parse(&info.version), info.version.clone())));
            let newest = infos.first().and_then(|info| parse(&info.version));
            let list = VersionList {
                module_path,
                major: newest.as_ref().map(|v| format!("v{}", v.major)).unwrap_or_default(),
                versions: infos
                    .iter()
                    .map(|info| VersionSummary {
                        version: info.version.clone(),
                        link: link(info),
                        commit_time: info.commit_time.clone(),
                    })
                    .collect(),
            };
            (newest, list)
        })
        .collect();
    lists.sort_by(|(a, _), (b, _)| b.cmp(a));

    let (this_module, other_modules): (Vec<_>, Vec<_>) =
        lists.into_iter().map(|(_, list)| list).partition(|list| list.module_path == current_module);
    Versions { this_module, other_modules }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(module_path: &str, version: &str) -> ModuleInfo {
        ModuleInfo {
            module_path: module_path.to_owned(),
            version: version.to_owned(),
            ..ModuleInfo::default()
        }
    }

    #[test]
    fn versions_sorted_by_semver_descending() {
        let versions = group(
            vec![
                info("github.com/a/b", "v1.2.0"),
                info("github.com/a/b", "v1.10.0"),
                info("github.com/a/b", "v1.10.0-rc.1"),
                info("github.com/a/b/v2", "v2.0.1"),
            ],
            "github.com/a/b",
            |info| module_url(&info.module_path, Some(&info.version)),
        );

        assert_eq!(versions.this_module.len(), 1);
        let ordered: Vec<&str> =
            versions.this_module[0].versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(ordered, ["v1.10.0", "v1.10.0-rc.1", "v1.2.0"]);
        assert_eq!(versions.this_module[0].major, "v1");

        assert_eq!(versions.other_modules.len(), 1);
        assert_eq!(versions.other_modules[0].major, "v2");
        assert_eq!(versions.other_modules[0].versions[0].link, "/mod/github.com/a/b/v2@v2.0.1");
    }
}
