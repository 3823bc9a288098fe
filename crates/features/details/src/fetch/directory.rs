use crate::payload::{Directory, PackageSummary};
use crate::source::{DataSource, DataSourceError};
use crate::view::ResourceMeta;
use docsite_domain::model::PackageMeta;
use docsite_domain::paths::package_suffix;

/// Lists the packages under `dir` by querying the data source.
pub(crate) async fn fetch(
    source: &dyn DataSource,
    dir: &dyn ResourceMeta,
    include_self: bool,
) -> Result<Directory, DataSourceError> {
    let module = dir.module();
    let packages =
        source.packages_in_directory(dir.path(), &module.module_path, &module.version).await?;
    Ok(from_packages(dir, packages, include_self))
}

/// Lists the packages under `dir` from an already fetched package set.
pub(crate) fn from_packages(
    dir: &dyn ResourceMeta,
    packages: Vec<PackageMeta>,
    include_self: bool,
) -> Directory {
    let dir_path = dir.path();
    let module = dir.module();
    let mut packages: Vec<PackageSummary> = packages
        .into_iter()
        .filter(|package| {
            if package.path == dir_path {
                return include_self;
            }
            package.path.strip_prefix(dir_path).is_some_and(|rest| rest.starts_with('/'))
        })
        .map(|package| PackageSummary {
            suffix: package_suffix(&package.path, dir_path).to_owned(),
            licenses: package.licenses.into_iter().flat_map(|license| license.types).collect(),
            path: package.path,
            synopsis: package.synopsis,
            is_redistributable: package.is_redistributable,
        })
        .collect();
    packages.sort_by(|a, b| a.path.cmp(&b.path));

    Directory {
        path: dir_path.to_owned(),
        module_path: module.module_path.clone(),
        version: module.version.clone(),
        is_redistributable: dir.is_redistributable(),
        licenses: dir.license_types(),
        packages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ModuleView;
    use docsite_domain::model::{License, ModuleInfo};

    fn meta(path: &str) -> PackageMeta {
        PackageMeta { path: path.to_owned(), ..PackageMeta::default() }
    }

    #[test]
    fn lists_nested_packages_sorted() {
        let module = ModuleView {
            info: ModuleInfo {
                module_path: "github.com/a/b".to_owned(),
                is_redistributable: true,
                ..ModuleInfo::default()
            },
            licenses: vec![License { types: vec!["MIT".to_owned()], ..License::default() }],
            readme: None,
        };
        let packages = vec![
            meta("github.com/a/b/z"),
            meta("github.com/a/b"),
            meta("github.com/a/b/c/d"),
            meta("github.com/a/bc"),
        ];

        let listed = from_packages(&module, packages.clone(), false);
        assert!(listed.is_redistributable);
        assert_eq!(listed.licenses, ["MIT"]);
        let suffixes: Vec<&str> = listed.packages.iter().map(|p| p.suffix.as_str()).collect();
        assert_eq!(suffixes, ["c/d", "z"]);

        let listed = from_packages(&module, packages, true);
        assert_eq!(listed.packages.len(), 3);
        assert_eq!(listed.packages[0].suffix, "");
    }
}
