use crate::payload::{LicenseView, Licenses};
use crate::source::{DataSource, DataSourceError};
use crate::view::ResourceMeta;
use docsite_domain::model::{License, ModuleInfo};

/// Licenses that apply to a package or directory.
pub(crate) async fn fetch(
    source: &dyn DataSource,
    meta: &dyn ResourceMeta,
) -> Result<Licenses, DataSourceError> {
    let module = meta.module();
    let licenses =
        source.package_licenses(meta.path(), &module.module_path, &module.version).await?;
    Ok(transform(&licenses, module))
}

/// Turns detected licenses into their display form, anchors numbered in declaration order.
pub(crate) fn transform(licenses: &[License], module: &ModuleInfo) -> Licenses {
    let repo = module.repository_url.as_deref().map(|repo| repo.trim_end_matches('/'));
    let licenses = licenses
        .iter()
        .enumerate()
        .map(|(index, license)| LicenseView {
            anchor: format!("lic-{index}"),
            types: license.types.clone(),
            file_path: license.file_path.clone(),
            contents: license.contents.clone(),
            source_url: repo
                .map(|repo| format!("{repo}/blob/{}/{}", module.version, license.file_path)),
        })
        .collect();
    Licenses { licenses }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_follow_declaration_order() {
        let module = ModuleInfo {
            module_path: "github.com/a/b".to_owned(),
            version: "v1.0.0".to_owned(),
            repository_url: Some("https://github.com/a/b".to_owned()),
            ..ModuleInfo::default()
        };
        let licenses = [
            License { types: vec!["MIT".to_owned()], file_path: "LICENSE".to_owned(), ..License::default() },
            License { types: vec!["BSD-3-Clause".to_owned()], file_path: "c/COPYING".to_owned(), ..License::default() },
        ];

        let view = transform(&licenses, &module);
        let anchors: Vec<&str> = view.licenses.iter().map(|l| l.anchor.as_str()).collect();
        assert_eq!(anchors, ["lic-0", "lic-1"]);
        assert_eq!(
            view.licenses[1].source_url.as_deref(),
            Some("https://github.com/a/b/blob/v1.0.0/c/COPYING")
        );
    }
}
