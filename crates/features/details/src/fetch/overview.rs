use crate::payload::Overview;
use crate::view::ResourceMeta;
use docsite_domain::model::Readme;
use docsite_domain::paths::{module_url, package_suffix};

/// Builds the overview of a package, directory or module.
///
/// Links carry the version only when the request pinned one, so unversioned pages keep
/// pointing at the latest version.
pub(crate) fn compose(meta: &dyn ResourceMeta, versioned: bool) -> Overview {
    let module = meta.module();
    let link_version = versioned.then_some(module.version.as_str());

    let package_source_url = module.repository_url.as_deref().map(|repo| {
        let repo = repo.trim_end_matches('/');
        match package_suffix(meta.path(), &module.module_path) {
            "" => format!("{repo}/tree/{}", module.version),
            suffix => format!("{repo}/tree/{}/{suffix}", module.version),
        }
    });

    let readme = meta.readme().filter(|_| meta.is_redistributable());

    Overview {
        module_path: module.module_path.clone(),
        module_url: module_url(&module.module_path, link_version),
        package_source_url,
        repository_url: module.repository_url.clone(),
        readme_source: readme
            .map(|readme| format!("{}@{}/{}", module.module_path, module.version, readme.file_path)),
        readme_html: readme.map(render_readme),
        redistributable: meta.is_redistributable(),
    }
}

/// HTML readmes are sanitized; anything else is shown as escaped preformatted text.
fn render_readme(readme: &Readme) -> String {
    let lower = readme.file_path.to_ascii_lowercase();
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        ammonia::clean(&readme.contents)
    } else {
        format!("<pre class=\"readme\">{}</pre>", ammonia::clean_text(&readme.contents))
    }
}
