use crate::payload::{ImportedBy, Imports};
use crate::source::{DataSource, DataSourceError, ImportedBySource};
use crate::view::ResourceMeta;
use docsite_domain::paths::is_std_lib_path;

/// Imports of a package, split into standard library, same-module and external paths.
pub(crate) async fn fetch(
    source: &dyn DataSource,
    meta: &dyn ResourceMeta,
) -> Result<Imports, DataSourceError> {
    let module = meta.module();
    let paths = source.imports(meta.path(), &module.module_path, &module.version).await?;
    Ok(split(paths, &module.module_path))
}

fn split(paths: Vec<String>, module_path: &str) -> Imports {
    let mut imports = Imports { module_path: module_path.to_owned(), ..Imports::default() };
    for path in paths {
        if is_std_lib_path(&path) {
            imports.std_lib.push(path);
        } else if path == module_path
            || path.strip_prefix(module_path).is_some_and(|rest| rest.starts_with('/'))
        {
            imports.internal.push(path);
        } else {
            imports.external.push(path);
        }
    }
    for list in [&mut imports.std_lib, &mut imports.internal, &mut imports.external] {
        list.sort_unstable();
        list.dedup();
    }
    imports
}

/// Packages importing the resource, capped at `limit`.
pub(crate) async fn fetch_imported_by(
    source: &dyn ImportedBySource,
    meta: &dyn ResourceMeta,
    limit: usize,
) -> Result<ImportedBy, DataSourceError> {
    let module_path = &meta.module().module_path;
    // One extra row tells a full page apart from a truncated one.
    let mut importers = source.imported_by(meta.path(), module_path, limit + 1).await?;
    importers.sort_unstable();
    importers.dedup();

    let truncated = importers.len() > limit;
    importers.truncate(limit);
    Ok(ImportedBy {
        module_path: module_path.clone(),
        total: importers.len(),
        imported_by: importers,
        truncated,
    })
}
