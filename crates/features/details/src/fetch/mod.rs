//! Per-tab content fetchers.
//!
//! Fetchers query the data source and shape the results for display. Data source errors are
//! returned unchanged.

pub(crate) mod directory;
pub(crate) mod imports;
pub(crate) mod licenses;
pub(crate) mod overview;
pub(crate) mod versions;

use crate::payload::Documentation;
use crate::view::ResourceMeta;

/// Package documentation, withheld when the package is not redistributable.
pub(crate) fn documentation(meta: &dyn ResourceMeta) -> Documentation {
    let html = meta
        .documentation_html()
        .filter(|_| meta.is_redistributable())
        .unwrap_or_default()
        .to_owned();
    Documentation { html }
}
