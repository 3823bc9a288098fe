//! Tab dispatch and content fetching for package, module and directory pages.
//!
//! A [`Dispatcher`] receives the tab name and a [`ResourceView`] (the resource in either its
//! legacy or version-aware shape), validates the tab against the [`TabRegistry`], and runs the
//! fetcher bound to it against the configured [`DataSource`].
//!
//! [`TabRegistry`]: docsite_domain::tabs::TabRegistry

mod dispatch;
mod error;
mod fetch;
pub mod payload;
pub mod source;
pub mod view;

pub use dispatch::Dispatcher;
pub use error::{DetailsError, DetailsErrorExt};
pub use payload::Details;
pub use source::{DataSource, DataSourceError, ImportedBySource};
pub use view::{LegacyDirectoryView, ModuleView, ResourceMeta, ResourceView, Shape};

pub mod prelude {
    pub use crate::{
        DataSource, DataSourceError, Details, DetailsError, Dispatcher, ImportedBySource,
        LegacyDirectoryView, ModuleView, ResourceView, Shape,
    };
}
