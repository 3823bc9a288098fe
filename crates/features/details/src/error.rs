use crate::source::DataSourceError;
use docsite_domain::tabs::ResourceKind;
use std::borrow::Cow;

#[docsite_derive::docsite_error]
pub enum DetailsError {
    /// The registry knows the tab but no dispatch arm handles it for this resource.
    #[error("Unknown tab{}: {message}", format_context(.context))]
    UnknownTab { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The tab needs a data source capability the active source does not advertise.
    #[error("Unsupported{}: {message}", format_context(.context))]
    Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Data source error{}: {source}", format_context(.context))]
    DataSource {
        #[source]
        source: DataSourceError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DetailsError {
    pub(crate) fn unknown_tab(kind: ResourceKind, tab: &str) -> Self {
        Self::UnknownTab { message: format!("no {kind} handler for tab {tab:?}").into(), context: None }
    }

    pub(crate) fn unsupported(tab: &str) -> Self {
        Self::Unsupported {
            message: "not supported by this data source".into(),
            context: Some(format!("tab {tab:?}").into()),
        }
    }
}
