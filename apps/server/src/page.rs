//! Data handed to the details page templates.

use docsite_details::Details;
use docsite_domain::tabs::{ResourceKind, TabSetting};
use docsite_render::BasePage;
use serde::Serialize;

/// Identity of the resource shown in the page header.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct PageHeader {
    pub(crate) title: String,
    pub(crate) path: String,
    pub(crate) module_path: String,
    pub(crate) version: String,
    pub(crate) synopsis: String,
    pub(crate) is_redistributable: bool,
    pub(crate) latest_url: String,
    /// Base URL of the page; tab links append `?tab=<id>`.
    pub(crate) url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DetailsPage<'a> {
    pub(crate) base: BasePage,
    pub(crate) name: String,
    pub(crate) namespace: &'static str,
    pub(crate) page_type: ResourceKind,
    pub(crate) settings: &'a TabSetting,
    pub(crate) tabs: Vec<&'a TabSetting>,
    pub(crate) header: PageHeader,
    pub(crate) details: Details,
    pub(crate) can_show_details: bool,
}
