//! Page identifiers and the data every page shares.

use serde::Serialize;

/// A compiled template set: the page fragments layered over the base layout and helpers.
/// The first file is the entry point and names the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSet {
    pub files: &'static [&'static str],
}

impl PageSet {
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.files[0]
    }
}

pub const ERROR_PAGE: &str = "error.tmpl";
pub const INDEX_PAGE: &str = "index.tmpl";
pub const LICENSE_POLICY_PAGE: &str = "license_policy.tmpl";

/// Shared chrome of every tab page.
pub const DETAILS_FRAGMENT: &str = "details.tmpl";

/// Every page the site serves.
pub const DEFAULT_PAGES: &[PageSet] = &[
    PageSet { files: &[INDEX_PAGE] },
    PageSet { files: &[ERROR_PAGE] },
    PageSet { files: &[LICENSE_POLICY_PAGE] },
    PageSet { files: &["overview.tmpl", DETAILS_FRAGMENT] },
    PageSet { files: &["subdirectories.tmpl", DETAILS_FRAGMENT] },
    PageSet { files: &["pkg_doc.tmpl", DETAILS_FRAGMENT] },
    PageSet { files: &["pkg_imports.tmpl", DETAILS_FRAGMENT] },
    PageSet { files: &["pkg_importedby.tmpl", DETAILS_FRAGMENT] },
    PageSet { files: &["licenses.tmpl", DETAILS_FRAGMENT] },
    PageSet { files: &["versions.tmpl", DETAILS_FRAGMENT] },
];

/// Fields merged into every rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasePage {
    pub html_title: String,
    /// Search box echo.
    pub query: String,
    /// Per-request CSP nonce for inline scripts and styles.
    pub nonce: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorPage {
    pub base: BasePage,
    pub status: u16,
    pub message_title: String,
    pub message: String,
    pub detail: Option<String>,
}

/// A static page with nothing but the base data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicPage {
    pub base: BasePage,
}
