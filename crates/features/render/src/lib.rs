//! Page rendering over hot-reloadable template sets.
//!
//! Templates live in one directory: `base.tmpl`, a `helpers/` directory of macro files and a
//! `pages/` directory. Each page compiles into its own template set made of the base layout,
//! every helper and the page's fragment files.

mod error;
pub mod pages;
mod renderer;

pub use error::{RenderError, RenderErrorExt};
pub use pages::{BasePage, BasicPage, ErrorPage, PageSet};
pub use renderer::{Rendered, Renderer};
