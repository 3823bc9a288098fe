use crate::error::{RenderError, RenderErrorExt};
use crate::pages::{BasePage, DEFAULT_PAGES, ERROR_PAGE, ErrorPage, PageSet};
use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};
use tracing::{debug, error, info};

type TemplateSets = FxHashMap<&'static str, Tera>;

/// Outcome of a render that cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: Vec<u8>,
    /// The page could not be rendered and `body` is the startup fallback page.
    pub is_fallback: bool,
}

/// Renders pages from compiled template sets.
///
/// The sets are only ever replaced wholesale under the write lock, so a render sees either
/// the previous or the reloaded sets, never a mix of both. Reloads compile outside that lock
/// and are serialized among themselves.
#[derive(Debug)]
pub struct Renderer {
    dir: PathBuf,
    reload: bool,
    pages: &'static [PageSet],
    sets: RwLock<TemplateSets>,
    reloading: Mutex<()>,
    fallback: Vec<u8>,
}

impl Renderer {
    /// Compiles every site page from `dir`.
    pub fn new(dir: impl Into<PathBuf>, reload: bool) -> Result<Self, RenderError> {
        Self::with_pages(dir, reload, DEFAULT_PAGES)
    }

    /// Compiles the given page sets from `dir`, which holds `base.tmpl`, `helpers/` and
    /// `pages/`. The 500 error page is rendered once here and kept as the fallback body, so
    /// construction fails if it cannot be rendered.
    pub fn with_pages(
        dir: impl Into<PathBuf>,
        reload: bool,
        pages: &'static [PageSet],
    ) -> Result<Self, RenderError> {
        let dir = dir.into();
        let sets = compile(&dir, pages)?;

        let fallback_page = error_page(StatusCode::INTERNAL_SERVER_ERROR, None, BasePage::default());
        let fallback = execute(&sets, ERROR_PAGE, &fallback_page)
            .context("rendering the fallback error page")?;

        info!(dir = %dir.display(), pages = sets.len(), reload, "templates compiled");
        Ok(Self { dir, reload, pages, sets: RwLock::new(sets), reloading: Mutex::new(()), fallback })
    }

    /// The pre-rendered 500 page.
    #[must_use]
    pub fn fallback(&self) -> &[u8] {
        &self.fallback
    }

    #[must_use]
    pub const fn reload_enabled(&self) -> bool {
        self.reload
    }

    /// Recompiles every template set when hot reload is on.
    ///
    /// Reads the template directory from disk, so async callers should run it on the blocking
    /// pool. A compile failure keeps the current sets and returns the error.
    pub fn reload_if_configured(&self) -> Result<(), RenderError> {
        if !self.reload {
            return Ok(());
        }

        let _reloading = self.reloading.lock();
        match compile(&self.dir, self.pages) {
            Ok(compiled) => {
                *self.sets.write() = compiled;
                debug!("templates reloaded");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "template reload failed, keeping previous templates");
                Err(err)
            }
        }
    }

    /// Renders `page` with `data`.
    pub fn render_page<T: Serialize>(&self, page: &str, data: &T) -> Result<Vec<u8>, RenderError> {
        let sets = self.sets.read();
        execute(&sets, page, data).inspect_err(|err| error!(page, error = %err, "render failed"))
    }

    /// Renders `page`, substituting the fallback page on failure.
    pub fn render_or_fallback<T: Serialize>(&self, page: &str, data: &T) -> Rendered {
        match self.render_page(page, data) {
            Ok(body) => Rendered { body, is_fallback: false },
            Err(_) => Rendered { body: self.fallback.clone(), is_fallback: true },
        }
    }

    /// Renders the error page for `status`, with an optional detail line.
    pub fn render_error_page(
        &self,
        status: StatusCode,
        detail: Option<&str>,
        base: BasePage,
    ) -> Rendered {
        self.render_or_fallback(ERROR_PAGE, &error_page(status, detail, base))
    }
}

fn error_page(status: StatusCode, detail: Option<&str>, mut base: BasePage) -> ErrorPage {
    let title = match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    };
    if base.html_title.is_empty() {
        base.html_title.clone_from(&title);
    }
    ErrorPage {
        base,
        status: status.as_u16(),
        message_title: title.clone(),
        message: title,
        detail: detail.map(str::to_owned),
    }
}

fn execute<T: Serialize>(sets: &TemplateSets, page: &str, data: &T) -> Result<Vec<u8>, RenderError> {
    let tera = sets
        .get(page)
        .ok_or_else(|| RenderError::MissingTemplate { message: page.to_owned().into(), context: None })?;
    let context = Context::from_serialize(data).map_err(|err| RenderError::Serialize {
        message: err.to_string().into(),
        context: Some(page.to_owned().into()),
    })?;
    let html = tera.render(page, &context).context(page.to_owned())?;
    Ok(html.into_bytes())
}

/// Compiles one [`Tera`] instance per page set: base layout, every helper, then the page files.
fn compile(dir: &Path, pages: &'static [PageSet]) -> Result<TemplateSets, RenderError> {
    let helpers = helper_files(&dir.join("helpers"))?;
    let base = (dir.join("base.tmpl"), "base.tmpl".to_owned());

    let mut sets = TemplateSets::default();
    for page in pages {
        let mut files = Vec::with_capacity(helpers.len() + page.files.len() + 1);
        files.push(base.clone());
        files.extend(helpers.iter().cloned());
        files.extend(
            page.files.iter().map(|file| (dir.join("pages").join(file), (*file).to_owned())),
        );

        let mut tera = Tera::default();
        tera.autoescape_on(vec![".tmpl"]);
        tera.register_function("current_year", current_year);
        tera.add_template_files(files.into_iter().map(|(path, name)| (path, Some(name))))
            .context(format!("compiling {}", page.id()))?;
        sets.insert(page.id(), tera);
    }
    Ok(sets)
}

/// `current_year()`: the calendar year in UTC, for the footer.
fn current_year(_: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::from(Utc::now().year()))
}

fn helper_files(dir: &Path) -> Result<Vec<(PathBuf, String)>, RenderError> {
    let mut helpers = Vec::new();
    for entry in std::fs::read_dir(dir).context(format!("reading {}", dir.display()))? {
        let path = entry.context("listing helper templates")?.path();
        if path.extension().is_some_and(|ext| ext == "tmpl")
            && let Some(name) = path.file_name().and_then(|name| name.to_str())
        {
            let name = format!("helpers/{name}");
            helpers.push((path, name));
        }
    }
    helpers.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(helpers)
}
