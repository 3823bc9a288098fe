use axum::http::StatusCode;
use docsite_render::{BasePage, BasicPage, PageSet, RenderError, Renderer};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

static PAGES: &[PageSet] = &[
    PageSet { files: &["error.tmpl"] },
    PageSet { files: &["index.tmpl"] },
    PageSet { files: &["broken.tmpl", "details.tmpl"] },
];

const BASE: &str = r#"{% import "helpers/title.tmpl" as h %}<html><title>{{ h::title(text=base.html_title) }}</title>{% block body %}{% endblock %}</html>"#;

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn templates() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "base.tmpl", BASE);
    write(dir.path(), "helpers/title.tmpl", "{% macro title(text) %}[{{ text }}]{% endmacro title %}");
    write(
        dir.path(),
        "pages/error.tmpl",
        r#"{% extends "base.tmpl" %}{% block body %}<h1>{{ message_title }}</h1>{% if detail %}<p>{{ detail }}</p>{% endif %}{% endblock %}"#,
    );
    write(
        dir.path(),
        "pages/index.tmpl",
        r#"{% extends "base.tmpl" %}{% block body %}index-1{% endblock %}"#,
    );
    write(
        dir.path(),
        "pages/details.tmpl",
        r#"{% extends "base.tmpl" %}{% block body %}<main>{% block details %}{% endblock %}</main>{% endblock %}"#,
    );
    write(
        dir.path(),
        "pages/broken.tmpl",
        r#"{% extends "details.tmpl" %}{% block details %}{{ missing.field }}{% endblock %}"#,
    );
    dir
}

fn page(title: &str) -> BasicPage {
    BasicPage { base: BasePage { html_title: title.to_owned(), ..BasePage::default() } }
}

#[test]
fn renders_page_over_base_and_helpers() {
    let dir = templates();
    let renderer = Renderer::with_pages(dir.path(), false, PAGES).unwrap();
    let html = String::from_utf8(renderer.render_page("index.tmpl", &page("Home")).unwrap()).unwrap();
    assert_eq!(html, "<html><title>[Home]</title>index-1</html>");
}

#[test]
fn values_are_escaped() {
    let dir = templates();
    let renderer = Renderer::with_pages(dir.path(), false, PAGES).unwrap();
    let rendered =
        renderer.render_error_page(StatusCode::BAD_REQUEST, Some("<b>"), BasePage::default());
    let html = String::from_utf8(rendered.body).unwrap();
    assert!(html.contains("<p>&lt;b&gt;</p>"), "{html}");
}

#[test]
fn execution_failure_serves_startup_fallback() {
    let dir = templates();
    let renderer = Renderer::with_pages(dir.path(), false, PAGES).unwrap();

    let err = renderer.render_page("broken.tmpl", &page("x")).unwrap_err();
    assert!(matches!(err, RenderError::Template { .. }), "{err:?}");

    let rendered = renderer.render_or_fallback("broken.tmpl", &page("x"));
    assert!(rendered.is_fallback);
    assert_eq!(rendered.body, renderer.fallback());
    assert!(String::from_utf8_lossy(renderer.fallback()).contains("500 Internal Server Error"));
}

#[test]
fn unknown_page_is_missing_template() {
    let dir = templates();
    let renderer = Renderer::with_pages(dir.path(), false, PAGES).unwrap();
    let err = renderer.render_page("nope.tmpl", &page("x")).unwrap_err();
    assert!(matches!(err, RenderError::MissingTemplate { .. }));
}

#[test]
fn error_page_carries_status_and_detail() {
    let dir = templates();
    let renderer = Renderer::with_pages(dir.path(), false, PAGES).unwrap();
    let rendered = renderer.render_error_page(StatusCode::NOT_FOUND, Some("no such package"), BasePage::default());
    assert!(!rendered.is_fallback);
    let html = String::from_utf8(rendered.body).unwrap();
    assert!(html.contains("<h1>404 Not Found</h1>"));
    assert!(html.contains("<p>no such package</p>"));
}

#[test]
fn construction_fails_without_error_page() {
    let dir = templates();
    std::fs::remove_file(dir.path().join("pages/error.tmpl")).unwrap();
    assert!(Renderer::with_pages(dir.path(), false, PAGES).is_err());
}

#[test]
fn reload_disabled_keeps_compiled_templates() {
    let dir = templates();
    let renderer = Renderer::with_pages(dir.path(), false, PAGES).unwrap();
    write(dir.path(), "pages/index.tmpl", r#"{% extends "base.tmpl" %}{% block body %}index-2{% endblock %}"#);
    renderer.reload_if_configured().unwrap();
    let html = String::from_utf8(renderer.render_page("index.tmpl", &page("t")).unwrap()).unwrap();
    assert!(html.contains("index-1"));
}

#[test]
fn reload_picks_up_changes_and_survives_compile_errors() {
    let dir = templates();
    let renderer = Renderer::with_pages(dir.path(), true, PAGES).unwrap();

    write(dir.path(), "pages/index.tmpl", r#"{% extends "base.tmpl" %}{% block body %}index-2{% endblock %}"#);
    renderer.reload_if_configured().unwrap();
    let html = String::from_utf8(renderer.render_page("index.tmpl", &page("t")).unwrap()).unwrap();
    assert!(html.contains("index-2"));

    write(dir.path(), "pages/index.tmpl", "{% block body %}unterminated");
    assert!(renderer.reload_if_configured().is_err());
    let html = String::from_utf8(renderer.render_page("index.tmpl", &page("t")).unwrap()).unwrap();
    assert!(html.contains("index-2"));
}

#[derive(Serialize)]
struct Empty {
    base: BasePage,
}

#[test]
fn concurrent_renders_see_whole_template_sets() {
    let dir = templates();
    let renderer = Arc::new(Renderer::with_pages(dir.path(), true, PAGES).unwrap());
    let data = Empty { base: BasePage { html_title: "t".to_owned(), ..BasePage::default() } };
    let old = String::from_utf8(renderer.render_page("index.tmpl", &data).unwrap()).unwrap();

    write(dir.path(), "base.tmpl", &BASE.replace("<html>", "<html v2>"));
    write(dir.path(), "pages/index.tmpl", r#"{% extends "base.tmpl" %}{% block body %}index-2{% endblock %}"#);
    let new = "<html v2><title>[t]</title>index-2</html>";

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let renderer = Arc::clone(&renderer);
            let old = old.as_str();
            let data = &data;
            scope.spawn(move || {
                for _ in 0..200 {
                    let html = String::from_utf8(renderer.render_page("index.tmpl", data).unwrap()).unwrap();
                    assert!(html == old || html == new, "mixed render: {html}");
                }
            });
        }
        for _ in 0..20 {
            renderer.reload_if_configured().unwrap();
        }
    });

    let html = String::from_utf8(renderer.render_page("index.tmpl", &data).unwrap()).unwrap();
    assert_eq!(html, new);
}

#[test]
fn reloads_from_many_threads_all_succeed() {
    let dir = templates();
    let renderer = Renderer::with_pages(dir.path(), true, PAGES).unwrap();
    assert!(renderer.reload_enabled());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..10 {
                    renderer.reload_if_configured().unwrap();
                }
            });
        }
    });
    let html = String::from_utf8(renderer.render_page("index.tmpl", &page("t")).unwrap()).unwrap();
    assert!(html.contains("index-1"));
}

#[test]
fn templates_can_call_current_year() {
    let dir = templates();
    write(dir.path(), "pages/index.tmpl", r#"{% extends "base.tmpl" %}{% block body %}({{ current_year() }}){% endblock %}"#);
    let renderer = Renderer::with_pages(dir.path(), false, PAGES).unwrap();
    let html = String::from_utf8(renderer.render_page("index.tmpl", &page("t")).unwrap()).unwrap();

    let year: i32 = html
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(year, _)| year.parse().unwrap())
        .unwrap();
    assert!(year >= 2024, "{html}");
}
