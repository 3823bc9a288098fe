use docsite_derive::docsite_error;
use std::borrow::Cow;

#[docsite_error]
pub enum SampleError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, SampleError> {
    Ok(raw.parse::<u32>()?)
}

#[test]
fn docsite_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/docsite_error_pass.rs");
}

#[test]
fn question_mark_converts_source_errors() {
    let err = parse("v1").unwrap_err();
    assert!(matches!(err, SampleError::Parse { context: None, .. }));
    assert!(err.to_string().starts_with("Parse error: "));
}

#[test]
fn context_is_rendered_in_message() {
    let err = "x".parse::<u32>().context("reading port").unwrap_err();
    assert!(err.to_string().starts_with("Parse error (reading port): "));

    let err: Result<(), SampleError> =
        Err(SampleError::NotFound { message: "github.com/a/b".into(), context: None });
    let err = err.context("resolving path").unwrap_err();
    assert_eq!(err.to_string(), "Not found (resolving path): github.com/a/b");
}

#[test]
fn strings_convert_into_internal() {
    let err = SampleError::from("boom");
    assert_eq!(err.to_string(), "Internal error: boom");

    let err = SampleError::from(format!("code {}", 7));
    assert!(matches!(err, SampleError::Internal { .. }));
}
