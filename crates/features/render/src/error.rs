use std::borrow::Cow;

#[docsite_derive::docsite_error]
pub enum RenderError {
    #[error("Template error{}: {source}", format_context(.context))]
    Template {
        #[source]
        source: tera::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Template IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Page data error{}: {message}", format_context(.context))]
    Serialize { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Missing template{}: {message}", format_context(.context))]
    MissingTemplate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
