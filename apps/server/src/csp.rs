use axum::extract::Request;
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use docsite_kernel::csp_nonce;
use tracing::warn;

/// Per-request nonce shared by the CSP header and the inline tags of the page.
#[derive(Debug, Clone)]
pub(crate) struct Nonce(pub(crate) String);

fn policy(nonce: &str) -> String {
    format!(
        "default-src 'self'; script-src 'nonce-{nonce}' 'strict-dynamic'; \
         style-src 'self' 'nonce-{nonce}'; img-src 'self' data: https:; object-src 'none'; \
         base-uri 'none'; frame-ancestors 'none'"
    )
}

/// Generates the nonce, exposes it to handlers and sets the `Content-Security-Policy` header.
pub(crate) async fn content_security_policy(mut request: Request, next: Next) -> Response {
    let nonce = csp_nonce!();
    request.extensions_mut().insert(Nonce(nonce.clone()));

    let mut response = next.run(request).await;
    match HeaderValue::from_str(&policy(&nonce)) {
        Ok(value) => {
            response.headers_mut().insert(header::CONTENT_SECURITY_POLICY, value);
        }
        Err(err) => warn!(error = %err, "invalid content security policy"),
    }
    response
}
