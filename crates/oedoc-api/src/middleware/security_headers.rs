use axum::http::HeaderValue;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Security headers for file responses
#[derive(Clone, Debug)]
pub struct SecurityHeadersConfig {
    /// Host of the public site the files are embedded in.
    pub public_host: String,
}

impl SecurityHeadersConfig {
    pub fn new(public_host: impl Into<String>) -> Self {
        Self {
            public_host: public_host.into(),
        }
    }

    /// Build Content-Security-Policy header value
    fn build_csp(&self) -> String {
        format!("default-src 'self' 'unsafe-inline' {}", self.public_host)
    }
}

/// Adds the content security policy and disables MIME sniffing on file responses.
pub async fn security_headers_middleware(
    State(config): State<Arc<SecurityHeadersConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );

    if let Ok(header_value) = HeaderValue::from_str(&config.build_csp()) {
        headers.insert("Content-Security-Policy", header_value);
    }

    response
}
