use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::state::Config;

const BASE_CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    script-src 'self' https://cdnjs.cloudflare.com https://cdn.jsdelivr.net; \
    style-src 'self' https://cdnjs.cloudflare.com https://cdn.jsdelivr.net; \
    font-src 'self' https://cdnjs.cloudflare.com; \
    img-src 'self' data: https://cdnjs.cloudflare.com https://cdn.jsdelivr.net; \
    frame-ancestors 'none'; \
    form-action 'self'";

#[derive(Clone)]
pub struct SecurityHeadersState {
    content_security_policy: HeaderValue,
}

impl SecurityHeadersState {
    /// Builds the policy with `connect-src` pointed at the configured listen address.
    pub fn from_config(config: &Config) -> Self {
        let policy = format!(
            "{}; connect-src 'self' http://{}:{}",
            BASE_CONTENT_SECURITY_POLICY, config.host, config.port
        );

        let content_security_policy = HeaderValue::from_str(&policy).unwrap_or_else(|_| {
            tracing::warn!("Host {:?} is not valid in a header, omitting connect-src", config.host);
            HeaderValue::from_static(BASE_CONTENT_SECURITY_POLICY)
        });

        Self {
            content_security_policy,
        }
    }
}

/// Adds the browser hardening headers to every response, keeping any a handler set itself.
pub async fn security_headers(
    State(state): State<SecurityHeadersState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers
        .entry(header::CONTENT_SECURITY_POLICY)
        .or_insert_with(|| state.content_security_policy.clone());
    headers
        .entry(header::X_CONTENT_TYPE_OPTIONS)
        .or_insert_with(|| HeaderValue::from_static("nosniff"));
    headers
        .entry(header::X_FRAME_OPTIONS)
        .or_insert_with(|| HeaderValue::from_static("DENY"));
    headers
        .entry(header::X_XSS_PROTECTION)
        .or_insert_with(|| HeaderValue::from_static("1; mode=block"));
    headers
        .entry(header::STRICT_TRANSPORT_SECURITY)
        .or_insert_with(|| HeaderValue::from_static("max-age=31536000; includeSubDomains"));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_allows_configured_api_origin() {
        let config = Config {
            host: "localhost".to_string(),
            port: 5001,
            ..Config::default()
        };

        let state = SecurityHeadersState::from_config(&config);
        let policy = state.content_security_policy.to_str().unwrap();

        assert!(policy.starts_with("default-src 'self'"));
        assert!(policy.ends_with("connect-src 'self' http://localhost:5001"));
    }

    #[test]
    fn test_unusable_host_falls_back_to_base_policy() {
        let config = Config {
            host: "bad\nhost".to_string(),
            ..Config::default()
        };

        let state = SecurityHeadersState::from_config(&config);

        assert_eq!(state.content_security_policy, BASE_CONTENT_SECURITY_POLICY);
    }
}
