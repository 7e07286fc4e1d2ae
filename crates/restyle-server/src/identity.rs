use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use restyle_config::SessionConfig;
use restyle_core::UserIdentity;

/// Middleware that records the signed-in user forwarded by the session layer
///
/// Requests without the header, or with an empty value, stay anonymous.
pub async fn identity_middleware(config: SessionConfig, mut request: Request, next: Next) -> Response {
    if let Some(identity) = extract_identity(&config, &request) {
        request.extensions_mut().insert(identity);
    }

    next.run(request).await
}

fn extract_identity(config: &SessionConfig, request: &Request) -> Option<UserIdentity> {
    request
        .headers()
        .get(&config.user_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(UserIdentity::new)
}
