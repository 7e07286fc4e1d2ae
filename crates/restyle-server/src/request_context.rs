use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use restyle_core::{RequestContext, UserIdentity};

/// Middleware that constructs a `RequestContext` from the incoming request
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let context = RequestContext {
        user: request.extensions().get::<UserIdentity>().cloned(),
    };

    request.extensions_mut().insert(context);

    next.run(request).await
}
