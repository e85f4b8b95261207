use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

pub type Context = Option<Arc<str>>;

/// Development identity. Every request acts as `DEV_USER` (default
/// `DEVUSER`); the seeded roles give that user both privileges.
#[cfg(feature = "mock_auth")]
pub async fn context_extractor(mut request: Request, next: Next) -> Response {
    let user: Arc<str> = std::env::var("DEV_USER")
        .unwrap_or_else(|_| "DEVUSER".to_string())
        .into();
    request.extensions_mut().insert(Some(user));
    next.run(request).await
}

#[cfg(not(feature = "mock_auth"))]
pub async fn context_extractor(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(None::<Arc<str>>);
    next.run(request).await
}
