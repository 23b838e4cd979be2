//! Auth Middleware
//!
//! Resolves `Authorization: Bearer <token>` to a [`Principal`] and stores
//! it in the request extensions. Requests without a token pass through
//! untouched; handlers that need a user reject them via the `Principal`
//! extractor. A token that is present but unknown or expired is rejected
//! here with 401.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::bearer::extract_bearer_token;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::TokenRepository;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: TokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> AuthMiddlewareState<R>
where
    R: TokenRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

/// Use with `axum::middleware::from_fn_with_state`.
pub async fn resolve_principal<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: TokenRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = extract_bearer_token(req.headers()).map(str::to_owned) else {
        return next.run(req).await;
    };

    match AuthenticateUseCase::new(state.repo.clone()).execute(&token).await {
        Ok(principal) => {
            tracing::debug!(
                user_id = %principal.user_id,
                role = %principal.role,
                "Request authenticated"
            );
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
