//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use std::sync::Arc;

use kernel::extract::{AppJson, AppQuery};
use kernel::principal::Principal;
use platform::bearer::extract_bearer_token;

use crate::application::config::AuthConfig;
use crate::application::{
    CurrentUserUseCase, ListUsersUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput,
    RegisterUseCase,
};
use crate::domain::repository::AuthStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserListQuery, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: AuthStore,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            contact: req.contact,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
        }),
    ))
}

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AuthStore,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        expires_at: output.expires_at,
        user: output.user.into(),
    }))
}

/// POST /logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
    headers: HeaderMap,
) -> AuthResult<StatusCode>
where
    R: AuthStore,
{
    // The middleware already resolved this token, so it is present.
    let token = extract_bearer_token(&headers).ok_or(AuthError::TokenInvalid)?;

    LogoutUseCase::new(state.repo.clone())
        .execute(principal.user_id, token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(&principal)
        .await?;

    Ok(Json(user.into()))
}

/// GET /admin/users?role=
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
    AppQuery(query): AppQuery<UserListQuery>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: AuthStore,
{
    let users = ListUsersUseCase::new(state.repo.clone())
        .execute(&principal, query.role.as_deref())
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
