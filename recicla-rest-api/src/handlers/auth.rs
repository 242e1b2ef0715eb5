//! Authentication endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use recicla_interfaces::DatabaseError;
use recicla_web::{AuthContext, WebError};
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    context::AccountsContext,
    errors::{store_failure, RestError, RestResult, PROCESSING_ERROR},
    models::{AuthResponse, LoginRequest, MessageResponse, SignupRequest},
};

const EMAIL_IN_USE: &str = "Este email já está em uso";
const INVALID_CREDENTIALS: &str = "Credenciais inválidas";
const NOT_AUTHENTICATED: &str = "Não autenticado";

/// Register a new account
pub async fn signup(
    State(ctx): State<AccountsContext>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> RestResult<impl IntoResponse> {
    let Json(request) = payload?;
    request.validate()?;

    let users = ctx.repositories.user_repository();

    let existing = users
        .find_by_email(&request.email)
        .await
        .map_err(store_failure(PROCESSING_ERROR))?;
    if existing.is_some() {
        warn!("Signup rejected: email already registered");
        return Err(WebError::conflict(EMAIL_IN_USE).into());
    }

    let password_hash = hash_password(request.password.clone(), ctx.bcrypt_cost).await?;

    // a concurrent signup can still win the race; the unique index decides
    let user = match users.create_user(request.into_new_user(password_hash)).await {
        Ok(user) => user,
        Err(DatabaseError::Constraint { .. }) => return Err(WebError::conflict(EMAIL_IN_USE).into()),
        Err(e) => return Err(store_failure(PROCESSING_ERROR)(e)),
    };

    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("Usuário criado com sucesso", user.summary())),
    ))
}

/// Check credentials and issue the session cookie
pub async fn login(
    State(ctx): State<AccountsContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> RestResult<impl IntoResponse> {
    let Json(request) = payload?;
    request.validate()?;

    let credentials = ctx
        .repositories
        .user_repository()
        .find_credentials_by_email(&request.email)
        .await
        .map_err(store_failure(PROCESSING_ERROR))?;

    let Some(credentials) = credentials else {
        warn!("Login failed: unknown email");
        return Err(WebError::unauthorized(INVALID_CREDENTIALS).into());
    };

    if !verify_password(request.password, credentials.password_hash).await? {
        warn!("Login failed: wrong password for user {}", credentials.user.id);
        return Err(WebError::unauthorized(INVALID_CREDENTIALS).into());
    }

    let token = ctx.jwt_manager.generate_token(&credentials.user.id)?;
    let cookie = ctx.session_cookie.session(&token)?;

    info!("User {} logged in", credentials.user.id);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse::new("Login realizado com sucesso", credentials.user.summary())),
    ))
}

/// Clear the session cookie. Always succeeds.
pub async fn logout(State(ctx): State<AccountsContext>) -> RestResult<impl IntoResponse> {
    let cookie = ctx.session_cookie.clear()?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Logout realizado com sucesso")),
    ))
}

/// Profile of the logged-in user, re-read from the store
pub async fn current_user(State(ctx): State<AccountsContext>, auth: AuthContext) -> RestResult<impl IntoResponse> {
    let user_id = auth.require_user(NOT_AUTHENTICATED)?;

    let user = ctx
        .repositories
        .user_repository()
        .find_by_id(user_id)
        .await
        .map_err(store_failure(PROCESSING_ERROR))?
        .ok_or_else(|| WebError::unauthorized(NOT_AUTHENTICATED))?;

    Ok(Json(user))
}

async fn hash_password(password: String, cost: u32) -> RestResult<String> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {}", e);
            RestError::from(WebError::internal(PROCESSING_ERROR))
        })?;

    outcome.map_err(|e| {
        error!("Password hashing failed: {}", e);
        RestError::from(WebError::internal(PROCESSING_ERROR))
    })
}

/// A stored hash bcrypt cannot parse counts as a mismatch
async fn verify_password(password: String, hash: String) -> RestResult<bool> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            error!("Password check task failed: {}", e);
            RestError::from(WebError::internal(PROCESSING_ERROR))
        })?;

    Ok(outcome.unwrap_or_else(|e| {
        warn!("Stored password hash is unreadable: {}", e);
        false
    }))
}
