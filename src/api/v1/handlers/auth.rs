/*
 * Responsibility
 * - POST /token: username/password (form) → access token
 * - GET /users/me: middleware で解決済み + active な Principal を返す
 * - GET /oauth2: 提示された bearer token をそのまま返す (解決はしない)
 */
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use serde_json::{Value, json};

use crate::{
    api::v1::{
        dto::{
            auth::{LoginForm, TokenResponse},
            users::UserResponse,
        },
        extractors::{ActiveUser, BearerToken},
    },
    error::AppError,
    state::AppState,
};

pub async fn token(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Form(req) = form.map_err(|e| AppError::bad_request("INVALID_FORM", e.body_text()))?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_FORM", msg))?;

    let grant = state.auth.login(&req.username, &req.password)?;

    Ok(Json(grant.into()))
}

pub async fn read_users_me(ActiveUser(principal): ActiveUser) -> Json<UserResponse> {
    Json(principal.into())
}

pub async fn read_token(BearerToken(token): BearerToken) -> Json<Value> {
    Json(json!({ "token": token }))
}
