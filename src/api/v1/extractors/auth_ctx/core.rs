use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::repos::user_repo::Principal;
use crate::services::auth::ensure_active;
use crate::state::AppState;

use super::AuthCtx;

/// Handler で、解決済みの Principal を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定）
#[derive(Debug)]
pub struct CurrentUser(pub Principal);

/// CurrentUser に加えて disabled でないことを保証する
#[derive(Debug)]
pub struct ActiveUser(pub Principal);

fn auth_ctx(parts: &Parts) -> Result<AuthCtx, AppError> {
    parts
        .extensions
        .get::<AuthCtx>()
        .cloned()
        .ok_or(AppError::unauthorized("Not authenticated"))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(auth_ctx(parts)?.principal))
    }
}

impl FromRequestParts<AppState> for ActiveUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // depends on CurrentUser, then gates on the disabled flag
        let CurrentUser(principal) = CurrentUser::from_request_parts(parts, state).await?;
        ensure_active(principal).map(ActiveUser)
    }
}
