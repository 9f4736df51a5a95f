/*
 * Responsibility
 * - scoped session の使い方
 *   - lookup / broken: with_scoped で work を包む
 *     - 既知の失敗 (OperationFailed) は 404
 *     - それ以外 (Other) は release 後に 500
 *   - status: Session extractor で受け取り、handler 終了時に release
 */
use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{
    api::v1::extractors::Session,
    error::AppError,
    services::session::{DbSession, ScopeError, with_scoped},
    state::AppState,
};

// Always fails with the recognized domain failure.
async fn do_something(session: &mut DbSession) -> Result<Value, ScopeError> {
    session.touch();
    Err(ScopeError::OperationFailed("value_error".into()))
}

// Always fails with something the scope does not recognize.
async fn do_something_broken(session: &mut DbSession) -> Result<Value, ScopeError> {
    session.touch();
    Err(anyhow::anyhow!("session {} lost its connection", session.id()).into())
}

pub async fn lookup(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let out = with_scoped(state.sessions.clone(), |session| {
        Box::pin(do_something(session))
    })
    .await?;

    Ok(Json(out))
}

pub async fn broken(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let out = with_scoped(state.sessions.clone(), |session| {
        Box::pin(do_something_broken(session))
    })
    .await?;

    Ok(Json(out))
}

pub async fn status(State(state): State<AppState>, mut session: Session) -> Json<Value> {
    session.touch();

    Json(json!({
        "session_id": session.id(),
        "open": state.sessions.stats().open,
    }))
}
