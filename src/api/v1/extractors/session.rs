/*
 * Responsibility
 * - リクエスト毎に DbSession を acquire し、handler に引数として渡す
 * - release は Scoped の Drop に任せる (handler の正常終了 / エラー / panic / キャンセル)
 */
use std::ops::{Deref, DerefMut};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::session::{DbSession, Scoped, SessionPool};
use crate::state::AppState;

#[derive(Debug)]
pub struct Session(pub Scoped<SessionPool>);

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let scope = Scoped::acquire(state.sessions.clone()).await?;
        Ok(Session(scope))
    }
}

impl Deref for Session {
    type Target = DbSession;

    fn deref(&self) -> &DbSession {
        self.0.handle()
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut DbSession {
        self.0.handle_mut()
    }
}
