/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthService (読み取り専用の CredentialStore を内包)
 *   - sessions: SessionPool (リクエスト毎に DbSession を貸し出す)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::AuthService, session::SessionPool};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub sessions: Arc<SessionPool>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, sessions: Arc<SessionPool>) -> Self {
        Self { auth, sessions }
    }
}
