/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use crate::repos::user_repo::Principal;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `principal` は token から解決したユーザー (disabled かどうかは未判定)
/// - token 自体は保持しない (username と同値なのでログにも出さない)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: Principal,
}

impl AuthCtx {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }
}
