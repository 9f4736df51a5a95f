//! Bearer token → Principal 解決 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <token>` を取り出し、AuthService で Principal に解決する
//! - 解決できなければ 401 (`WWW-Authenticate: Bearer`)
//! - disabled の判定はここではしない (ActiveUser extractor の責務)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::{AuthCtx, bearer::bearer_token};
use crate::error::AppError;
use crate::state::AppState;

/// 保護対象の Router に認証を掛ける。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/users/me", get(read_users_me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = match state.auth.authenticate(bearer_token(req.headers())?) {
        Ok(principal) => principal,
        Err(err) => {
            tracing::warn!(error = %err, "bearer token resolution failed");
            return Err(err);
        }
    };

    tracing::debug!(username = %principal.username, "request authenticated");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(principal));

    Ok(next.run(req).await)
}
