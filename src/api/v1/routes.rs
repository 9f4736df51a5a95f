/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - Bearer が必要な範囲 (/users/me) にだけ access middleware を掛ける
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{read_token, read_users_me, token},
    items::{get_item, get_item_custom_error, list_items, read_query_or_cookie, read_unicorn},
    sessions::{broken, lookup, status},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/users/me", get(read_users_me));
    let protected = middleware::auth::access::apply(protected, state);

    Router::new()
        .route("/token", post(token))
        .route("/oauth2", get(read_token))
        .route("/sessions/lookup", get(lookup))
        .route("/sessions/broken", get(broken))
        .route("/sessions/status", get(status))
        .route("/items", get(list_items))
        .route("/items/{item_id}", get(get_item))
        .route("/items_custom_error/{item_id}", get(get_item_custom_error))
        .route("/sub_depends_items", get(read_query_or_cookie))
        .route("/unicorns/{name}", get(read_unicorn))
        .merge(protected)
}
