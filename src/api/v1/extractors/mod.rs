/*
 * Responsibility
 * - handler が受け取る「依存」を FromRequestParts として提供する
 *   - BearerToken: Authorization ヘッダの生トークン
 *   - CurrentUser / ActiveUser: middleware が解決した Principal
 *   - Session: リクエスト単位で acquire される DbSession
 *   - CommonQueryParams: q / skip / limit の共通クエリ
 *   - QueryOrCookie: q が無ければ last_query cookie
 */
pub mod auth_ctx;
pub mod bearer;
pub mod query;
pub mod session;

pub use auth_ctx::{ActiveUser, AuthCtx, CurrentUser};
pub use bearer::BearerToken;
pub use query::{CommonQueryParams, QueryOrCookie};
pub use session::Session;
