/*
 * Responsibility
 * - Users の response DTO
 * - hashed_secret は外に出さない
 */
use serde::Serialize;

use crate::repos::user_repo::Principal;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
}

impl From<Principal> for UserResponse {
    fn from(p: Principal) -> Self {
        Self {
            username: p.username,
            full_name: p.full_name,
            email: p.email,
            disabled: p.disabled,
        }
    }
}
