/*
 * Responsibility
 * - username → UserRecord の読み取り専用ストア
 * - 起動時に一度だけ構築し、リクエスト処理中は変更しない (Arc で共有、ロック不要)
 */
use std::collections::HashMap;

use crate::services::auth::password;

/// Authenticated identity as seen by handlers. Never carries the secret hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub principal: Principal,
    pub hashed_secret: String,
}

#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, UserRecord>,
}

impl CredentialStore {
    pub fn from_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|r| (r.principal.username.clone(), r))
            .collect();

        Self { users }
    }

    /// Demo users: `johndoe` / `secret` (enabled) and `alice` / `secret2` (disabled).
    pub fn seeded() -> Self {
        Self::from_records([
            UserRecord {
                principal: Principal {
                    username: "johndoe".into(),
                    full_name: Some("John Doe".into()),
                    email: Some("johndoe@example.com".into()),
                    disabled: false,
                },
                hashed_secret: password::hash_secret("secret"),
            },
            UserRecord {
                principal: Principal {
                    username: "alice".into(),
                    full_name: Some("Alice Wonderson".into()),
                    email: Some("alice@example.com".into()),
                    disabled: true,
                },
                hashed_secret: password::hash_secret("secret2"),
            },
        ])
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
