use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::AppError;
use crate::repos::user_repo::{CredentialStore, Principal};
use crate::services::auth::password;

pub const TOKEN_TYPE: &str = "bearer";

/// Result of a successful password login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Resolves bearer tokens to principals and exchanges username/password for a token.
///
/// The access token is the username itself: there is no signature and no expiry,
/// so anybody who knows a username can act as that user. Demo only.
#[derive(Clone, Debug)]
pub struct AuthService {
    store: Arc<CredentialStore>,
}

impl AuthService {
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self { store }
    }

    /// Direct store lookup keyed by the token. Pure: no state is touched.
    pub fn resolve_token(&self, token: &str) -> Option<Principal> {
        self.store.get(token).map(|r| r.principal.clone())
    }

    pub fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        self.resolve_token(token).ok_or_else(|| {
            debug!("bearer token did not resolve to a user");
            AppError::unauthorized("Invalid authentication credentials")
        })
    }

    pub fn authenticate_active(&self, token: &str) -> Result<Principal, AppError> {
        let principal = self.authenticate(token)?;
        ensure_active(principal)
    }

    pub fn login(&self, username: &str, presented_secret: &str) -> Result<TokenGrant, AppError> {
        // Unknown user and wrong password share one external error; only the log differs.
        let Some(record) = self.store.get(username) else {
            warn!(username = %username, reason = "unknown_user", "login rejected");
            return Err(AppError::InvalidCredentials);
        };

        if !password::verify_secret(presented_secret, &record.hashed_secret) {
            warn!(username = %username, reason = "secret_mismatch", "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        debug!(username = %username, "login succeeded");

        Ok(TokenGrant {
            access_token: record.principal.username.clone(),
            token_type: TOKEN_TYPE,
        })
    }
}

/// Gate on the disabled flag. Shared by the service and the request extractor.
pub fn ensure_active(principal: Principal) -> Result<Principal, AppError> {
    if principal.disabled {
        warn!(username = %principal.username, "inactive user rejected");
        return Err(AppError::InactivePrincipal);
    }
    Ok(principal)
}
