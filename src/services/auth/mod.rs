pub mod credentials;
pub mod password;

pub use credentials::{AuthService, TokenGrant, ensure_active};
