pub mod pool;
pub mod provider;
pub mod scope;

pub use pool::{DbSession, PoolStats, SessionPool};
pub use provider::{ResourceError, ResourceProvider};
pub use scope::{BoxFuture, ScopeError, Scoped, with_scoped};
