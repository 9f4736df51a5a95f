//! Resource provider interface used by the scoped dependency layer.
use async_trait::async_trait;
use thiserror::Error;

use crate::error::AppError;

/// Acquire-side failures.
///
/// Kept apart from `AppError` so the provider does not need to know about HTTP.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource exhausted: {open}/{max} open")]
    Exhausted { open: usize, max: usize },
}

/// Something that hands out short-lived handles and takes them back.
///
/// `release` is synchronous so it can run from `Drop` (panic unwinding,
/// cancelled futures). Implementations must not panic in `release`.
#[async_trait]
pub trait ResourceProvider: Send + Sync + 'static {
    type Handle: Send;

    // Backend name (for logging).
    fn name(&self) -> &'static str;

    async fn acquire(&self) -> Result<Self::Handle, ResourceError>;

    fn release(&self, handle: Self::Handle);
}

impl From<ResourceError> for AppError {
    fn from(e: ResourceError) -> Self {
        tracing::warn!(error = %e, "resource acquisition failed");
        AppError::ResourceUnavailable
    }
}
