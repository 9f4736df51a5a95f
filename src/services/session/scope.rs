/*
 * Responsibility
 * - acquire → use → release の順序保証 (release はどの終了経路でも 1 回だけ)
 * - scoped work 内の既知の失敗 (OperationFailed) を NotFound に変換してから返す
 *
 * Lifecycle
 * - Unacquired: Scoped がまだ無い
 * - Acquired:   Scoped が handle を保持
 * - Released:   Scoped が消費/Drop された (release 済み)
 */
use std::{future::Future, pin::Pin, sync::Arc};

use thiserror::Error;
use tracing::{debug, error};

use crate::error::AppError;
use crate::services::session::provider::{ResourceError, ResourceProvider};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Failures raised from inside scoped work.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// Recognized domain failure; surfaced to the caller as `NotFound`.
    #[error("operation failed: {0}")]
    OperationFailed(String),

    /// Anything else. Propagated as an internal error after release.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ScopeError> for AppError {
    fn from(e: ScopeError) -> Self {
        match e {
            ScopeError::OperationFailed(reason) => {
                debug!(reason = %reason, "scoped work failed, reporting not found");
                AppError::not_found("down")
            }
            ScopeError::Other(err) => {
                error!(error = ?err, "scoped work failed unexpectedly");
                AppError::Internal
            }
        }
    }
}

/// Guard owning an acquired handle. Releases it exactly once, on drop or `release()`.
pub struct Scoped<P: ResourceProvider> {
    provider: Arc<P>,
    handle: Option<P::Handle>,
}

impl<P: ResourceProvider> Scoped<P> {
    pub async fn acquire(provider: Arc<P>) -> Result<Self, ResourceError> {
        let handle = provider.acquire().await?;

        Ok(Self {
            provider,
            handle: Some(handle),
        })
    }

    pub fn handle(&self) -> &P::Handle {
        // `handle` is only taken in Drop, so it is always present here.
        self.handle.as_ref().expect("scoped handle present until release")
    }

    pub fn handle_mut(&mut self) -> &mut P::Handle {
        self.handle.as_mut().expect("scoped handle present until release")
    }

    /// Ends the scope now instead of at the end of the enclosing block.
    pub fn release(self) {
        drop(self);
    }
}

impl<P: ResourceProvider> Drop for Scoped<P> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(provider = self.provider.name(), "releasing scoped resource");
            self.provider.release(handle);
        }
    }
}

impl<P: ResourceProvider> std::fmt::Debug for Scoped<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoped")
            .field("provider", &self.provider.name())
            .field("held", &self.handle.is_some())
            .finish()
    }
}

/// Runs `work` with a freshly acquired handle.
///
/// - `ScopeError::OperationFailed` becomes `AppError::NotFound`
/// - `ScopeError::Other` becomes `AppError::Internal`
/// - the handle is released before returning on every path, including panics
///   inside `work` and dropping this future mid-flight
pub async fn with_scoped<P, T, F>(provider: Arc<P>, work: F) -> Result<T, AppError>
where
    P: ResourceProvider,
    T: Send,
    F: for<'a> FnOnce(&'a mut P::Handle) -> BoxFuture<'a, Result<T, ScopeError>> + Send,
{
    let mut scope = Scoped::acquire(provider).await?;

    let outcome = work(scope.handle_mut()).await.map_err(AppError::from);

    scope.release();
    outcome
}
