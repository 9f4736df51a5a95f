use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::services::session::provider::{ResourceError, ResourceProvider};

/// A per-request database session. Stand-in: holds no connection.
#[derive(Debug)]
pub struct DbSession {
    id: u64,
    operations: u32,
}

impl DbSession {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn operations(&self) -> u32 {
        self.operations
    }

    /// Records one unit of work on this session.
    pub fn touch(&mut self) {
        self.operations += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub open: usize,
    pub acquired: u64,
    pub released: u64,
}

/// Hands out `DbSession`s up to `max_open` at a time.
#[derive(Debug)]
pub struct SessionPool {
    max_open: usize,
    next_id: AtomicU64,
    open: AtomicUsize,
    acquired: AtomicU64,
    released: AtomicU64,
}

impl SessionPool {
    pub fn new(max_open: usize) -> Self {
        Self {
            max_open,
            next_id: AtomicU64::new(1),
            open: AtomicUsize::new(0),
            acquired: AtomicU64::new(0),
            released: AtomicU64::new(0),
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            open: self.open.load(Ordering::SeqCst),
            acquired: self.acquired.load(Ordering::SeqCst),
            released: self.released.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl ResourceProvider for SessionPool {
    type Handle = DbSession;

    fn name(&self) -> &'static str {
        "db_session"
    }

    async fn acquire(&self) -> Result<DbSession, ResourceError> {
        // Reserve a slot first; fail without side effects when full.
        let prev = self
            .open
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.max_open).then_some(n + 1)
            })
            .map_err(|open| ResourceError::Exhausted {
                open,
                max: self.max_open,
            })?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.acquired.fetch_add(1, Ordering::SeqCst);

        debug!(session_id = id, open = prev + 1, "session opened");

        Ok(DbSession { id, operations: 0 })
    }

    fn release(&self, handle: DbSession) {
        self.open.fetch_sub(1, Ordering::SeqCst);
        self.released.fetch_add(1, Ordering::SeqCst);

        info!(
            session_id = handle.id,
            operations = handle.operations,
            "session closed"
        );
    }
}
