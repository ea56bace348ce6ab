use std::sync::Arc;

use brightside_core::MotivationRecord;
use tokio::runtime::{Handle, Runtime};

use crate::{MotivationService, ServiceError};

/// Blocking wrapper around an async `MotivationService`.
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers like the TUI; the runtime handle is shared with
/// the reminder scheduler so timers outlive individual calls.
pub struct BlockingMotivationService {
    inner: Arc<dyn MotivationService>,
    rt: Runtime,
}

impl BlockingMotivationService {
    pub fn new(inner: Arc<dyn MotivationService>) -> std::io::Result<Self> {
        Ok(Self {
            inner,
            rt: Runtime::new()?,
        })
    }

    /// Handle to the internal runtime, for spawning background work.
    pub fn handle(&self) -> Handle {
        self.rt.handle().clone()
    }

    /// Shared reference to the underlying async service.
    pub fn service(&self) -> Arc<dyn MotivationService> {
        Arc::clone(&self.inner)
    }

    pub fn fetch_motivation(&self, goals: &str) -> Result<MotivationRecord, ServiceError> {
        self.rt.block_on(self.inner.fetch_motivation(goals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticMotivationService;

    #[test]
    fn blocking_fetch_delegates_and_records_goals() {
        let inner = Arc::new(StaticMotivationService::new());
        let svc = BlockingMotivationService::new(inner.clone()).unwrap();

        let record = svc.fetch_motivation("run 5k").unwrap();
        assert_eq!(record.quote.author, "Mark Twain");
        assert_eq!(inner.calls(), vec!["run 5k".to_string()]);
    }

    #[test]
    fn blocking_fetch_surfaces_errors() {
        let inner = Arc::new(StaticMotivationService::failing());
        let svc = BlockingMotivationService::new(inner).unwrap();

        let err = svc.fetch_motivation("").unwrap_err();
        assert!(matches!(err, ServiceError::Api(_)));
    }
}
