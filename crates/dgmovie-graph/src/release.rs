//! Scoped release of the Dgraph connection.

use tracing::{debug, warn};

use crate::error::DgraphResult;

type ReleaseAction = Box<dyn FnOnce() -> DgraphResult<()> + Send>;

/// Runs a release action exactly once: on [`ReleaseGuard::release`] or on drop,
/// whichever comes first. A failing action is logged, never propagated.
pub struct ReleaseGuard {
    action: Option<ReleaseAction>,
}

impl ReleaseGuard {
    pub fn new(action: impl FnOnce() -> DgraphResult<()> + Send + 'static) -> Self {
        Self {
            action: Some(Box::new(action)),
        }
    }

    /// Release now instead of at end of scope.
    pub fn release(mut self) {
        self.run();
    }

    pub fn is_released(&self) -> bool {
        self.action.is_none()
    }

    fn run(&mut self) {
        if let Some(action) = self.action.take() {
            match action() {
                Ok(()) => debug!("Connection released"),
                Err(e) => warn!(error = %e, "Error while closing connection"),
            }
        }
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for ReleaseGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseGuard")
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DgraphError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_guard(result: fn() -> DgraphResult<()>) -> (ReleaseGuard, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let guard = ReleaseGuard::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            result()
        });
        (guard, calls)
    }

    #[test]
    fn test_release_runs_once() {
        let (guard, calls) = counting_guard(|| Ok(()));
        assert!(!guard.is_released());
        guard.release();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases() {
        let (guard, calls) = counting_guard(|| Ok(()));
        drop(guard);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_release_is_swallowed() {
        let (guard, calls) = counting_guard(|| Err(DgraphError::Closed));
        guard.release();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_after_error_path() {
        let (guard, calls) = counting_guard(|| Ok(()));
        let outcome: Result<(), DgraphError> = (|| {
            let _guard = guard;
            Err(DgraphError::Finished)
        })();
        assert!(outcome.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
