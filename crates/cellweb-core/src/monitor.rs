//! Cooperative cancellation token owned by the calling session.
//!
//! The codec never stores a monitor: it receives one by reference per call,
//! checks it before long-running extraction steps and forwards it to the
//! driver capability doing the work.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{DriverError, DriverResult};

/// Progress/cancellation token shared between a session and the work it runs.
///
/// Clones share the same cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct ProgressMonitor {
    canceled: Arc<AtomicBool>,
}

impl ProgressMonitor {
    /// Creates a monitor that has not been canceled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every operation observing this monitor.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    /// Fails with a [`DriverErrorCode::Canceled`](crate::DriverErrorCode::Canceled)
    /// error if cancellation was requested.
    pub fn check_canceled(&self) -> DriverResult<()> {
        if self.is_canceled() {
            Err(DriverError::canceled())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_monitor_is_live() {
        let monitor = ProgressMonitor::new();
        assert!(!monitor.is_canceled());
        assert!(monitor.check_canceled().is_ok());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let monitor = ProgressMonitor::new();
        let session_side = monitor.clone();
        session_side.cancel();

        assert!(monitor.is_canceled());
        let err = monitor.check_canceled().unwrap_err();
        assert!(err.is_canceled());
    }
}
