//! Cancellable delayed callbacks on the Tokio runtime

use std::time::Duration;

use tokio::task::JoinHandle;

/// A callback that runs once after a delay unless cancelled first.
///
/// Dropping the handle does not cancel the callback.
#[derive(Debug, Default)]
pub struct ScheduledCallback {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledCallback {
    /// Spawn `callback` to run after `delay`. Must be called inside a Tokio runtime.
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the callback if it has not run yet.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
