//! Delayed one-shot jobs: sleep, run the callback, done. A job can be
//! cancelled explicitly before it fires; firing is otherwise unconditional.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A scheduled one-shot task. Dropping the `Job` does NOT cancel it; call
/// [`Job::cancel`] to stop it before it fires.
pub struct Job {
    handle: JoinHandle<()>,
}

impl Job {
    /// Schedules `callback` to run after `delay`.
    pub fn new<F, Fut>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback().await;
        });
        Self { handle }
    }

    /// Cancels the job if it has not yet completed.
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            self.handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
