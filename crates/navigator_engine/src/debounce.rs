use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Single-slot pending task: scheduling replaces (cancels) whatever was
/// pending, so a burst of mutation notifications collapses into one run
/// per quiet period.
#[derive(Debug, Default)]
pub struct Debouncer {
    slot: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay` unless another schedule or a cancel
    /// arrives first.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.slot.take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
