//! Owned background tasks that are cancelled when their owner lets go.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// A spawned task tied to a cancellation token.
///
/// Cancelling never aborts the task mid-await: the task observes the token at
/// its next `select!`, so it is safe to cancel from inside the task itself.
#[derive(Debug)]
pub(crate) struct ScopedTask {
    token: CancellationToken,
}

impl ScopedTask {
    pub fn spawn<F, Fut>(body: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        tokio::spawn(body(token.clone()));
        Self { token }
    }

    pub fn cancel(self) {
        self.token.cancel();
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Single scheduled expiry callback for a session.
#[derive(Debug)]
pub(crate) struct SessionTimer {
    task: ScopedTask,
}

impl SessionTimer {
    /// Run `on_expire` after `after` unless cancelled first.
    pub fn arm<F, Fut>(after: Duration, on_expire: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task = ScopedTask::spawn(|token| async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(after) => on_expire().await,
            }
        });
        Self { task }
    }

    pub fn cancel(self) {
        self.task.cancel();
    }
}
