//! Cancellable operations
//!
//! Dropping an operation's future is enough to cancel it: the transport call
//! is aborted and its connection released. The helpers here add explicit
//! cancel signals on top of that for callers that hand work to the runtime.

use std::future::Future;

use tokio::task::JoinHandle;

use crate::ports::{CancellationReceiver, CancellationToken, cancellation_pair};

/// Races `operation` against `cancel`.
///
/// Returns `None` if cancellation is signalled first; the operation's future
/// is then dropped without producing a value or a failure. A signal that
/// is already set when this is called wins.
pub async fn run_cancellable<F>(operation: F, mut cancel: CancellationReceiver) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        output = operation => Some(output),
    }
}

/// A spawned operation that can be cancelled.
///
/// Dropping the handle detaches the operation; it keeps running to
/// completion.
#[derive(Debug)]
pub struct OperationHandle<T> {
    task: JoinHandle<Option<T>>,
    token: CancellationToken,
}

impl<T: Send + 'static> OperationHandle<T> {
    /// Spawns `operation` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(operation: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (token, receiver) = cancellation_pair();
        let task = tokio::spawn(run_cancellable(operation, receiver));
        Self { task, token }
    }

    /// Cancels the operation. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the operation has finished or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the terminal result.
    ///
    /// Returns `None` if the operation was cancelled before it completed.
    /// A panic inside the operation is propagated to the caller.
    pub async fn join(self) -> Option<T> {
        match self.task.await {
            Ok(output) => output,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(_) => None,
        }
    }
}
