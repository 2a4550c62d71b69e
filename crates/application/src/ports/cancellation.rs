//! Cooperative cancellation signal.

use tokio::sync::watch;

/// Creates a connected token/receiver pair.
#[must_use]
pub fn cancellation_pair() -> (CancellationToken, CancellationReceiver) {
    let (sender, receiver) = watch::channel(false);
    (
        CancellationToken { sender },
        CancellationReceiver { receiver },
    )
}

/// The cancelling side. Cancelling is idempotent.
#[derive(Debug)]
pub struct CancellationToken {
    sender: watch::Sender<bool>,
}

impl CancellationToken {
    /// Signals cancellation to every receiver.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Creates another receiver for this token.
    #[must_use]
    pub fn receiver(&self) -> CancellationReceiver {
        CancellationReceiver {
            receiver: self.sender.subscribe(),
        }
    }
}

/// The observing side.
#[derive(Debug, Clone)]
pub struct CancellationReceiver {
    receiver: watch::Receiver<bool>,
}

impl CancellationReceiver {
    /// Completes once cancellation is signalled.
    ///
    /// If the token is dropped without cancelling, this never completes.
    pub async fn cancelled(&mut self) {
        if self.receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Returns true if cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }
}
