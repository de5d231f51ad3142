// src/watch/cancel.rs

//! Cancellation signal for the completion watcher.
//!
//! Built on a `tokio::sync::watch` channel so any number of tokens can observe
//! one handle. Dropping the handle without cancelling leaves tokens pending
//! forever rather than firing them.

use tokio::sync::watch;

/// Sending side; call [`CancelHandle::cancel`] to stop the watch.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Receiving side, passed to the watcher.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace never fails, even with no live receivers.
        self.tx.send_replace(true);
    }
}

impl CancelToken {
    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // Handle dropped without cancelling.
                std::future::pending::<()>().await;
            }
        }
    }
}
