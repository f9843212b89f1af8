//! Trailing-edge debouncer
//!
//! Holds at most one pending value. Every push replaces it and restarts the
//! quiet-period timer; when the timer runs out the latest value is handed to
//! the callback. Dropping the debouncer discards a pending value.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the timer task. Must be called inside a tokio runtime.
    pub fn new<F, Fut>(delay: Duration, mut on_fire: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            'idle: while let Some(first) = rx.recv().await {
                let mut pending = first;
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => pending = value,
                            None => break 'idle,
                        },
                        _ = tokio::time::sleep(delay) => {
                            on_fire(pending).await;
                            break;
                        }
                    }
                }
            }
        });

        Self { tx, task }
    }

    /// Replace the pending value and restart the timer
    pub fn push(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::warn!("debouncer task has stopped; change dropped");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
