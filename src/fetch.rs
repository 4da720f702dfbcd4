//! Cancellable fetch tasks.
//!
//! Each view owns the fetches it starts. Dropping a `FetchTask` aborts the
//! underlying tokio task, so a view torn down before its fetch resolves can
//! never apply a stale update.

use std::future::Future;

use tokio::task::JoinHandle;

pub struct FetchTask<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> FetchTask<T> {
    /// Spawn a fetch on the current tokio runtime.
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(fut)),
        }
    }

    /// Await the result. Returns `None` if the task was aborted or panicked.
    pub async fn join(mut self) -> Option<T> {
        let handle = self.handle.take()?;
        match handle.await {
            Ok(value) => Some(value),
            Err(e) => {
                if e.is_panic() {
                    tracing::warn!("Fetch task panicked: {e}");
                }
                None
            }
        }
    }

    /// Abort the fetch without consuming the handle.
    pub fn abort(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| h.is_finished())
            .unwrap_or(true)
    }
}

impl<T> Drop for FetchTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
