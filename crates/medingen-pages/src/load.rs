//! Cancellable page loads.
//!
//! A page wraps its load future with [`cancellable`] and keeps the returned
//! [`LoadHandle`]. Dropping the handle (page teardown) or calling
//! [`LoadHandle::abort`] stops the load at its next suspension point, and
//! the future resolves to [`PageError::Cancelled`] instead of a result that
//! would update discarded state.

use std::future::Future;

use futures::future::{AbortHandle, Abortable};
use futures::FutureExt;

use crate::PageError;

/// Owner of an in-flight load. Aborts the load when dropped.
#[derive(Debug)]
pub struct LoadHandle {
    abort: AbortHandle,
}

impl LoadHandle {
    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Wrap `future` so it can be cancelled through the returned handle.
pub fn cancellable<F, T>(future: F) -> (impl Future<Output = Result<T, PageError>>, LoadHandle)
where
    F: Future<Output = Result<T, PageError>>,
{
    let (abort, registration) = AbortHandle::new_pair();
    let load = Abortable::new(future, registration).map(|outcome| match outcome {
        Ok(result) => result,
        Err(_aborted) => {
            tracing::debug!("page load cancelled");
            Err(PageError::Cancelled)
        }
    });
    (load, LoadHandle { abort })
}
