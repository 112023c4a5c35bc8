//! Ties async work to the lifetime of the view that started it.

use std::future::Future;

use tokio::sync::watch;
use tracing::debug;

use crate::error::BookingError;

/// Owned by a view. Closing or dropping it cancels every operation started
/// through one of its handles, so late results never reach a discarded view.
#[derive(Debug)]
pub struct ViewScope {
    name: &'static str,
    closed: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct ScopeHandle {
    closed: watch::Receiver<bool>,
}

impl ViewScope {
    pub fn new(name: &'static str) -> Self {
        let (closed, _) = watch::channel(false);
        Self { name, closed }
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            closed: self.closed.subscribe(),
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    pub fn close(&self) {
        if !self.closed.send_replace(true) {
            debug!(view = self.name, "view scope closed");
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.close();
    }
}

impl ScopeHandle {
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Drives `operation` unless the owning scope closes first.
    pub async fn run<F>(&self, operation: F) -> Result<F::Output, BookingError>
    where
        F: Future,
    {
        let mut closed = self.closed.clone();
        if *closed.borrow_and_update() {
            return Err(BookingError::Cancelled);
        }
        tokio::select! {
            output = operation => {
                if self.is_closed() {
                    return Err(BookingError::Cancelled);
                }
                Ok(output)
            }
            _ = closed.wait_for(|closed| *closed) => Err(BookingError::Cancelled),
        }
    }
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod tests;
