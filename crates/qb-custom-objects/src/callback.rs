//! Completion handlers and cancellation handles for callback-style calls.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};

/// Receives the outcome of one operation.
///
/// Implemented for every `FnOnce(Result<T>)` closure, and for
/// [`WithContext`] to thread a caller value back to the handler.
pub trait Delegate<T>: Send + 'static {
    fn complete(self, result: Result<T>);
}

impl<T, F> Delegate<T> for F
where
    F: FnOnce(Result<T>) + Send + 'static,
{
    fn complete(self, result: Result<T>) {
        self(result)
    }
}

/// A handler paired with a context value it gets back on completion.
///
/// Built with [`with_context`].
pub struct WithContext<C, F> {
    context: C,
    handler: F,
}

impl<C: std::fmt::Debug, F> std::fmt::Debug for WithContext<C, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithContext")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<T, C, F> Delegate<T> for WithContext<C, F>
where
    C: Send + 'static,
    F: FnOnce(Result<T>, C) + Send + 'static,
{
    fn complete(self, result: Result<T>) {
        (self.handler)(result, self.context)
    }
}

/// Pair `handler` with `context`; the handler receives the context back
/// alongside the result.
///
/// ```rust,ignore
/// objects.get_object("Movie", id, with_context(row, |result, row| {
///     render(row, result);
/// }));
/// ```
pub fn with_context<C, F>(context: C, handler: F) -> WithContext<C, F> {
    WithContext { context, handler }
}

const PENDING: u8 = 0;
const COMPLETING: u8 = 1;
const CANCELLED: u8 = 2;

/// Handle to an operation in flight.
///
/// Dropping the handle does not cancel the operation.
#[derive(Debug)]
pub struct Cancelable {
    token: CancellationToken,
    state: Arc<AtomicU8>,
    handle: JoinHandle<()>,
}

impl Cancelable {
    /// Cancel the operation.
    ///
    /// Returns true if the operation had not yet started delivering its
    /// result; its delegate then receives [`ErrorKind::Cancelled`] and never a
    /// success. Returns false if the result was already being delivered.
    pub fn cancel(&self) -> bool {
        let won = self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        self.token.cancel();
        won
    }

    /// Returns true if [`cancel`](Self::cancel) won the race against completion.
    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLED
    }

    /// Returns true once the delegate has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait until the delegate has returned.
    pub async fn join(self) -> Result<()> {
        self.handle.await.map_err(|e| Error {
            kind: ErrorKind::Runtime(format!("Operation task failed: {}", e)),
            source: Some(Box::new(e)),
        })
    }
}

/// Run `operation` on `runtime` and hand its outcome to `delegate` exactly once.
pub(crate) fn spawn<T, Fut, D>(runtime: &Handle, operation: Fut, delegate: D) -> Cancelable
where
    T: Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
    D: Delegate<T>,
{
    let token = CancellationToken::new();
    let state = Arc::new(AtomicU8::new(PENDING));

    let task_token = token.clone();
    let task_state = Arc::clone(&state);
    let handle = runtime.spawn(async move {
        let result = tokio::select! {
            biased;
            _ = task_token.cancelled() => Err(Error::cancelled()),
            result = operation => result,
        };

        let delivering = task_state
            .compare_exchange(PENDING, COMPLETING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if delivering {
            delegate.complete(result);
        } else {
            debug!("Operation cancelled before completion");
            delegate.complete(Err(Error::cancelled()));
        }
    });

    Cancelable { token, state, handle }
}
