use std::future::{Future, IntoFuture};

use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};

use crate::settle::Settle;

/// A lazy deferred computation that settles exactly once, with either a
/// success value `T` or a failure `E`.
///
/// Tasks do nothing until awaited: `task.await` (or
/// [`fork`][Task::fork]) is what triggers the chain of scheduled work.
pub struct Task<T, E> {
    fut: BoxFuture<'static, Result<T, E>>,
}

impl<T, E> Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a task from a settle-executor.
    ///
    /// The executor is invoked with a single-use [`Settle`] handle at
    /// the moment the task is first polled, and the task then waits for
    /// the handle to fire. The executor may settle synchronously or
    /// hand the handle off to a callback that fires later.
    pub fn new<F>(executor: F) -> Self
    where
        F: FnOnce(Settle<T, E>) + Send + 'static,
    {
        Self::from_future(async move {
            let (tx, rx) = oneshot::channel();
            executor(Settle::new(tx));
            match rx.await {
                Ok(result) => result,
                // Settle handle dropped without firing: the computation
                // abandoned its callback, so the task never settles.
                Err(oneshot::Canceled) => future::pending().await,
            }
        })
    }

    /// A task that immediately succeeds with `value`.
    pub fn of(value: T) -> Self {
        Self::from_future(future::ready(Ok(value)))
    }

    /// A task that immediately fails with `error`.
    pub fn rejected(error: E) -> Self {
        Self::from_future(future::ready(Err(error)))
    }

    /// Wrap a future that settles with a result.
    pub fn from_future<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self { fut: fut.boxed() }
    }

    /// Sequential composition: run `f` on the success value once this
    /// task has settled, continuing with the task it returns.
    ///
    /// A failure of this task propagates untouched and `f` never runs.
    pub fn chain<U, F>(self, f: F) -> Task<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Task<U, E> + Send + 'static,
    {
        Task::from_future(async move {
            match self.fut.await {
                Ok(value) => f(value).fut.await,
                Err(error) => Err(error),
            }
        })
    }

    /// Transform the success value.
    pub fn map<U, F>(self, f: F) -> Task<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Task::from_future(self.fut.map(|result| result.map(f)))
    }

    /// Settle the task and hand the outcome to exactly one of the two
    /// callbacks: `on_rejected` for a failure, `on_fulfilled` for a
    /// success.
    pub async fn fork<R>(
        self,
        on_rejected: impl FnOnce(E) -> R,
        on_fulfilled: impl FnOnce(T) -> R,
    ) -> R {
        match self.fut.await {
            Err(error) => on_rejected(error),
            Ok(value) => on_fulfilled(value),
        }
    }
}

/// The empty, immediately successful task.
impl<T, E> Default for Task<T, E>
where
    T: Default + Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::of(T::default())
    }
}

impl<T, E> IntoFuture for Task<T, E> {
    type Output = Result<T, E>;
    type IntoFuture = BoxFuture<'static, Result<T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        self.fut
    }
}
