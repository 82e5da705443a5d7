use futures::channel::oneshot;

/// Single-use handle for settling a [`Task`][crate::Task].
///
/// The handle is consumed by whichever of [`resolve`][Settle::resolve],
/// [`reject`][Settle::reject] or [`settle`][Settle::settle] is called,
/// so a task can be settled at most once. Dropping the handle without
/// settling leaves the task pending forever.
pub struct Settle<T, E> {
    tx: oneshot::Sender<Result<T, E>>,
}

impl<T, E> Settle<T, E> {
    pub(crate) fn new(tx: oneshot::Sender<Result<T, E>>) -> Self {
        Self { tx }
    }

    /// Settle the task with a success value.
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    /// Settle the task with a failure.
    pub fn reject(self, error: E) {
        self.settle(Err(error));
    }

    /// Settle the task with an already-formed result.
    pub fn settle(self, result: Result<T, E>) {
        // The receiver is gone if the task was dropped mid-flight,
        // in which case there is nobody left to observe the result.
        let _ = self.tx.send(result);
    }
}
