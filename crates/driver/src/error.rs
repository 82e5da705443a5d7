use crate::value::Value;

/// The ways driving a coroutine can fail.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A step yielded a bare value where an awaitable shape was
    /// required. Injected into the coroutine like any other failure, so
    /// the body gets one chance to catch it.
    #[error(
        "you may only yield a task, future, coroutine, thunk, sequence, or mapping, \
         but `{0}` was yielded"
    )]
    UnsupportedYield(Value),

    /// A child task settled with a failure the coroutine did not
    /// recover from.
    #[error("rejected: {0}")]
    Rejected(Value),

    /// The coroutine was resumed with a value that violates the drive
    /// protocol.
    #[error("unexpected resume: {got}, expected {expected}")]
    UnexpectedResume {
        got: String,
        expected: &'static str,
    },
}

impl Error {
    /// A failure carrying an arbitrary payload value.
    pub fn rejected(payload: impl Into<Value>) -> Self {
        Error::Rejected(payload.into())
    }
}
