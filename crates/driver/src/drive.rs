use std::future::Future;

use futures::future::FutureExt;
use tracing::{debug, trace};

use codrive_task::Task;

use crate::error::Error;
use crate::gen::{BoxGen, Co, CoState, Gen};
use crate::normalize::{normalize, Normalized};
use crate::value::Value;
use crate::yieldable::Resume;

/// Drive a coroutine to completion, producing a task that settles with
/// the coroutine's final result.
///
/// The body is an async closure over a [`Co`] handle; arguments and
/// caller context are ordinary closure captures. Like every
/// [`Task`], the returned task is lazy: the coroutine is not advanced
/// until the task is awaited.
pub fn drive<F, Fut>(body: F) -> Task<Value, Error>
where
    F: FnOnce(Co) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Value, Error>> + Send + 'static,
{
    drive_coroutine(Gen::new(move |co| body(co).boxed()))
}

/// Drive an already-created coroutine.
///
/// Alternates between advancing the coroutine and settling the task its
/// step yielded, resuming with [`Resume::Value`] on success and
/// [`Resume::Fail`] on failure, until the coroutine completes. Each
/// resumption is scheduled through the settled child's `await` point,
/// so the loop never grows the call stack, no matter how many times the
/// coroutine suspends.
pub fn drive_coroutine(mut gen: BoxGen) -> Task<Value, Error> {
    Task::from_future(async move {
        let mut state = gen.resume_with(Resume::Start);

        loop {
            match state {
                CoState::Yielded(yieldable) => {
                    trace!(?yieldable, "coroutine suspended");

                    let resume = match normalize(yieldable) {
                        Normalized::Task(task) => match task.await {
                            Ok(value) => Resume::Value(value),
                            Err(error) => {
                                debug!(%error, "child failed, offering it to the coroutine");
                                Resume::Fail(error)
                            }
                        },
                        // A bare value at a suspension point is a
                        // caller bug, but it is still offered to the
                        // coroutine, which may catch it.
                        Normalized::Immediate(value) => {
                            Resume::Fail(Error::UnsupportedYield(value))
                        }
                    };

                    state = gen.resume_with(resume);
                }

                CoState::Complete(result) => return result,
            }
        }
    })
}

/// Wrap a coroutine function into a reusable entry point.
///
/// Where [`drive`] consumes its body, a [`Wrapped`] keeps it and builds
/// a fresh coroutine on every [`call`][Wrapped::call].
pub fn wrap<F>(body: F) -> Wrapped<F> {
    Wrapped { body }
}

/// A coroutine function packaged for repeated driving.
pub struct Wrapped<F> {
    body: F,
}

impl<F> Wrapped<F> {
    /// The coroutine function this wrapper was built from.
    pub fn body(&self) -> &F {
        &self.body
    }

    /// Create a fresh coroutine from the wrapped function applied to
    /// `args`, and drive it.
    pub fn call<A, Fut>(&self, args: A) -> Task<Value, Error>
    where
        F: Fn(Co, A) -> Fut + Clone + Send + 'static,
        A: Send + 'static,
        Fut: Future<Output = Result<Value, Error>> + Send + 'static,
    {
        let body = self.body.clone();
        drive(move |co| body(co, args))
    }
}
