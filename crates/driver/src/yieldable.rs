use core::fmt;
use std::future::Future;

use futures::future::FutureExt;

use codrive_task::{Settle, Task};

use crate::error::Error;
use crate::gen::{BoxGen, Co, Gen};
use crate::value::Value;

/// Outcome of a suspension, injected back into the coroutine when it is
/// resumed.
#[derive(Debug, PartialEq)]
pub enum Resume {
    /// First advancement; carries no outcome.
    Start,

    /// The awaited child settled successfully.
    Value(Value),

    /// The awaited child failed. The body may recover locally or
    /// return the error, rejecting the whole drive.
    Fail(Error),
}

/// A callback-style function: invoked once with a Node-style completion
/// [`Callback`] when the driver settles it.
pub type Thunk = Box<dyn FnOnce(Callback) + Send + 'static>;

/// Completion handle passed to a [`Thunk`].
///
/// Mirrors a `(error, result, ...)` callback: an error rejects, no
/// result resolves [`Value::Null`], a single result resolves that
/// value, and two or more results resolve a [`Value::Seq`] of them.
pub struct Callback {
    settle: Settle<Value, Error>,
}

impl Callback {
    pub(crate) fn new(settle: Settle<Value, Error>) -> Self {
        Self { settle }
    }

    /// Complete with the full Node-style argument list.
    pub fn call(self, error: Option<Error>, mut results: Vec<Value>) {
        match error {
            Some(error) => self.settle.reject(error),
            None => match results.len() {
                0 => self.settle.resolve(Value::Null),
                1 => self.settle.resolve(results.remove(0)),
                _ => self.settle.resolve(Value::Seq(results)),
            },
        }
    }

    /// Complete successfully with a single result value.
    pub fn ok(self, value: impl Into<Value>) {
        self.call(None, vec![value.into()]);
    }

    /// Complete with a failure.
    pub fn fail(self, error: Error) {
        self.call(Some(error), Vec::new());
    }
}

/// A value yielded at a suspension point.
///
/// One variant per shape the driver knows how to settle; classification
/// happens at construction, so the normalizer's dispatch is a closed,
/// exhaustive match. [`Yieldable::Value`] is the catch-all for plain
/// values, which only sequences and mappings accept as immediate
/// successes (yielded directly, they are a type error).
pub enum Yieldable {
    /// An already-normalized task.
    Task(Task<Value, Error>),

    /// Promise-like: any future settling with a result.
    Future(futures::future::BoxFuture<'static, Result<Value, Error>>),

    /// A nested coroutine, driven to completion under the same loop.
    Coroutine(BoxGen),

    /// A callback-style function.
    Thunk(Thunk),

    /// Ordered sequence of yieldables, settled one after the other.
    Seq(Vec<Yieldable>),

    /// Key-unique mapping of yieldables, keys in insertion order.
    Map(Vec<(String, Yieldable)>),

    /// Anything else; immediately resolved where accepted.
    Value(Value),
}

impl Yieldable {
    /// Wrap a future that settles with a result.
    pub fn future<F>(fut: F) -> Self
    where
        F: Future<Output = Result<Value, Error>> + Send + 'static,
    {
        Yieldable::Future(fut.boxed())
    }

    /// Create a nested coroutine from its body.
    pub fn coroutine<F, Fut>(body: F) -> Self
    where
        F: FnOnce(Co) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value, Error>> + Send + 'static,
    {
        Yieldable::Coroutine(Gen::new(move |co| body(co).boxed()))
    }

    /// Wrap a callback-style function.
    pub fn thunk<F>(f: F) -> Self
    where
        F: FnOnce(Callback) + Send + 'static,
    {
        Yieldable::Thunk(Box::new(f))
    }

    /// An ordered sequence of yieldables.
    pub fn seq<I, Y>(items: I) -> Self
    where
        I: IntoIterator<Item = Y>,
        Y: Into<Yieldable>,
    {
        Yieldable::Seq(items.into_iter().map(Into::into).collect())
    }

    /// A key-unique mapping of yieldables. Duplicate keys collapse at
    /// construction: the last value wins, the key keeps its original
    /// position.
    pub fn map<I, K, Y>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Y)>,
        K: Into<String>,
        Y: Into<Yieldable>,
    {
        let mut collapsed: Vec<(String, Yieldable)> = Vec::new();
        for (key, yieldable) in entries {
            let key = key.into();
            let yieldable = yieldable.into();
            match collapsed.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => *slot = yieldable,
                None => collapsed.push((key, yieldable)),
            }
        }
        Yieldable::Map(collapsed)
    }
}

impl fmt::Debug for Yieldable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Yieldable::Task(_) => f.write_str("Task(..)"),
            Yieldable::Future(_) => f.write_str("Future(..)"),
            Yieldable::Coroutine(_) => f.write_str("Coroutine(..)"),
            Yieldable::Thunk(_) => f.write_str("Thunk(..)"),
            Yieldable::Seq(items) => f.debug_tuple("Seq").field(&items.len()).finish(),
            Yieldable::Map(entries) => {
                let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
                f.debug_tuple("Map").field(&keys).finish()
            }
            Yieldable::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl From<Task<Value, Error>> for Yieldable {
    fn from(task: Task<Value, Error>) -> Self {
        Yieldable::Task(task)
    }
}

impl From<BoxGen> for Yieldable {
    fn from(gen: BoxGen) -> Self {
        Yieldable::Coroutine(gen)
    }
}

impl From<Vec<Yieldable>> for Yieldable {
    fn from(items: Vec<Yieldable>) -> Self {
        Yieldable::Seq(items)
    }
}

impl From<Value> for Yieldable {
    fn from(value: Value) -> Self {
        Yieldable::Value(value)
    }
}

impl From<bool> for Yieldable {
    fn from(b: bool) -> Self {
        Yieldable::Value(b.into())
    }
}

impl From<i32> for Yieldable {
    fn from(n: i32) -> Self {
        Yieldable::Value(n.into())
    }
}

impl From<i64> for Yieldable {
    fn from(n: i64) -> Self {
        Yieldable::Value(n.into())
    }
}

impl From<f64> for Yieldable {
    fn from(x: f64) -> Self {
        Yieldable::Value(x.into())
    }
}

impl From<&str> for Yieldable {
    fn from(s: &str) -> Self {
        Yieldable::Value(s.into())
    }
}

impl From<String> for Yieldable {
    fn from(s: String) -> Self {
        Yieldable::Value(s.into())
    }
}
