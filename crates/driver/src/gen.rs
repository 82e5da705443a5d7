use genawaiter::sync as gen;
use genawaiter::GeneratorState;

use futures::future::BoxFuture;

use crate::error::Error;
use crate::value::Value;
use crate::yieldable::{Resume, Yieldable};

/// Handle a coroutine body uses to suspend itself.
///
/// `co.yield_(yieldable).await` suspends the coroutine until the driver
/// has settled the yieldable, and evaluates to the [`Resume`] carrying
/// the outcome.
pub type Co = gen::Co<Yieldable, Resume>;

/// A coroutine over a body future `F`.
pub type Gen<F> = gen::Gen<Yieldable, Resume, F>;

/// A ready coroutine with a boxed body; the form yieldables embed and
/// the drive loop consumes.
pub type BoxGen = Gen<BoxFuture<'static, Result<Value, Error>>>;

/// The result of advancing a coroutine by one step: either a yieldable
/// to settle, or the coroutine's final result.
pub type CoState = GeneratorState<Yieldable, Result<Value, Error>>;
