//! A minimal coroutine driver.
//!
//! A coroutine is a suspendable computation: an async body over a
//! [`Co`] handle that may pause at any number of suspension points,
//! each time yielding a [`Yieldable`] — a task, a future, a nested
//! coroutine, a callback-style thunk, an ordered sequence or a
//! key-unique mapping of those. The driver normalizes every shape into
//! a uniform [`Task`][codrive_task::Task], awaits it, and resumes the
//! coroutine with the outcome ([`Resume::Value`] or [`Resume::Fail`]),
//! repeating until the body returns. [`drive`] packages the whole loop
//! as a single task settling with the coroutine's final result.
//!
//! ```rust,ignore
//! use codrive_driver::prelude::*;
//!
//! let task = drive(|co| async move {
//!     let n = suspend!(co, Yieldable::thunk(|cb| cb.ok(42)));
//!     Ok(Value::from(n.as_int().unwrap_or(0) + 1))
//! });
//!
//! assert_eq!(task.await, Ok(Value::from(43)));
//! ```

mod macros;

mod drive;
pub use drive::{drive, drive_coroutine, wrap, Wrapped};

mod error;
pub use error::Error;

pub mod gen;
pub use gen::{BoxGen, Co};

mod normalize;
pub use normalize::{normalize, to_task, Normalized};

mod value;
pub use value::{Map, Value};

mod yieldable;
pub use yieldable::{Callback, Resume, Thunk, Yieldable};

pub mod prelude;
