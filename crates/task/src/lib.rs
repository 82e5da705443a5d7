//! Lazy deferred computations that settle exactly once.
//!
//! A [`Task`] describes an asynchronous computation producing either a
//! success value or a failure. Nothing runs until the task is awaited
//! (or [`fork`][Task::fork]ed): constructing, [`chain`][Task::chain]ing
//! and [`map`][Task::map]ping tasks only schedules work.
//!
//! External, callback-driven computations are adapted through
//! [`Task::new`], whose executor receives a single-use [`Settle`]
//! handle.

mod settle;
pub use settle::Settle;

mod task;
pub use task::Task;
