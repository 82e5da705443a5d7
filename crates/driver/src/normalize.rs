use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use codrive_task::Task;

use crate::drive::drive_coroutine;
use crate::error::Error;
use crate::value::{Map, Value};
use crate::yieldable::{Callback, Yieldable};

/// A yieldable after normalization: either a task to await, or a bare
/// value the caller decides how to treat.
pub enum Normalized {
    Task(Task<Value, Error>),
    Immediate(Value),
}

/// Convert a yielded value into a task, best effort.
///
/// Every recognized shape converts; bare values come back as
/// [`Normalized::Immediate`], letting the drive loop apply its stricter
/// top-level policy while sequences and mappings accept them as
/// immediate successes.
pub fn normalize(yieldable: Yieldable) -> Normalized {
    match yieldable {
        Yieldable::Value(value) => Normalized::Immediate(value),
        Yieldable::Task(task) => Normalized::Task(task),
        Yieldable::Future(fut) => Normalized::Task(Task::from_future(fut)),
        Yieldable::Coroutine(gen) => Normalized::Task(drive_coroutine(gen)),
        Yieldable::Thunk(thunk) => {
            Normalized::Task(Task::new(move |settle| thunk(Callback::new(settle))))
        }
        Yieldable::Seq(items) => Normalized::Task(seq_to_task(items)),
        Yieldable::Map(entries) => Normalized::Task(map_to_task(entries)),
    }
}

/// Convert a yieldable into a task unconditionally: bare values resolve
/// immediately with themselves.
///
/// This is also the pass-through entry point for driving something that
/// may not be a coroutine at all.
pub fn to_task(yieldable: Yieldable) -> Task<Value, Error> {
    match normalize(yieldable) {
        Normalized::Task(task) => task,
        Normalized::Immediate(value) => Task::of(value),
    }
}

/// Settle tasks one after the other, collecting results in launch
/// order. Each task is launched only once the one before it has
/// settled; the first failure aborts the rest.
fn task_all<T>(tasks: Vec<Task<T, Error>>) -> Task<Vec<T>, Error>
where
    T: Send + 'static,
{
    tasks
        .into_iter()
        .fold(Task::of(Vec::new()), |acc, task| {
            acc.chain(move |mut results| {
                task.map(move |value| {
                    results.push(value);
                    results
                })
            })
        })
}

fn seq_to_task(items: Vec<Yieldable>) -> Task<Value, Error> {
    trace!(len = items.len(), "normalizing sequence");

    let children = items.into_iter().map(to_task).collect();
    task_all(children).map(Value::Seq)
}

fn map_to_task(entries: Vec<(String, Yieldable)>) -> Task<Value, Error> {
    trace!(len = entries.len(), "normalizing mapping");

    let results = Arc::new(Mutex::new(Map::new()));
    let mut deferred = Vec::new();

    for (key, yieldable) in entries {
        match normalize(yieldable) {
            // Bare values are copied over right away, before any
            // deferred key settles.
            Normalized::Immediate(value) => {
                lock(&results).insert(key, value);
            }
            Normalized::Task(task) => {
                // Hold the key's slot so every key is present before
                // the mapping resolves.
                lock(&results).insert(key.clone(), Value::Null);

                let slot = Arc::clone(&results);
                deferred.push(task.map(move |value| {
                    lock(&slot).insert(key, value);
                }));
            }
        }
    }

    task_all(deferred).map(move |_| {
        let map = std::mem::take(&mut *lock(&results));
        Value::Map(map)
    })
}

fn lock(map: &Arc<Mutex<Map>>) -> std::sync::MutexGuard<'_, Map> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}
