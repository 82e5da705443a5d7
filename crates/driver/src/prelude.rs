//! Everything a coroutine body needs in scope.

pub use codrive_task::{Settle, Task};

pub use crate::error::Error;
pub use crate::gen::{BoxGen, Co, CoState, Gen};
pub use crate::value::{Map, Value};
pub use crate::yieldable::{Callback, Resume, Thunk, Yieldable};

pub use crate::drive::{drive, drive_coroutine, wrap, Wrapped};
pub use crate::normalize::{normalize, to_task, Normalized};

pub use crate::{suspend, try_suspend};
