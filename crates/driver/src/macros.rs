/// Suspend on a yieldable and resume with its settled value.
///
/// A failed child returns its error from the surrounding body,
/// rejecting the whole drive. Use [`try_suspend!`] to recover locally
/// instead.
///
/// # Example
/// ```rust,ignore
/// let value = suspend!(co, Yieldable::thunk(|cb| cb.ok(42)));
/// ```
#[macro_export]
macro_rules! suspend {
    ($co:expr, $yieldable:expr) => {
        match $crate::try_suspend!($co, $yieldable) {
            Ok(value) => value,
            Err(error) => return Err(error),
        }
    };
}

/// Suspend on a yieldable and resume with `Ok` on success or `Err` on
/// failure, leaving recovery to the body.
///
/// # Example
/// ```rust,ignore
/// let value = match try_suspend!(co, fetch) {
///     Ok(value) => value,
///     Err(_) => Value::from("fallback"),
/// };
/// ```
#[macro_export]
macro_rules! try_suspend {
    ($co:expr, $yieldable:expr) => {
        match $co.yield_($crate::Yieldable::from($yieldable)).await {
            $crate::Resume::Value(value) => Ok(value),
            $crate::Resume::Fail(error) => Err(error),
            resume @ $crate::Resume::Start => Err($crate::Error::UnexpectedResume {
                got: ::std::format!("{resume:?}"),
                expected: "Value or Fail",
            }),
        }
    };
}
