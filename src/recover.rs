/// Single-use emission handle handed to a [`Recover`] policy.
///
/// A policy substitutes a replacement for the failed element by calling
/// [`value`], which consumes the handle; at most one emission per failure
/// is therefore enforced at the type level. A handle dropped unused means
/// the failed element is skipped.
///
/// [`value`]: Emit::value
pub struct Emit<'a, T> {
    slot: &'a mut Option<T>,
}

impl<'a, T> Emit<'a, T> {
    pub(crate) fn new(slot: &'a mut Option<T>) -> Self {
        Self { slot }
    }

    /// Emits `value` in the position the failed element would have occupied.
    pub fn value(self, value: T) {
        *self.slot = Some(value);
    }
}

/// Decides the fate of a single failed element.
///
/// A policy is invoked synchronously, on the advance call that experienced
/// the failure, with the exact failure the source raised: the wrappers
/// never wrap or translate it. Each underlying advance attempt triggers at
/// most one invocation; when consecutive elements fail, the policy runs
/// once per failed attempt.
///
/// After a splittable wrapper is split, parent and child share the same
/// policy instance and may invoke it from different threads concurrently.
/// The wrappers do not serialize these calls: a policy carrying state must
/// synchronize internally.
///
/// The built-in policies are [`Propagate`], [`Substitute`] and [`Skip`].
/// Beyond them, any `Fn(E, Emit<'_, T>) -> Result<(), E>` is a policy:
///
/// ```
/// use resilient_iter::{Emit, RecoverIterator};
/// use std::num::ParseIntError;
///
/// fn zero_on_failure(_failure: ParseIntError, emit: Emit<'_, i32>) -> Result<(), ParseIntError> {
///     emit.value(0);
///     Ok(())
/// }
///
/// let values: Result<Vec<i32>, _> = ["1", "x", "3"]
///     .into_iter()
///     .map(|token| token.parse::<i32>())
///     .recover_with(zero_on_failure)
///     .collect();
///
/// assert_eq!(values, Ok(vec![1, 0, 3]));
/// ```
pub trait Recover<T, E> {
    /// Invoked with the exact failure raised while producing one element.
    ///
    /// Calling [`Emit::value`] substitutes a replacement in the failed
    /// element's position; leaving `emit` unused skips the element; and
    /// returning `Err` propagates a failure to the consumer, terminating
    /// traversal of the wrapper that invoked the policy.
    fn recover(&self, failure: E, emit: Emit<'_, T>) -> Result<(), E>;
}

impl<T, E, F> Recover<T, E> for F
where
    F: for<'a> Fn(E, Emit<'a, T>) -> Result<(), E>,
{
    fn recover(&self, failure: E, emit: Emit<'_, T>) -> Result<(), E> {
        self(failure, emit)
    }
}

/// Re-raises every failure, terminating traversal of the failing wrapper.
///
/// Sub-sources produced by earlier splits are unaffected; each split
/// instance terminates independently.
pub struct Propagate;

impl<T, E> Recover<T, E> for Propagate {
    fn recover(&self, failure: E, _emit: Emit<'_, T>) -> Result<(), E> {
        Err(failure)
    }
}

/// Replaces every failed element with a clone of a fixed value, in the
/// position the failed element would have occupied.
pub struct Substitute<T>(pub T);

impl<T, E> Recover<T, E> for Substitute<T>
where
    T: Clone,
{
    fn recover(&self, _failure: E, emit: Emit<'_, T>) -> Result<(), E> {
        emit.value(self.0.clone());
        Ok(())
    }
}

/// Drops every failed element, continuing with the next.
pub struct Skip;

impl<T, E> Recover<T, E> for Skip {
    fn recover(&self, _failure: E, _emit: Emit<'_, T>) -> Result<(), E> {
        Ok(())
    }
}
