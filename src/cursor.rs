use crate::{
    budget::Budget,
    recover::{Emit, Recover},
};
use core::iter::FusedIterator;
use core::mem;

enum State<T> {
    Empty,
    Pending(T),
    Exhausted,
}

/// A resilient wrapper around a single-cursor source, any
/// `Iterator<Item = Result<T, E>>`, exposing the same per-element recovery
/// semantics as [`ResilientSplit`] without decomposition support.
///
/// The wrapper buffers at most one produced element at a time: advancing
/// fills the pending slot, delivery clears it. A remaining-count budget,
/// derived from the cursor's size hint when its bounds agree exactly (or
/// declared explicitly with [`new_exact`]), bounds the number of
/// underlying advance attempts; a spent budget reports end of sequence
/// without querying the cursor again.
///
/// The wrapper iterates over `Result<T, E>`: recovered elements surface as
/// `Ok`, and a failure propagated by the policy surfaces as a single
/// `Err`, after which the iterator is exhausted. Parallel consumption of
/// one instance is unsupported; this strategy is strictly sequential.
///
/// The ergonomic way to construct one is [`recover_with`] on any fallible
/// iterator:
///
/// ```
/// use resilient_iter::{RecoverIterator, Substitute};
///
/// let values: Result<Vec<i32>, _> = ["1", "bad", "2"]
///     .into_iter()
///     .map(|token| token.parse::<i32>())
///     .recover_with(Substitute(-1))
///     .collect();
///
/// assert_eq!(values, Ok(vec![1, -1, 2]));
/// ```
///
/// [`ResilientSplit`]: crate::ResilientSplit
/// [`new_exact`]: ResilientCursor::new_exact
/// [`recover_with`]: RecoverIterator::recover_with
pub struct ResilientCursor<I, R, T> {
    source: I,
    policy: R,
    budget: Budget,
    state: State<T>,
}

impl<I, R, T, E> ResilientCursor<I, R, T>
where
    I: Iterator<Item = Result<T, E>>,
    R: Recover<T, E>,
{
    /// Wraps `source`, interposing `policy` between it and the consumer.
    ///
    /// The remaining-count budget is derived from the cursor's size hint
    /// at wrap time: an exact hint (equal bounds) seeds the budget, any
    /// other hint leaves it unlimited.
    pub fn new(source: I, policy: R) -> Self {
        let exact_size = match source.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        };
        Self::with_budget(source, policy, Budget::new(exact_size))
    }

    /// Wraps `source` with a caller-declared exact size instead of the
    /// cursor's own size hint.
    ///
    /// The declared size is advisory: traversal delivers no more than
    /// `exact_len` elements, and a declaration smaller than what the
    /// cursor could produce leaves the overflow silently unreachable.
    pub fn new_exact(source: I, policy: R, exact_len: usize) -> Self {
        Self::with_budget(source, policy, Budget::new(Some(exact_len)))
    }

    fn with_budget(source: I, policy: R, budget: Budget) -> Self {
        Self {
            source,
            policy,
            budget,
            state: State::Empty,
        }
    }

    /// Returns whether a next element is available, advancing the
    /// underlying cursor as needed until an element is produced or
    /// recovered, the cursor ends, or the budget is spent.
    ///
    /// A failure raised by the recovery policy propagates out of this call
    /// uncaught, and the cursor is exhausted afterwards.
    pub fn has_next(&mut self) -> Result<bool, E> {
        loop {
            match &self.state {
                State::Pending(_) => return Ok(true),
                State::Exhausted => return Ok(false),
                State::Empty => {}
            }

            if !self.budget.consume() {
                self.state = State::Exhausted;
                return Ok(false);
            }

            match self.source.next() {
                Some(Ok(value)) => {
                    self.state = State::Pending(value);
                    return Ok(true);
                }
                Some(Err(failure)) => {
                    let mut slot = None;
                    match self.policy.recover(failure, Emit::new(&mut slot)) {
                        Ok(()) => {
                            // no emission: skipped, consult the budget again
                            if let Some(value) = slot {
                                self.state = State::Pending(value);
                                return Ok(true);
                            }
                        }
                        Err(failure) => {
                            self.state = State::Exhausted;
                            return Err(failure);
                        }
                    }
                }
                None => {
                    self.state = State::Exhausted;
                    return Ok(false);
                }
            }
        }
    }
}

impl<I, R, T, E> Iterator for ResilientCursor<I, R, T>
where
    I: Iterator<Item = Result<T, E>>,
    R: Recover<T, E>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Err(failure) => Some(Err(failure)),
            Ok(false) => None,
            Ok(true) => match mem::replace(&mut self.state, State::Empty) {
                State::Pending(value) => Some(Ok(value)),
                // has_next answers true only with a pending value
                _ => None,
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            State::Exhausted => (0, Some(0)),
            state => {
                let pending = matches!(state, State::Pending(_)) as usize;
                match self.budget.remaining() {
                    Some(remaining) => (pending, Some(pending + remaining)),
                    None => (pending, None),
                }
            }
        }
    }
}

impl<I, R, T, E> FusedIterator for ResilientCursor<I, R, T>
where
    I: Iterator<Item = Result<T, E>>,
    R: Recover<T, E>,
{
}

/// Extension over fallible iterators wrapping them with a
/// [`ResilientCursor`].
pub trait RecoverIterator<T, E>: Iterator<Item = Result<T, E>> + Sized {
    /// Wraps this iterator so per-element failures are handed to `policy`
    /// instead of surfacing directly.
    ///
    /// ```
    /// use resilient_iter::{RecoverIterator, Skip};
    ///
    /// let values: Result<Vec<i32>, _> = ["1", "bad", "2"]
    ///     .into_iter()
    ///     .map(|token| token.parse::<i32>())
    ///     .recover_with(Skip)
    ///     .collect();
    ///
    /// assert_eq!(values, Ok(vec![1, 2]));
    /// ```
    fn recover_with<R>(self, policy: R) -> ResilientCursor<Self, R, T>
    where
        R: Recover<T, E>,
    {
        ResilientCursor::new(self, policy)
    }
}

impl<I, T, E> RecoverIterator<T, E> for I where I: Iterator<Item = Result<T, E>> {}
