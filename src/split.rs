use crate::{
    budget::Budget,
    characteristics::Characteristics,
    recover::{Emit, Recover},
    source::SplitSource,
};
use alloc::sync::Arc;

/// A resilient wrapper around a splittable source which:
/// * intercepts per-element production failures and hands them to a
///   recovery policy, instead of aborting the whole traversal,
/// * preserves the split semantics of the source it wraps, so independent
///   sub-ranges can still be consumed concurrently.
///
/// The wrapper implements [`SplitSource`] itself: size estimate and
/// characteristics pass through from the wrapped source, fixed at wrap
/// time, and [`try_split`] yields a new, fully independent wrapper owning
/// the sub-source and sharing the same policy instance. Within one
/// (non-split) wrapper, delivered order matches the source order with
/// failed-and-skipped elements omitted and substituted elements in the
/// failing element's position.
///
/// A remaining-count budget seeded from the source's exact size, when
/// known, bounds traversal: every underlying advance attempt consumes one
/// budget unit, successful or not, and a spent budget reports end of
/// sequence without querying the source again.
///
/// # Example
///
/// The example wraps a splittable source of records in which every tenth
/// record fails to produce, splits it, and drives both halves on separate
/// threads while failed records are skipped.
///
/// ```
/// use resilient_iter::{Characteristics, ResilientSplit, Skip, SplitSource};
/// use std::collections::VecDeque;
/// use std::sync::Mutex;
///
/// struct Records {
///     items: VecDeque<Result<u32, String>>,
/// }
///
/// impl SplitSource for Records {
///     type Item = u32;
///     type Error = String;
///
///     fn try_advance(&mut self, sink: &mut dyn FnMut(u32)) -> Result<bool, String> {
///         match self.items.pop_front() {
///             Some(Ok(value)) => {
///                 sink(value);
///                 Ok(true)
///             }
///             Some(Err(failure)) => Err(failure),
///             None => Ok(false),
///         }
///     }
///
///     fn try_split(&mut self) -> Option<Self> {
///         let half = self.items.len() / 2;
///         match half {
///             0 => None,
///             _ => Some(Self {
///                 items: self.items.drain(..half).collect(),
///             }),
///         }
///     }
///
///     fn estimate_size(&self) -> Option<usize> {
///         Some(self.items.len())
///     }
///
///     fn characteristics(&self) -> Characteristics {
///         Characteristics::ORDERED | Characteristics::SIZED
///     }
/// }
///
/// let items = (0..100u32)
///     .map(|i| match i % 10 {
///         3 => Err(format!("record {i} is corrupt")),
///         _ => Ok(i),
///     })
///     .collect();
///
/// let mut parent = ResilientSplit::new(Records { items }, Skip);
/// let mut child = parent.try_split().expect("source is splittable");
///
/// let collected = Mutex::new(Vec::new());
/// std::thread::scope(|s| {
///     for half in [&mut child, &mut parent] {
///         let collected = &collected;
///         s.spawn(move || {
///             let mut local = Vec::new();
///             half.for_each_remaining(&mut |value| local.push(value)).unwrap();
///             collected.lock().unwrap().extend(local);
///         });
///     }
/// });
///
/// let mut collected = collected.into_inner().unwrap();
/// collected.sort();
/// let expected: Vec<u32> = (0..100).filter(|i| i % 10 != 3).collect();
/// assert_eq!(collected, expected);
/// ```
///
/// [`try_split`]: SplitSource::try_split
pub struct ResilientSplit<S, R>
where
    S: SplitSource,
{
    source: S,
    policy: Arc<R>,
    budget: Budget,
    estimate: Option<usize>,
    characteristics: Characteristics,
    slot: Option<S::Item>,
}

impl<S, R> ResilientSplit<S, R>
where
    S: SplitSource,
    R: Recover<S::Item, S::Error>,
{
    /// Wraps `source`, interposing `policy` between it and the consumer.
    ///
    /// The remaining-count budget, the size estimate and the
    /// characteristics are taken from the source once, here.
    pub fn new(source: S, policy: R) -> Self {
        Self::with_policy(source, Arc::new(policy))
    }

    fn with_policy(source: S, policy: Arc<R>) -> Self {
        let budget = Budget::new(source.exact_size());
        let estimate = source.estimate_size();
        let characteristics = source.characteristics();
        Self {
            source,
            policy,
            budget,
            estimate,
            characteristics,
            slot: None,
        }
    }
}

impl<S, R> SplitSource for ResilientSplit<S, R>
where
    S: SplitSource,
    R: Recover<S::Item, S::Error>,
{
    type Item = S::Item;
    type Error = S::Error;

    /// Attempts to advance the wrapped source by one element.
    ///
    /// On a production failure the recovery policy runs with the exact
    /// failure; an emitted replacement is delivered to `sink` in the
    /// failing element's position. When the policy emits nothing the call
    /// still returns `Ok(true)` having delivered nothing: the attempt
    /// consumed one budget unit and produced zero elements, and skipping
    /// is completed by the caller re-invoking `try_advance`.
    fn try_advance(&mut self, sink: &mut dyn FnMut(S::Item)) -> Result<bool, S::Error> {
        if !self.budget.consume() {
            return Ok(false);
        }

        let Self {
            source,
            policy,
            slot,
            ..
        } = self;

        match source.try_advance(&mut |value| *slot = Some(value)) {
            Ok(advanced) => {
                if let Some(value) = slot.take() {
                    sink(value);
                }
                Ok(advanced)
            }
            Err(failure) => {
                // a partially captured element must not outlive the failed attempt
                *slot = None;
                match policy.recover(failure, Emit::new(slot)) {
                    Ok(()) => {
                        if let Some(value) = slot.take() {
                            sink(value);
                        }
                        Ok(true)
                    }
                    Err(failure) => {
                        *slot = None;
                        Err(failure)
                    }
                }
            }
        }
    }

    fn try_split(&mut self) -> Option<Self> {
        let sub = self.source.try_split()?;
        Some(Self::with_policy(sub, Arc::clone(&self.policy)))
    }

    #[inline(always)]
    fn estimate_size(&self) -> Option<usize> {
        self.estimate
    }

    #[inline(always)]
    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}
