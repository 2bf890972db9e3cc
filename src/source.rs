use crate::{characteristics::Characteristics, seq::SeqIter};

/// A splittable traversal primitive over a sequence of elements that may
/// fail while producing any single element.
///
/// This is the contract the resilient wrappers consume, and the contract
/// they expose back: [`ResilientSplit`] implements `SplitSource` itself,
/// so a wrapped source substitutes transparently wherever the original was
/// used, including as input to further decomposition or to sequential
/// draining via [`into_seq_iter`].
///
/// Exactly one logical consumer drives a given source at a time; the
/// wrappers never call these operations concurrently on the same un-split
/// instance. Resource release belongs to `Drop`: a wrapper owns its source
/// and dropping the wrapper releases the source exactly once, regardless
/// of how many elements were consumed, skipped or replaced.
///
/// [`ResilientSplit`]: crate::ResilientSplit
/// [`into_seq_iter`]: SplitSource::into_seq_iter
pub trait SplitSource {
    /// Type of the elements produced by the source.
    type Item;

    /// Failure raised while producing a single element.
    type Error;

    /// Attempts to advance by one element.
    ///
    /// * `Ok(true)`: the source advanced; the produced element, if any,
    ///   was passed to `sink`.
    /// * `Ok(false)`: the sequence is exhausted; `sink` was not called.
    /// * `Err(failure)`: producing the next element failed. The failing
    ///   element counts as consumed; a later advance attempt moves on to
    ///   the element after it.
    fn try_advance(&mut self, sink: &mut dyn FnMut(Self::Item)) -> Result<bool, Self::Error>;

    /// Attempts to split off a disjoint prefix of the remaining elements
    /// into a new, fully independent source.
    ///
    /// Returns `None` when the source cannot split any further. Splitting
    /// is intended to happen before any advancement; the behavior of a
    /// split after advancement follows the implementing source's own
    /// contract.
    fn try_split(&mut self) -> Option<Self>
    where
        Self: Sized;

    /// Estimated number of remaining elements; `None` when the size is
    /// unknown or unbounded.
    fn estimate_size(&self) -> Option<usize>;

    /// Traversal flags of the source.
    fn characteristics(&self) -> Characteristics;

    /// Exact number of remaining elements, provided the source reports
    /// itself as [`SIZED`].
    ///
    /// [`SIZED`]: Characteristics::SIZED
    fn exact_size(&self) -> Option<usize> {
        match self.characteristics().contains(Characteristics::SIZED) {
            true => self.estimate_size(),
            false => None,
        }
    }

    /// Repeatedly advances until the sequence is exhausted or a failure
    /// propagates, passing every produced element to `sink`.
    fn for_each_remaining(&mut self, sink: &mut dyn FnMut(Self::Item)) -> Result<(), Self::Error> {
        while self.try_advance(sink)? {}
        Ok(())
    }

    /// Converts the source into a sequential iterator over
    /// `Result<Item, Error>`.
    fn into_seq_iter(self) -> SeqIter<Self>
    where
        Self: Sized,
    {
        SeqIter::new(self)
    }
}
