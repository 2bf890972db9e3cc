use crate::source::SplitSource;
use core::iter::FusedIterator;

/// Sequential iterator over the remaining elements of a [`SplitSource`],
/// obtained by [`into_seq_iter`].
///
/// Advance attempts that produce no element are driven internally; the
/// iterator yields only produced elements and, at most once, a propagated
/// failure, after which it is exhausted.
///
/// [`into_seq_iter`]: SplitSource::into_seq_iter
pub struct SeqIter<S>
where
    S: SplitSource,
{
    source: S,
    done: bool,
}

impl<S> SeqIter<S>
where
    S: SplitSource,
{
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            done: false,
        }
    }
}

impl<S> Iterator for SeqIter<S>
where
    S: SplitSource,
{
    type Item = Result<S::Item, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let mut slot = None;
            match self.source.try_advance(&mut |value| slot = Some(value)) {
                Ok(true) => {
                    // an advance without an element is a skipped failure
                    if let Some(value) = slot {
                        return Some(Ok(value));
                    }
                }
                Ok(false) => self.done = true,
                Err(failure) => {
                    self.done = true;
                    return Some(Err(failure));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.done {
            true => (0, Some(0)),
            false => (0, self.source.estimate_size()),
        }
    }
}

impl<S> FusedIterator for SeqIter<S> where S: SplitSource {}
