#![doc = include_str!("../README.md")]
#![warn(
    missing_docs,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::float_cmp,
    clippy::float_cmp_const,
    clippy::missing_panics_doc,
    clippy::todo
)]
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;


mod budget;
mod characteristics;
mod cursor;
mod recover;
mod seq;
mod source;
mod split;

pub use characteristics::Characteristics;
pub use cursor::{RecoverIterator, ResilientCursor};
pub use recover::{Emit, Propagate, Recover, Skip, Substitute};
pub use seq::SeqIter;
pub use source::SplitSource;
pub use split::ResilientSplit;
