mod meta;
#[allow(clippy::module_inception)]
mod sequence;
mod step;
mod store;

pub use {
    meta::{MAX_REPEATS, SequenceMeta},
    sequence::Sequence,
    step::{MouseButton, Step},
    store::{SequenceEntry, SequenceStore},
};
