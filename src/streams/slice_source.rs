use crate::OlaError;
use crate::core::{Slice, SliceHeader};

/// Pull-based producer of row slices.
///
/// Implementations may represent finite datasets or samples of them. Every
/// slice yielded must carry the same, immutable [`SliceHeader`], and slices
/// must be disjoint.
pub trait SliceSource: Send {
    /// Returns the schema shared by every slice.
    fn header(&self) -> &SliceHeader;

    /// Indicates whether the source *may* produce more slices.
    ///
    /// If it returns `false`, a subsequent call to
    /// [`next_slice`](Self::next_slice) must return `None`.
    fn has_more_slices(&self) -> bool;

    /// Produces the next slice, or `None` once the source is exhausted.
    fn next_slice(&mut self) -> Option<Slice>;

    /// Rewinds the source to its initial state. Seeded sources replay the
    /// same slices.
    fn restart(&mut self) -> Result<(), OlaError>;

    /// Number of rows of the dataset before sampling, when known. This is
    /// the `original_row_count` scaled estimators need.
    fn original_row_count(&self) -> Option<u64>;
}
