mod sampled_source;
mod slice_source;
mod vec_source;

pub use sampled_source::SampledSliceSource;
pub use slice_source::SliceSource;
pub use vec_source::VecSliceSource;
