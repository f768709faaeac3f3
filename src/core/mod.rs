pub mod attributes;
pub mod group_key;
pub mod record;
pub mod slice;
pub mod slice_header;
pub mod value;

pub use group_key::GroupKey;
pub use record::Record;
pub use slice::Slice;
pub use slice_header::SliceHeader;
pub use value::Value;
