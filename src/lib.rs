pub mod config;
pub mod core;
pub mod error;
pub mod estimators;
pub mod sinks;
pub mod sketches;
pub mod streams;
pub mod tasks;

pub use error::OlaError;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
