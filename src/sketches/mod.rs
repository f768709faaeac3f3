mod hyperloglog;

pub use hyperloglog::{DEFAULT_PRECISION, DEFAULT_SEED, HyperLogLog, MAX_PRECISION, MIN_PRECISION};
