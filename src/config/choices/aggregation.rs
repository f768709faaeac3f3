use crate::config::build::BuildError;
use crate::config::choices::EstimatorChoice;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn default_sample_frequency() -> u64 {
    1
}

/// Everything needed to drive one online aggregation run, apart from the
/// data source and the sink.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AggregationParameters {
    #[schemars(skip)]
    pub estimator: EstimatorChoice,

    #[serde(default)]
    #[schemars(
        title = "Max Slices",
        description = "Stop after this many slices (None = until the source is exhausted)"
    )]
    pub max_slices: Option<u64>,

    #[serde(default = "default_sample_frequency")]
    #[schemars(
        title = "Sample Frequency",
        description = "Record a snapshot every N slices",
        range(min = 1),
        default = "default_sample_frequency"
    )]
    pub sample_frequency: u64,
}

impl AggregationParameters {
    pub fn new(estimator: EstimatorChoice) -> Self {
        Self {
            estimator,
            max_slices: None,
            sample_frequency: default_sample_frequency(),
        }
    }

    /// Reads parameters from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BuildError> {
        let reader = BufReader::new(File::open(path)?);
        let params: Self = serde_json::from_reader(reader)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.sample_frequency == 0 {
            return Err(BuildError::InvalidParameter(
                "sample_frequency must be >= 1".into(),
            ));
        }
        if self.max_slices == Some(0) {
            return Err(BuildError::InvalidParameter(
                "max_slices must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}
