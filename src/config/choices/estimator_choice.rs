use crate::core::Value as Cell;
use crate::sketches::{DEFAULT_PRECISION, DEFAULT_SEED, MAX_PRECISION, MIN_PRECISION};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_precision() -> u8 {
    DEFAULT_PRECISION
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(EstimatorKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum EstimatorChoice {
    #[strum_discriminants(strum(
        message = "Running Mean",
        detailed_message = "Mean of one numeric field over every row seen so far."
    ))]
    RunningMean(RunningMeanParameters),
    #[strum_discriminants(strum(
        message = "Filtered Mean",
        detailed_message = "Mean of a numeric field over rows matching an equality filter."
    ))]
    FilteredMean(FilteredMeanParameters),
    #[strum_discriminants(strum(
        message = "Grouped Mean",
        detailed_message = "Per-group mean of a numeric field."
    ))]
    GroupedMean(GroupedMeanParameters),
    #[strum_discriminants(strum(
        message = "Grouped Sum",
        detailed_message = "Per-group sum scaled up to the full row count."
    ))]
    GroupedSum(GroupedSumParameters),
    #[strum_discriminants(strum(
        message = "Grouped Count",
        detailed_message = "Per-group row count scaled up to the full row count."
    ))]
    GroupedCount(GroupedCountParameters),
    #[strum_discriminants(strum(
        message = "Filtered Distinct",
        detailed_message = "Approximate distinct values among filtered rows (HyperLogLog)."
    ))]
    FilteredDistinct(FilteredDistinctParameters),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RunningMeanParameters {
    #[schemars(title = "Target field", description = "Numeric field to average")]
    pub target_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FilteredMeanParameters {
    #[schemars(title = "Filter field", description = "Field compared against the filter value")]
    pub filter_field: String,
    #[schemars(title = "Filter value", description = "Rows are kept when the filter field equals this value")]
    pub filter_value: Cell,
    #[schemars(title = "Target field", description = "Numeric field to average")]
    pub target_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GroupedMeanParameters {
    #[schemars(title = "Group-by field")]
    pub groupby_field: String,
    #[schemars(title = "Target field", description = "Numeric field to average per group")]
    pub target_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GroupedSumParameters {
    #[schemars(
        title = "Original row count",
        description = "Rows in the full dataset, used to scale partial sums",
        range(min = 1)
    )]
    pub original_row_count: u64,
    #[schemars(title = "Group-by field")]
    pub groupby_field: String,
    #[schemars(title = "Sum field", description = "Numeric field to sum per group")]
    pub sum_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GroupedCountParameters {
    #[schemars(
        title = "Original row count",
        description = "Rows in the full dataset, used to scale partial counts",
        range(min = 1)
    )]
    pub original_row_count: u64,
    #[schemars(title = "Group-by field")]
    pub groupby_field: String,
    #[serde(default)]
    #[schemars(
        title = "Count field",
        description = "Count only rows where this field is present (None = count rows)"
    )]
    pub count_field: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FilteredDistinctParameters {
    #[schemars(title = "Filter field")]
    pub filter_field: String,
    #[schemars(title = "Filter value")]
    pub filter_value: Cell,
    #[schemars(title = "Distinct field", description = "Field whose distinct values are counted")]
    pub distinct_field: String,

    #[serde(default = "default_precision")]
    #[schemars(
        title = "Sketch precision",
        description = "HyperLogLog uses 2^precision registers",
        range(min = MIN_PRECISION, max = MAX_PRECISION),
        default = "default_precision"
    )]
    pub precision: u8,

    #[serde(default = "default_seed")]
    #[schemars(title = "Hash seed", default = "default_seed")]
    pub seed: u64,
}
