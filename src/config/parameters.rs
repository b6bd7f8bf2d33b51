use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_sigma() -> f64 {
    1.0
}

fn default_grid_points() -> usize {
    101
}

fn default_high() -> f64 {
    1.0
}

fn default_sample_frequency() -> u64 {
    1000
}

fn default_repetitions() -> usize {
    1
}

fn default_lower_percentile() -> f64 {
    2.5
}

fn default_upper_percentile() -> f64 {
    97.5
}

fn default_realizations() -> usize {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FieldParameters {
    #[schemars(
        title = "Truncation Dimension",
        description = "Number of expansion modes d kept in the random field",
        range(min = 1)
    )]
    pub dimension: usize,

    #[serde(default = "default_sigma")]
    #[schemars(
        title = "Sigma",
        description = "Scale of the field (> 0)"
    )]
    pub sigma: f64,

    #[serde(default = "default_grid_points")]
    #[schemars(
        title = "Grid Points",
        description = "Equally spaced evaluation points on [0, 1]",
        range(min = 1)
    )]
    pub grid_points: usize,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UniformParameters {
    #[serde(default)]
    #[schemars(title = "Low", description = "Inclusive lower bound")]
    pub low: f64,

    #[serde(default = "default_high")]
    #[schemars(
        title = "High",
        description = "Exclusive upper bound"
    )]
    pub high: f64,

    #[serde(default)]
    #[schemars(
        title = "Max Samples",
        description = "Upper bound on draws; empty = unbounded"
    )]
    pub max_samples: Option<u64>,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed")]
    pub seed: u64,
}

impl Default for UniformParameters {
    fn default() -> Self {
        Self {
            low: 0.0,
            high: default_high(),
            max_samples: None,
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RunParameters {
    #[schemars(
        title = "Max Samples",
        description = "Number of Monte Carlo draws per run"
    )]
    pub max_samples: u64,

    #[serde(default = "default_sample_frequency")]
    #[schemars(
        title = "Sample Frequency",
        description = "Samples between progress snapshots",
        range(min = 1)
    )]
    pub sample_frequency: u64,

    #[serde(default = "default_repetitions")]
    #[schemars(
        title = "Repetitions",
        description = "Independent re-runs of the whole estimator",
        range(min = 1)
    )]
    pub repetitions: usize,

    #[serde(default)]
    #[schemars(
        title = "Confidence",
        description = "Nominal band coverage in (0, 1); empty = two-sigma band"
    )]
    pub confidence: Option<f64>,

    #[serde(default = "default_seed")]
    #[schemars(
        title = "Seed",
        description = "Base seed; repetition r uses seed + r"
    )]
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SummaryParameters {
    #[serde(default = "default_realizations")]
    #[schemars(
        title = "Realizations",
        description = "Number of model evaluations in the batch",
        range(min = 1)
    )]
    pub realizations: usize,

    #[serde(default = "default_lower_percentile")]
    #[schemars(
        title = "Lower Percentile",
        description = "Lower edge of the prediction band (0-100)",
        range(min = 0.0, max = 100.0)
    )]
    pub lower_percentile: f64,

    #[serde(default = "default_upper_percentile")]
    #[schemars(
        title = "Upper Percentile",
        description = "Upper edge of the prediction band (0-100)",
        range(min = 0.0, max = 100.0)
    )]
    pub upper_percentile: f64,

    #[serde(default)]
    #[schemars(
        title = "Threshold",
        description = "Report the probability of exceeding this value at every position"
    )]
    pub threshold: Option<f64>,
}

impl Default for SummaryParameters {
    fn default() -> Self {
        Self {
            realizations: default_realizations(),
            lower_percentile: default_lower_percentile(),
            upper_percentile: default_upper_percentile(),
            threshold: None,
        }
    }
}
