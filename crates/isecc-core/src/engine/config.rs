use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_INCLUSION_THRESHOLD: f64 = 0.9;
pub const DEFAULT_CENTRAL_SLICE_LIMIT: f64 = 1.05;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Parameter '{name}' must be {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Which records the relative-Z extent is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZExtent {
    /// Max/min over the fully populated array.
    #[default]
    AllRecords,
    /// Legacy behavior: measured while only pentavalent records are populated, so each
    /// hexavalent slot contributes a zero placeholder.
    PentavalentOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationConfig {
    /// Fraction of the particle radius reported as the vertex inclusion threshold.
    pub inclusion_threshold: f64,
    /// Multiplier on the maximum relative Z that bounds the equatorial band.
    pub central_slice_limit: f64,
    /// Whether a reference capsomer is also compared against itself.
    pub self_comparison: bool,
    /// Skip capsomers already used as the far end of a new maximum when picking references.
    pub exclude_consumed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessConfig {
    pub z_extent: ZExtent,
    pub correlation: CorrelationConfig,
}

#[derive(Default)]
pub struct AssessConfigBuilder {
    inclusion_threshold: Option<f64>,
    central_slice_limit: Option<f64>,
    self_comparison: Option<bool>,
    exclude_consumed: Option<bool>,
    z_extent: Option<ZExtent>,
}

impl AssessConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inclusion_threshold(mut self, threshold: f64) -> Self {
        self.inclusion_threshold = Some(threshold);
        self
    }
    pub fn central_slice_limit(mut self, limit: f64) -> Self {
        self.central_slice_limit = Some(limit);
        self
    }
    pub fn self_comparison(mut self, enabled: bool) -> Self {
        self.self_comparison = Some(enabled);
        self
    }
    pub fn exclude_consumed(mut self, enabled: bool) -> Self {
        self.exclude_consumed = Some(enabled);
        self
    }
    pub fn z_extent(mut self, extent: ZExtent) -> Self {
        self.z_extent = Some(extent);
        self
    }

    pub fn build(self) -> Result<AssessConfig, ConfigError> {
        let inclusion_threshold = self
            .inclusion_threshold
            .ok_or(ConfigError::MissingParameter("inclusion_threshold"))?;
        if !(inclusion_threshold > 0.0 && inclusion_threshold <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "inclusion_threshold",
                value: inclusion_threshold,
                expected: "in (0, 1]",
            });
        }

        let central_slice_limit = self
            .central_slice_limit
            .unwrap_or(DEFAULT_CENTRAL_SLICE_LIMIT);
        if !(central_slice_limit > 0.0 && central_slice_limit.is_finite()) {
            return Err(ConfigError::OutOfRange {
                name: "central_slice_limit",
                value: central_slice_limit,
                expected: "a positive finite number",
            });
        }

        Ok(AssessConfig {
            z_extent: self.z_extent.unwrap_or_default(),
            correlation: CorrelationConfig {
                inclusion_threshold,
                central_slice_limit,
                self_comparison: self.self_comparison.unwrap_or(true),
                exclude_consumed: self.exclude_consumed.unwrap_or(false),
            },
        })
    }
}
