use crate::cli::Cli;
use crate::error::{CliError, Result};
use isecc::engine::config::{self as core_config, DEFAULT_INCLUSION_THRESHOLD, ZExtent};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialAnalysisConfig {
    inclusion_threshold: Option<f64>,
    central_slice_limit: Option<f64>,
    z_extent: Option<ZExtent>,
    self_comparison: Option<bool>,
    exclude_consumed: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialAssessConfig {
    analysis: Option<PartialAnalysisConfig>,
}

impl PartialAssessConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Command-line values win over file values, which win over the built-in defaults.
    pub fn merge_with_cli(self, args: &Cli) -> Result<core_config::AssessConfig> {
        let analysis = self.analysis.unwrap_or_default();

        let threshold = args
            .threshold
            .or(analysis.inclusion_threshold)
            .unwrap_or(DEFAULT_INCLUSION_THRESHOLD);

        let mut builder = core_config::AssessConfigBuilder::new().inclusion_threshold(threshold);
        if let Some(limit) = analysis.central_slice_limit {
            builder = builder.central_slice_limit(limit);
        }
        if let Some(extent) = analysis.z_extent {
            builder = builder.z_extent(extent);
        }
        if let Some(enabled) = analysis.self_comparison {
            builder = builder.self_comparison(enabled);
        }
        if let Some(enabled) = analysis.exclude_consumed {
            builder = builder.exclude_consumed(enabled);
        }

        let config = builder.build()?;
        debug!("Final assessment configuration: {:?}", config);
        Ok(config)
    }
}
