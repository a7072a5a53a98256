use crate::core::io::star::StarTable;
use crate::core::models::subparticle::SubparticleArray;
use crate::engine::builder::{self, ZRange};
use crate::engine::config::AssessConfig;
use crate::engine::correlation::{self, CorrelationReport};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct AssessmentResult {
    pub subparticles: SubparticleArray,
    pub z_range: ZRange,
    pub report: CorrelationReport,
}

#[instrument(skip_all, name = "assess_workflow")]
pub fn run(
    pentavalent: &StarTable,
    hexavalent: &StarTable,
    config: &AssessConfig,
    reporter: &ProgressReporter,
) -> Result<AssessmentResult, EngineError> {
    // === Phase 1: Merge both capsomer tables ===
    reporter.report(Progress::PhaseStart {
        name: "Building subparticle array",
    });
    let (subparticles, z_range) = builder::build(pentavalent, hexavalent, config.z_extent)?;
    reporter.report(Progress::Message(format!(
        "{} subparticles, relative z from {} to {}",
        subparticles.len(),
        z_range.min,
        z_range.max
    )));
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Equatorial correlation ===
    reporter.report(Progress::PhaseStart {
        name: "Correlating capsomers",
    });
    let report = correlation::correlate(&subparticles, z_range.max, &config.correlation, reporter);
    reporter.report(Progress::PhaseFinish);

    info!(
        "Assessment complete: {} report line(s) for {} particle(s).",
        report.lines.len(),
        report.particles_analyzed
    );
    Ok(AssessmentResult {
        subparticles,
        z_range,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::columns::*;
    use crate::engine::config::AssessConfigBuilder;
    use std::sync::Mutex;

    fn table(rows: usize, vertex: &str) -> StarTable {
        let mut table = StarTable::new([
            ORIGIN_X_PRIOR,
            ORIGIN_Y_PRIOR,
            ORIGIN_X,
            ORIGIN_Y,
            RELATIVE_XYZ,
            VERTEX_GROUP,
            IMAGE_ORIGINAL_NAME,
        ])
        .unwrap();
        for i in 0..rows {
            table
                .push_row(vec![
                    "0".into(),
                    "0".into(),
                    "0".into(),
                    "0".into(),
                    format!("{},0,{}", i, i % 2),
                    vertex.into(),
                    "particle.mrc".into(),
                ])
                .unwrap();
        }
        table
    }

    #[test]
    fn run_reports_phases_and_returns_report() {
        let pent = table(12, "5f01");
        let hex = table(60, "5f01a.3f01a.2f01a");
        let config = AssessConfigBuilder::new()
            .inclusion_threshold(0.9)
            .build()
            .unwrap();
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));

        let result = run(&pent, &hex, &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(result.subparticles.len(), 72);
        assert_eq!(result.z_range.max, 1.0);
        assert_eq!(result.report.lines.len(), 1);
        assert_eq!(result.report.lines[0].distances.ideal_2d, 59.0);
        assert_eq!(
            phases.into_inner().unwrap(),
            vec!["Building subparticle array", "Correlating capsomers"]
        );
    }

    #[test]
    fn run_fails_before_correlation_on_count_mismatch() {
        let pent = table(12, "5f01");
        let hex = table(59, "5f01a.3f01a.2f01a");
        let config = AssessConfigBuilder::new()
            .inclusion_threshold(0.9)
            .build()
            .unwrap();
        let result = run(&pent, &hex, &config, &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::ParticleCountMismatch { .. })
        ));
    }
}
