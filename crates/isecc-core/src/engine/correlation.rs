use super::config::CorrelationConfig;
use super::grouping::{ParticleGroup, group_by_particle};
use super::progress::{Progress, ProgressReporter};
use crate::core::models::subparticle::{SubparticleArray, SubparticleRecord};
use crate::core::utils::geometry::{self, round_to};
use std::fmt;
use tracing::{debug, info};

const REPORT_DECIMALS: i32 = 2;

/// Z limits derived from the maximum relative Z of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// `inclusion_threshold * max_z`; reported only, it does not select capsomers.
    pub z_threshold: f64,
    pub central_slice_limit: f64,
    /// Half-width of the equatorial band.
    pub central_slice_threshold: f64,
}

impl Thresholds {
    pub fn derive(max_z: f64, config: &CorrelationConfig) -> Self {
        Self {
            z_threshold: round_to(config.inclusion_threshold * max_z, REPORT_DECIMALS),
            central_slice_limit: config.central_slice_limit,
            central_slice_threshold: round_to(
                config.central_slice_limit * max_z,
                REPORT_DECIMALS,
            ),
        }
    }

    /// Open interval test against the equatorial band.
    pub fn in_central_slice(&self, z: f64) -> bool {
        -self.central_slice_threshold < z && z < self.central_slice_threshold
    }
}

/// Distances between two capsomers in the symmetry frame and after local refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairDistances {
    pub ideal_3d: f64,
    /// Ideal distance with both positions flattened onto the XY plane.
    pub ideal_2d: f64,
    /// Flattened distance between the locally refined positions.
    pub refined_2d: f64,
}

impl PairDistances {
    pub fn between(reference: &SubparticleRecord, compare: &SubparticleRecord) -> Self {
        Self {
            ideal_3d: geometry::distance_3d(&reference.relative_xyz, &compare.relative_xyz),
            ideal_2d: geometry::flattened_distance(&reference.relative_xyz, &compare.relative_xyz),
            refined_2d: geometry::planar_distance(&reference.refined_xy(), &compare.refined_xy()),
        }
    }

    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            ideal_3d: round_to(self.ideal_3d, decimals),
            ideal_2d: round_to(self.ideal_2d, decimals),
            refined_2d: round_to(self.refined_2d, decimals),
        }
    }

    /// Change in flattened span introduced by local refinement.
    pub fn refinement_delta(&self) -> f64 {
        self.refined_2d - self.ideal_2d
    }
}

/// Widest equatorial span of one particle.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationLine {
    pub ordinal: usize,
    pub particle_specifier: String,
    /// Rounded to two decimals.
    pub distances: PairDistances,
}

impl CorrelationLine {
    /// Zero-padded particle label used in console output.
    pub fn label(&self) -> String {
        format!("{:05}", self.ordinal)
    }
}

impl fmt::Display for CorrelationLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {:.2} {:.2}",
            self.distances.ideal_3d, self.distances.ideal_2d, self.distances.refined_2d
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationReport {
    pub thresholds: Thresholds,
    pub particles_analyzed: usize,
    pub lines: Vec<CorrelationLine>,
}

/// Measures the widest equatorial capsomer span of every particle in the array.
///
/// Particles without a capsomer inside the band yield no line.
pub fn correlate(
    array: &SubparticleArray,
    max_z: f64,
    config: &CorrelationConfig,
    reporter: &ProgressReporter,
) -> CorrelationReport {
    let thresholds = Thresholds::derive(max_z, config);
    info!(
        "Inclusion threshold {} of particle radius gives |relative Z| > {}.",
        config.inclusion_threshold, thresholds.z_threshold
    );
    info!(
        "Central plane: {} < relative Z < {} (slice limit {}).",
        -thresholds.central_slice_threshold,
        thresholds.central_slice_threshold,
        thresholds.central_slice_limit
    );

    let groups = group_by_particle(array);
    reporter.report(Progress::ParticlesStart {
        total: groups.len() as u64,
    });

    let mut lines = Vec::new();
    for group in &groups {
        let best = widest_equatorial_pair(group, &thresholds, config);
        if let Some(distances) = best {
            debug!(
                "Particle {:05} ('{}'): {:?}, refinement delta {:.2}",
                group.ordinal,
                group.specifier,
                distances,
                distances.refinement_delta()
            );
            lines.push(CorrelationLine {
                ordinal: group.ordinal,
                particle_specifier: group.specifier.to_string(),
                distances: distances.rounded(REPORT_DECIMALS),
            });
        } else {
            debug!(
                "Particle {:05} ('{}') has no capsomers in the central plane.",
                group.ordinal, group.specifier
            );
        }
        reporter.report(Progress::ParticleDone {
            reported: best.is_some(),
        });
    }
    reporter.report(Progress::ParticlesFinish);

    info!(
        "Reported {} of {} particles.",
        lines.len(),
        groups.len()
    );
    CorrelationReport {
        thresholds,
        particles_analyzed: groups.len(),
        lines,
    }
}

/// Finds the pair with the largest ideal 3-D separation among the capsomers of one particle,
/// taking reference capsomers from the equatorial band only.
///
/// Every in-band capsomer is used as a reference unless `exclude_consumed` is set, in which
/// case a capsomer that became the far end of a new maximum is skipped as a reference.
/// Returns `None` when no reference lies in the band or every separation is zero.
pub fn widest_equatorial_pair(
    group: &ParticleGroup<'_>,
    thresholds: &Thresholds,
    config: &CorrelationConfig,
) -> Option<PairDistances> {
    let members = &group.members;
    let mut consumed = vec![false; members.len()];
    let mut max_diameter = 0.0;
    let mut best = None;

    for (ref_index, reference) in members.iter().enumerate() {
        if consumed[ref_index] || !thresholds.in_central_slice(reference.relative_z()) {
            continue;
        }
        for (cmp_index, compare) in members.iter().enumerate() {
            if !config.self_comparison && cmp_index == ref_index {
                continue;
            }
            let diameter = geometry::distance_3d(&reference.relative_xyz, &compare.relative_xyz);
            if diameter > max_diameter {
                max_diameter = diameter;
                best = Some(PairDistances::between(reference, compare));
                if config.exclude_consumed {
                    consumed[cmp_index] = true;
                }
            }
        }
    }
    best
}
