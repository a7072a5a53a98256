use super::vertex::VertexAssignment;
use crate::core::utils::geometry;
use nalgebra::{Point2, Point3, Vector2};
use std::fmt;
use std::ops::Index;

/// Capsomer species, named after the coordination of the vertex it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubparticleType {
    Pentavalent,
    Hexavalent,
}

impl SubparticleType {
    /// Number of capsomers of this species on one icosahedral particle.
    pub const fn per_particle(self) -> usize {
        match self {
            SubparticleType::Pentavalent => 12,
            SubparticleType::Hexavalent => 60,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SubparticleType::Pentavalent => "pentavalent",
            SubparticleType::Hexavalent => "hexavalent",
        }
    }
}

impl fmt::Display for SubparticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One capsomer instance read from a subparticle table.
#[derive(Debug, Clone, PartialEq)]
pub struct SubparticleRecord {
    pub particle_specifier: String,
    pub subparticle_type: SubparticleType,
    pub vertex: VertexAssignment,
    /// Offset from the icosahedral (prior) refinement, in Angstroms.
    pub origin_icos: Vector2<f64>,
    /// Offset after local refinement, in Angstroms.
    pub origin_local: Vector2<f64>,
    /// Capsomer position relative to the particle center in the symmetry frame.
    pub relative_xyz: Point3<f64>,
}

impl SubparticleRecord {
    pub fn relative_z(&self) -> f64 {
        self.relative_xyz.z
    }

    /// Shift applied by local refinement on top of the icosahedral prior.
    pub fn refinement_delta(&self) -> Vector2<f64> {
        self.origin_local - self.origin_icos
    }

    /// Approximate in-plane position after local refinement.
    pub fn refined_xy(&self) -> Point2<f64> {
        geometry::refined_xy(&self.relative_xyz, &self.origin_icos, &self.origin_local)
    }
}

/// All capsomer records of a run: pentavalent records first, then hexavalent, each block in
/// source table order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubparticleArray {
    records: Vec<SubparticleRecord>,
    pentavalent_count: usize,
}

impl SubparticleArray {
    pub(crate) fn from_parts(
        pentavalent: Vec<SubparticleRecord>,
        hexavalent: Vec<SubparticleRecord>,
    ) -> Self {
        let pentavalent_count = pentavalent.len();
        let mut records = pentavalent;
        records.extend(hexavalent);
        Self {
            records,
            pentavalent_count,
        }
    }

    pub fn records(&self) -> &[SubparticleRecord] {
        &self.records
    }

    pub fn pentavalent(&self) -> &[SubparticleRecord] {
        &self.records[..self.pentavalent_count]
    }

    pub fn hexavalent(&self) -> &[SubparticleRecord] {
        &self.records[self.pentavalent_count..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubparticleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Index<usize> for SubparticleArray {
    type Output = SubparticleRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a SubparticleArray {
    type Item = &'a SubparticleRecord;
    type IntoIter = std::slice::Iter<'a, SubparticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
