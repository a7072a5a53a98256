use crate::core::models::subparticle::{SubparticleArray, SubparticleRecord};
use std::collections::HashMap;

/// All capsomer records belonging to one physical particle.
#[derive(Debug, Clone)]
pub struct ParticleGroup<'a> {
    /// Position of the particle in first-appearance order.
    pub ordinal: usize,
    pub specifier: &'a str,
    pub members: Vec<&'a SubparticleRecord>,
}

impl ParticleGroup<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partitions the array by particle specifier, ordering groups by first appearance.
pub fn group_by_particle(array: &SubparticleArray) -> Vec<ParticleGroup<'_>> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ParticleGroup<'_>> = Vec::new();

    for record in array {
        let specifier = record.particle_specifier.as_str();
        let slot = *slots.entry(specifier).or_insert_with(|| {
            groups.push(ParticleGroup {
                ordinal: groups.len(),
                specifier,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(record);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::subparticle::SubparticleType;
    use crate::core::models::vertex::{VertexAssignment, VertexTier};
    use nalgebra::{Point3, Vector2};

    fn record(specifier: &str, kind: SubparticleType, x: f64) -> SubparticleRecord {
        SubparticleRecord {
            particle_specifier: specifier.to_string(),
            subparticle_type: kind,
            vertex: VertexAssignment {
                five_fold: VertexTier {
                    general: 1,
                    specific: None,
                },
                three_fold: None,
                two_fold: None,
            },
            origin_icos: Vector2::zeros(),
            origin_local: Vector2::zeros(),
            relative_xyz: Point3::new(x, 0.0, 0.0),
        }
    }

    fn array() -> SubparticleArray {
        use SubparticleType::*;
        SubparticleArray::from_parts(
            vec![
                record("Y", Pentavalent, 0.0),
                record("X", Pentavalent, 1.0),
                record("Y", Pentavalent, 2.0),
            ],
            vec![
                record("X", Hexavalent, 3.0),
                record("Z", Hexavalent, 4.0),
                record("X", Hexavalent, 5.0),
            ],
        )
    }

    #[test]
    fn groups_follow_first_appearance_order() {
        let array = array();
        let groups = group_by_particle(&array);
        let names: Vec<_> = groups.iter().map(|g| g.specifier).collect();
        assert_eq!(names, vec!["Y", "X", "Z"]);
        assert_eq!(
            groups.iter().map(|g| g.ordinal).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn group_contains_exactly_the_records_sharing_a_specifier() {
        let array = array();
        let groups = group_by_particle(&array);
        let x = groups.iter().find(|g| g.specifier == "X").unwrap();
        assert_eq!(x.len(), 3);
        assert!(x.members.iter().all(|r| r.particle_specifier == "X"));
        let xs: Vec<f64> = x.members.iter().map(|r| r.relative_xyz.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn groups_are_disjoint_and_cover_the_array() {
        let array = array();
        let groups = group_by_particle(&array);
        let total: usize = groups.iter().map(ParticleGroup::len).sum();
        assert_eq!(total, array.len());

        let mut seen: Vec<*const SubparticleRecord> = groups
            .iter()
            .flat_map(|g| g.members.iter().map(|r| *r as *const _))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), array.len());
    }
}
