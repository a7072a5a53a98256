use crate::core::io::star::{StarError, StarTable};

pub const ORIGIN_X_PRIOR: &str = "rlnOriginXPriorAngst";
pub const ORIGIN_Y_PRIOR: &str = "rlnOriginYPriorAngst";
pub const ORIGIN_X: &str = "rlnOriginXAngst";
pub const ORIGIN_Y: &str = "rlnOriginYAngst";
pub const RELATIVE_XYZ: &str = "rlnCustomOriginXYZAngstWrtParticleCenter";
pub const VERTEX_GROUP: &str = "rlnCustomVertexGroup";
pub const IMAGE_NAME: &str = "rlnImageName";
/// The whole-particle image a subparticle was extracted from; shared by every capsomer of
/// one physical particle.
pub const IMAGE_ORIGINAL_NAME: &str = "rlnImageOriginalName";
pub const CUSTOM_UID: &str = "rlnCustomUID";
pub const RELATIVE_POSE: &str = "rlnCustomRelativePose";

/// Column indices of every field the subparticle builder reads from a capsomer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubparticleColumns {
    pub origin_x_prior: usize,
    pub origin_y_prior: usize,
    pub origin_x: usize,
    pub origin_y: usize,
    pub relative_xyz: usize,
    pub vertex_group: usize,
    pub particle_id: usize,
}

impl SubparticleColumns {
    pub fn resolve(table: &StarTable) -> Result<Self, StarError> {
        let find = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| StarError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            origin_x_prior: find(ORIGIN_X_PRIOR)?,
            origin_y_prior: find(ORIGIN_Y_PRIOR)?,
            origin_x: find(ORIGIN_X)?,
            origin_y: find(ORIGIN_Y)?,
            relative_xyz: find(RELATIVE_XYZ)?,
            vertex_group: find(VERTEX_GROUP)?,
            particle_id: find(IMAGE_ORIGINAL_NAME)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_finds_columns_regardless_of_declaration_order() {
        let table = StarTable::new([
            IMAGE_NAME,
            IMAGE_ORIGINAL_NAME,
            VERTEX_GROUP,
            RELATIVE_XYZ,
            ORIGIN_Y,
            ORIGIN_X,
            ORIGIN_Y_PRIOR,
            ORIGIN_X_PRIOR,
        ])
        .unwrap();

        let columns = SubparticleColumns::resolve(&table).unwrap();
        assert_eq!(columns.particle_id, 1);
        assert_eq!(columns.vertex_group, 2);
        assert_eq!(columns.relative_xyz, 3);
        assert_eq!(columns.origin_y, 4);
        assert_eq!(columns.origin_x, 5);
        assert_eq!(columns.origin_y_prior, 6);
        assert_eq!(columns.origin_x_prior, 7);
    }

    #[test]
    fn resolve_names_the_first_missing_column() {
        let table = StarTable::new([ORIGIN_X_PRIOR, ORIGIN_Y_PRIOR, ORIGIN_X]).unwrap();
        let err = SubparticleColumns::resolve(&table).unwrap_err();
        assert!(matches!(err, StarError::MissingColumn(name) if name == ORIGIN_Y));
    }
}
