use super::config::ZExtent;
use super::error::EngineError;
use crate::core::io::columns::{self, SubparticleColumns};
use crate::core::io::star::StarTable;
use crate::core::models::subparticle::{SubparticleArray, SubparticleRecord, SubparticleType};
use crate::core::models::vertex::{self, VertexAssignment, VertexDecodeError};
use nalgebra::{Point3, Vector2};
use std::iter;
use tracing::{debug, info};

/// Relative-Z extent of the capsomers, used to place the equatorial band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZRange {
    pub min: f64,
    pub max: f64,
}

impl ZRange {
    fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |range, z| {
            Some(match range {
                None => ZRange { min: z, max: z },
                Some(ZRange { min, max }) => ZRange {
                    min: min.min(z),
                    max: max.max(z),
                },
            })
        })
    }
}

/// Merges the pentavalent and hexavalent capsomer tables into one subparticle array.
///
/// Pentavalent records occupy the first `pentavalent.len()` positions, hexavalent records
/// follow; each block keeps its table order.
///
/// # Errors
///
/// Fails before reading any record when the two tables imply different particle counts,
/// and afterwards on a missing column, a malformed number or an undecodable vertex code.
pub fn build(
    pentavalent: &StarTable,
    hexavalent: &StarTable,
    z_extent: ZExtent,
) -> Result<(SubparticleArray, ZRange), EngineError> {
    let particles = check_particle_counts(pentavalent.len(), hexavalent.len())?;
    info!(
        "Building subparticle array for {} particles ({} pentavalent + {} hexavalent rows).",
        particles,
        pentavalent.len(),
        hexavalent.len()
    );

    info!("Adding all pentavalent capsomers into subparticle array.");
    let pent_records = read_records(pentavalent, SubparticleType::Pentavalent)?;

    info!("Adding all hexavalent capsomers into subparticle array.");
    let hex_records = read_records(hexavalent, SubparticleType::Hexavalent)?;

    let z_range = match z_extent {
        ZExtent::AllRecords => ZRange::from_values(
            pent_records
                .iter()
                .chain(hex_records.iter())
                .map(SubparticleRecord::relative_z),
        ),
        ZExtent::PentavalentOnly => ZRange::from_values(
            pent_records
                .iter()
                .map(SubparticleRecord::relative_z)
                .chain(iter::repeat_n(0.0, hex_records.len())),
        ),
    }
    .ok_or(EngineError::EmptyInput)?;
    info!(
        "Relative z range is from {} to {} ({:?}).",
        z_range.min, z_range.max, z_extent
    );

    Ok((SubparticleArray::from_parts(pent_records, hex_records), z_range))
}

/// Returns the particle count shared by both tables.
fn check_particle_counts(
    pentavalent_rows: usize,
    hexavalent_rows: usize,
) -> Result<usize, EngineError> {
    let pentavalent_particles =
        pentavalent_rows as f64 / SubparticleType::Pentavalent.per_particle() as f64;
    let hexavalent_particles =
        hexavalent_rows as f64 / SubparticleType::Hexavalent.per_particle() as f64;

    if pentavalent_particles != hexavalent_particles {
        return Err(EngineError::ParticleCountMismatch {
            pentavalent_rows,
            hexavalent_rows,
            pentavalent_particles,
            hexavalent_particles,
        });
    }
    Ok(pentavalent_particles as usize)
}

fn read_records(
    table: &StarTable,
    class: SubparticleType,
) -> Result<Vec<SubparticleRecord>, EngineError> {
    let columns = SubparticleColumns::resolve(table)
        .map_err(|source| EngineError::Table { class, source })?;

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| read_record(row, index + 1, &columns, class))
        .collect()
}

fn read_record(
    row: &[String],
    row_number: usize,
    columns: &SubparticleColumns,
    class: SubparticleType,
) -> Result<SubparticleRecord, EngineError> {
    let float = |index: usize, column: &'static str| {
        let token = &row[index];
        token.parse::<f64>().map_err(|_| EngineError::InvalidField {
            class,
            row: row_number,
            column,
            value: token.clone(),
        })
    };

    let xyz_token = &row[columns.relative_xyz];
    let relative_xyz = parse_relative_xyz(xyz_token).ok_or_else(|| EngineError::InvalidField {
        class,
        row: row_number,
        column: columns::RELATIVE_XYZ,
        value: xyz_token.clone(),
    })?;

    let vertex = decode_vertex(&row[columns.vertex_group], class).map_err(|source| {
        EngineError::VertexGroup {
            class,
            row: row_number,
            source,
        }
    })?;

    let record = SubparticleRecord {
        particle_specifier: row[columns.particle_id].clone(),
        subparticle_type: class,
        vertex,
        origin_icos: Vector2::new(
            float(columns.origin_x_prior, columns::ORIGIN_X_PRIOR)?,
            float(columns.origin_y_prior, columns::ORIGIN_Y_PRIOR)?,
        ),
        origin_local: Vector2::new(
            float(columns.origin_x, columns::ORIGIN_X)?,
            float(columns.origin_y, columns::ORIGIN_Y)?,
        ),
        relative_xyz,
    };
    debug!(
        "{} row {}: particle '{}', vertex {}",
        class, row_number, record.particle_specifier, record.vertex.five_fold
    );
    Ok(record)
}

fn decode_vertex(
    code: &str,
    class: SubparticleType,
) -> Result<VertexAssignment, VertexDecodeError> {
    match class {
        SubparticleType::Pentavalent => vertex::decode_pentavalent(code),
        SubparticleType::Hexavalent => vertex::decode_hexavalent(code),
    }
}

/// Parses an `x,y,z` token.
fn parse_relative_xyz(token: &str) -> Option<Point3<f64>> {
    let mut parts = token.split(',').map(|part| part.trim().parse::<f64>());
    let (x, y, z) = (parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?);
    if parts.next().is_some() {
        return None;
    }
    Some(Point3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::columns::*;
    use crate::core::io::star::StarError;

    const FIELDS: [&str; 8] = [
        IMAGE_NAME,
        ORIGIN_X_PRIOR,
        ORIGIN_Y_PRIOR,
        ORIGIN_X,
        ORIGIN_Y,
        RELATIVE_XYZ,
        VERTEX_GROUP,
        IMAGE_ORIGINAL_NAME,
    ];

    fn table(class: SubparticleType, particles: usize, z_of: impl Fn(usize) -> f64) -> StarTable {
        let mut table = StarTable::new(FIELDS).unwrap();
        let per = class.per_particle();
        for p in 0..particles {
            for i in 0..per {
                let vertex = match class {
                    SubparticleType::Pentavalent => format!("5f{:02}", i + 1),
                    SubparticleType::Hexavalent => {
                        format!("5f{:02}a.3f{:02}b.2f{:02}c", i / 5 + 1, i % 20 + 1, i % 30 + 1)
                    }
                };
                let row = vec![
                    format!("{:06}@{}.mrcs", i + 1, class),
                    "1.0".into(),
                    "2.0".into(),
                    "1.5".into(),
                    "2.5".into(),
                    format!("{},{},{}", i, p, z_of(p * per + i)),
                    vertex,
                    format!("particle{:03}.mrc", p),
                ];
                table.push_row(row).unwrap();
            }
        }
        table
    }

    #[test]
    fn build_concatenates_pentavalent_then_hexavalent_in_row_order() {
        let pent = table(SubparticleType::Pentavalent, 2, |_| 1.0);
        let hex = table(SubparticleType::Hexavalent, 2, |_| 2.0);

        let (array, _) = build(&pent, &hex, ZExtent::AllRecords).unwrap();

        assert_eq!(array.len(), 24 + 120);
        assert!(array.pentavalent().iter().all(|r| r.subparticle_type == SubparticleType::Pentavalent));
        assert!(array.hexavalent().iter().all(|r| r.subparticle_type == SubparticleType::Hexavalent));
        assert_eq!(array.pentavalent().len(), 24);
        // Second particle's first pentavalent row.
        assert_eq!(array[12].particle_specifier, "particle001.mrc");
        assert_eq!(array[12].relative_xyz, Point3::new(0.0, 1.0, 1.0));
        assert_eq!(array[24].particle_specifier, "particle000.mrc");
        assert_eq!(array[24 + 59].relative_xyz.x, 59.0);
    }

    #[test]
    fn build_reads_offsets_and_decodes_vertices_per_class() {
        let pent = table(SubparticleType::Pentavalent, 1, |_| 0.0);
        let hex = table(SubparticleType::Hexavalent, 1, |_| 0.0);
        let (array, _) = build(&pent, &hex, ZExtent::AllRecords).unwrap();

        let first = &array[0];
        assert_eq!(first.origin_icos, Vector2::new(1.0, 2.0));
        assert_eq!(first.origin_local, Vector2::new(1.5, 2.5));
        assert_eq!(first.vertex.five_fold.general, 1);
        assert_eq!(first.vertex.five_fold.specific, None);
        assert!(first.vertex.three_fold.is_none());

        let hex_rec = &array[12 + 7];
        assert_eq!(hex_rec.vertex.five_fold.general, 2);
        assert_eq!(hex_rec.vertex.five_fold.specific, Some('a'));
        assert_eq!(hex_rec.vertex.three_fold.unwrap().general, 8);
        assert_eq!(hex_rec.vertex.two_fold.unwrap().specific, Some('c'));
    }

    #[test]
    fn build_aborts_on_particle_count_mismatch() {
        let pent = table(SubparticleType::Pentavalent, 10, |_| 0.0);
        let hex = table(SubparticleType::Hexavalent, 11, |_| 0.0);

        let err = build(&pent, &hex, ZExtent::AllRecords).unwrap_err();
        match err {
            EngineError::ParticleCountMismatch {
                pentavalent_rows,
                hexavalent_rows,
                pentavalent_particles,
                hexavalent_particles,
            } => {
                assert_eq!(pentavalent_rows, 120);
                assert_eq!(hexavalent_rows, 660);
                assert_eq!(pentavalent_particles, 10.0);
                assert_eq!(hexavalent_particles, 11.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn check_particle_counts_compares_fractional_particle_numbers() {
        assert_eq!(check_particle_counts(24, 120).unwrap(), 2);
        assert!(check_particle_counts(13, 60).is_err());
        assert_eq!(check_particle_counts(0, 0).unwrap(), 0);
    }

    #[test]
    fn z_range_covers_every_record_by_default() {
        let pent = table(SubparticleType::Pentavalent, 1, |i| i as f64);
        let hex = table(SubparticleType::Hexavalent, 1, |i| -100.0 + i as f64 * 5.0);

        let (_, z_range) = build(&pent, &hex, ZExtent::AllRecords).unwrap();
        assert_eq!(z_range.min, -100.0);
        assert_eq!(z_range.max, 195.0);
    }

    #[test]
    fn pentavalent_only_extent_includes_placeholder_zeros() {
        let pent = table(SubparticleType::Pentavalent, 1, |i| -50.0 - i as f64);
        let hex = table(SubparticleType::Hexavalent, 1, |_| 400.0);

        let (_, z_range) = build(&pent, &hex, ZExtent::PentavalentOnly).unwrap();
        assert_eq!(z_range.min, -61.0);
        assert_eq!(z_range.max, 0.0);
    }

    #[test]
    fn build_rejects_empty_tables() {
        let pent = StarTable::new(FIELDS).unwrap();
        let hex = StarTable::new(FIELDS).unwrap();
        assert!(matches!(
            build(&pent, &hex, ZExtent::AllRecords),
            Err(EngineError::EmptyInput)
        ));
    }

    #[test]
    fn build_reports_missing_column_with_class() {
        let pent = StarTable::new(FIELDS[..7].iter().copied()).unwrap();
        let hex = StarTable::new(FIELDS).unwrap();
        let err = build(&pent, &hex, ZExtent::AllRecords).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Table {
                class: SubparticleType::Pentavalent,
                source: StarError::MissingColumn(ref name),
            } if name == IMAGE_ORIGINAL_NAME
        ));
    }

    #[test]
    fn build_reports_malformed_fields_with_row_numbers() {
        let mut pent = table(SubparticleType::Pentavalent, 1, |_| 0.0);
        let hex = table(SubparticleType::Hexavalent, 1, |_| 0.0);
        let mut rows: Vec<Vec<String>> = pent.rows().to_vec();
        rows[3][5] = "1.0,2.0".into();
        pent = StarTable::new(FIELDS).unwrap();
        for row in rows {
            pent.push_row(row).unwrap();
        }

        let err = build(&pent, &hex, ZExtent::AllRecords).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidField { row: 4, column: RELATIVE_XYZ, .. }
        ));
    }

    #[test]
    fn parse_relative_xyz_requires_exactly_three_numbers() {
        assert_eq!(
            parse_relative_xyz("1.5,-2, 3e1"),
            Some(Point3::new(1.5, -2.0, 30.0))
        );
        assert_eq!(parse_relative_xyz("1,2"), None);
        assert_eq!(parse_relative_xyz("1,2,3,4"), None);
        assert_eq!(parse_relative_xyz("a,b,c"), None);
    }
}
