use crate::core::io::traits::MetadataFile;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;

/// Name of the data block holding per-particle rows (RELION 3.1 layout).
pub const PARTICLES_BLOCK: &str = "data_particles";

const LOOP_MARKER: &str = "loop_";
const FIELD_PREFIX: &str = "_rln";
const COMMENT_MARKER: char = '#';

#[derive(Debug, Error)]
pub enum StarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Duplicate field declaration: {0}")]
    DuplicateField(String),
    #[error("Required column '{0}' is not declared in the table header")]
    MissingColumn(String),
    #[error("Row {row} has {found} tokens but the header declares {expected} fields")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// An in-memory metadata table: declared field names plus rows of raw string tokens.
///
/// Every row holds exactly one token per declared field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarTable {
    fields: Vec<String>,
    field_index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl StarTable {
    pub fn new<I, S>(fields: I) -> Result<Self, StarError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for field in fields {
            let field = field.into();
            if table.field_index.contains_key(&field) {
                return Err(StarError::DuplicateField(field));
            }
            table.field_index.insert(field.clone(), table.fields.len());
            table.fields.push(field);
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), StarError> {
        if row.len() != self.fields.len() {
            return Err(StarError::RowWidth {
                row: self.rows.len() + 1,
                expected: self.fields.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.field_index.get(name).copied()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field_index.contains_key(name)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Header text captured while reading, kept verbatim for header regeneration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarMetadata {
    /// Every line up to and including the `data_particles` line (optics block included).
    pub preamble: Vec<String>,
    /// `loop_` markers and field declarations of the particles block, each loop preceded by
    /// a blank separator line.
    pub declarations: Vec<String>,
}

pub struct StarFile;

impl MetadataFile for StarFile {
    type Metadata = StarMetadata;
    type Error = StarError;

    const EXTENSION: &'static str = "star";

    fn read_from(reader: &mut impl BufRead) -> Result<(StarTable, Self::Metadata), Self::Error> {
        let mut metadata = StarMetadata::default();
        let mut field_names = Vec::new();
        let mut candidates: Vec<Vec<String>> = Vec::new();
        let mut in_particles = false;

        for line_res in reader.lines() {
            let line = line_res?;
            let trimmed = line.trim();

            if !in_particles {
                metadata.preamble.push(trimmed.to_string());
                if trimmed == PARTICLES_BLOCK {
                    in_particles = true;
                }
                continue;
            }

            if line.starts_with(LOOP_MARKER) {
                metadata.declarations.push(String::new());
                metadata.declarations.push(trimmed.to_string());
                continue;
            }
            if line.starts_with(FIELD_PREFIX) {
                metadata.declarations.push(trimmed.to_string());
                if let Some(name) = line[1..].split_whitespace().next() {
                    field_names.push(name.to_string());
                }
                continue;
            }
            if line.starts_with(COMMENT_MARKER) {
                continue;
            }

            let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            if !tokens.is_empty() {
                candidates.push(tokens);
            }
        }

        if !in_particles {
            return Err(StarError::MissingRecord(format!("{PARTICLES_BLOCK} block")));
        }

        let mut table = StarTable::new(field_names)?;
        let width = table.fields().len();
        for tokens in candidates.into_iter().filter(|t| t.len() == width) {
            table.push_row(tokens)?;
        }
        Ok((table, metadata))
    }
}
