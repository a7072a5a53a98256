use crate::core::io::columns::{
    CUSTOM_UID, IMAGE_ORIGINAL_NAME, RELATIVE_POSE, RELATIVE_XYZ, VERTEX_GROUP,
};
use crate::core::io::star::{StarMetadata, StarTable};
use std::io::{self, Write};
use tracing::warn;

/// Fields every regenerated subparticle table carries, appended when the source lacks them.
const SYNTHESIZED_FIELDS: [&str; 3] = [IMAGE_ORIGINAL_NAME, CUSTOM_UID, VERTEX_GROUP];

/// Fields that are expected on locally refined subparticles but not needed by the analysis.
const EXPECTED_FIELDS: [&str; 2] = [RELATIVE_XYZ, RELATIVE_POSE];

const TIMESTAMP_FLAG: &str = "--timestamp_run";

/// Identifies one invocation of the tool. Captured once by the caller so header generation
/// never reads the clock itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub date: String,
    pub program: String,
    pub arguments: String,
    /// `YYYYMMDD_HHMM` stamp used to regenerate subparticles from this run.
    pub timestamp: String,
}

/// A regenerated table header: the run banner, the source header and any synthesized fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedHeader {
    pub fields: Vec<String>,
    pub lines: Vec<String>,
}

impl DerivedHeader {
    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

pub fn derive_header(table: &StarTable, metadata: &StarMetadata, run: &RunInfo) -> DerivedHeader {
    let mut fields: Vec<String> = table.fields().to_vec();

    let mut args_line = format!("# SCRIPT_ARGS: {}", run.arguments).trim().to_string();
    if !args_line.contains(TIMESTAMP_FLAG) {
        args_line = format!("{} {} {}", args_line, TIMESTAMP_FLAG, run.timestamp);
    }

    let mut lines = vec![
        format!("# SCRIPT_RUN_DATE: {}", run.date).trim().to_string(),
        format!("# SCRIPT_VERSION: {}", run.program).trim().to_string(),
        args_line,
    ];
    lines.extend(metadata.preamble.iter().cloned());
    lines.extend(metadata.declarations.iter().cloned());

    for name in SYNTHESIZED_FIELDS {
        if !table.has_field(name) {
            fields.push(name.to_string());
            lines.push(format!("_{} #{}", name, fields.len()));
        }
    }

    for name in EXPECTED_FIELDS {
        if !table.has_field(name) {
            warn!("{} not in header", name);
        }
    }

    DerivedHeader { fields, lines }
}
