use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::star::StarError;
use crate::core::models::subparticle::SubparticleType;
use crate::core::models::vertex::VertexDecodeError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "Total particles from pentavalent file does not equal particle number from hexavalent: \
         {pentavalent_rows} pentavalent rows give {pentavalent_particles} particles, \
         {hexavalent_rows} hexavalent rows give {hexavalent_particles}"
    )]
    ParticleCountMismatch {
        pentavalent_rows: usize,
        hexavalent_rows: usize,
        pentavalent_particles: f64,
        hexavalent_particles: f64,
    },

    #[error("Invalid {class} table: {source}")]
    Table {
        class: SubparticleType,
        #[source]
        source: StarError,
    },

    #[error("Invalid value '{value}' for '{column}' in {class} row {row}")]
    InvalidField {
        class: SubparticleType,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Cannot decode vertex group of {class} row {row}: {source}")]
    VertexGroup {
        class: SubparticleType,
        row: usize,
        #[source]
        source: VertexDecodeError,
    },

    #[error("No subparticle records to analyze")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
