//! Data models for capsomer subparticles.

pub mod subparticle;
pub mod vertex;
