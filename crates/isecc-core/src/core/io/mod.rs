//! Provides input/output functionality for particle metadata tables.
//!
//! RELION writes per-particle metadata as STAR files: a header that declares one field per
//! line followed by whitespace-separated data rows. This module reads those tables, resolves
//! the columns the subparticle builder needs by name and regenerates headers for downstream
//! subparticle extraction.

pub mod columns;
pub mod header;
pub mod star;
pub mod traits;
