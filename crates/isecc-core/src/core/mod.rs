//! # Core Module
//!
//! Fundamental building blocks shared by the engine and the command-line front end.
//!
//! - **Metadata I/O** ([`io`]) - STAR table reading, column resolution and derived headers
//! - **Data Models** ([`models`]) - Subparticle records and vertex-group assignments
//! - **Symmetry** ([`symmetry`]) - The fixed table of icosahedral rotation operators
//! - **Utilities** ([`utils`]) - Distance and rounding helpers used by the correlation engine

pub mod io;
pub mod models;
pub mod symmetry;
pub mod utils;
