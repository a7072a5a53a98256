//! # Workflows Module
//!
//! High-level entry points that run the complete assessment on parsed metadata tables.
//!
//! - **Assessment Workflow** ([`assess`]) - Builds the subparticle array from the two
//!   capsomer tables and correlates ideal against refined equatorial spans per particle.

pub mod assess;
