//! # ISECC Core Library
//!
//! Tools for assessing how far locally refined capsomer positions on an icosahedrally
//! symmetric particle drift away from the positions predicted by the icosahedral priors.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so each concern can be tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SubparticleRecord`), the
//!   fixed-offset vertex decoder, geometry helpers, the icosahedral operator table and the
//!   STAR metadata reader.
//!
//! - **[`engine`]: The Logic Core.** Builds the combined subparticle array from the two
//!   capsomer tables, groups it by particle and runs the equatorial correlation analysis.
//!
//! - **[`workflows`]: The Public API.** Chains the engine stages into a single call that
//!   takes two parsed tables and returns the complete assessment.

pub mod core;
pub mod engine;
pub mod workflows;
