//! # Engine Module
//!
//! The analysis engine: turns two parsed capsomer tables into one subparticle array and
//! measures, per particle, how local refinement changed the widest equatorial capsomer span.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Inclusion threshold, central-slice limit and the
//!   relative-Z extent policy
//! - **Record Building** ([`builder`]) - Merges pentavalent and hexavalent tables into a
//!   [`SubparticleArray`](crate::core::models::subparticle::SubparticleArray)
//! - **Grouping** ([`grouping`]) - Partitions records by parent particle
//! - **Correlation** ([`correlation`]) - Ideal versus refined distance analysis in the
//!   equatorial band
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Every stage runs to completion on the calling thread before the next one starts.

pub mod builder;
pub mod config;
pub mod correlation;
pub mod error;
pub mod grouping;
pub mod progress;
