//! `keyroll-recon` — Record reconciliation engine.
//!
//! Pure engine crate: reads staged content and master records through the
//! store contracts in `keyroll-core`, classifies every staged row as
//! New / Match / Disagreement, applies per-row user decisions to the
//! master record set, and purges staged content once a review is finished
//! or abandoned. No CLI or IO dependencies.

pub mod classify;
pub mod config;
pub mod decision;
pub mod diff;
pub mod engine;
pub mod error;
pub mod model;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::ReconConfig;
pub use decision::{Decision, DecisionReport, DecisionSet};
pub use engine::ReconEngine;
pub use error::ReconError;
pub use model::{Classification, DisagreementRecord, Discrepancy, MatchRecord, NewRecord};
