//! Narrow interface to the external skill calculator.
//!
//! The calculator itself is an opaque collaborator. It is stateful and not
//! reentrant, so the batch engine calls it strictly sequentially from a
//! single worker thread.

use crate::{params::ParamStore, skills::SkillValues};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    /// The calculator (or its parameter reload entry point) could not be
    /// located or initialized. Fatal: a batch cannot start.
    #[error("calculator unavailable: {0}")]
    Unavailable(String),
    /// One item could not be computed. Recovered locally: the item is
    /// skipped and the batch continues.
    #[error("computation failed for {path}: {reason}")]
    Item { path: String, reason: String },
}

/// Calculator output for one beatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcOutput {
    pub name: String,
    pub skills: SkillValues,
    pub ar: f64,
    pub cs: f64,
}

/// Contract the batch engine drives the calculator through.
///
/// Implementations must tolerate repeated sequential calls from one thread;
/// the engine never calls `calculate` concurrently.
pub trait SkillCalculator: Send + Sync {
    /// Reload tunable formula parameters from the store. Called once per
    /// batch, before the first item. Failure aborts the batch start.
    fn reload_params(&self, store: &ParamStore) -> Result<(), CalcError>;

    /// Compute the skill values for one beatmap under the given mod mask.
    fn calculate(&self, path: &str, mods: u32) -> Result<CalcOutput, CalcError>;
}
