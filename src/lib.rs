//! Batch skill evaluation and ranking-change tracking for osu! beatmaps.
//!
//! The crate drives an external skill calculator over a selected list of
//! beatmaps on a background thread ([`batch::BatchEngine`]), then turns
//! the resulting records into seven per-skill rankings annotated with how
//! each beatmap moved since the previous run ([`ranking::build_rankings`]).
//! Front ends supply the input list and render the tables; neither lives
//! here.

pub mod batch;
pub mod calc;
pub mod mods;
pub mod params;
pub mod ranking;
pub mod skills;

pub use batch::{BatchEngine, BatchError, BatchOutcome, BatchState, CalcMessage, MapInput};
pub use calc::{CalcError, CalcOutput, SkillCalculator};
pub use mods::parse_mods;
pub use params::ParamStore;
pub use ranking::{build_rankings, MatchPolicy, RankingEntry, RankingRow, RankingTables, RunHistory};
pub use skills::{BeatmapRecord, Skill, SkillValues, NUM_SKILLS};
