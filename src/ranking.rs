//! Per-dimension rankings and run-over-run change tracking.
//!
//! Each completed batch is turned into seven descending rankings, one per
//! [`Skill`]. Every entry is annotated with how its rank and value moved
//! relative to the previous run, joined on the (path, mods) key.

use crate::skills::{BeatmapRecord, Skill, NUM_SKILLS};
use std::cmp::Ordering;
use tracing::debug;

/// One snapshot entry: a beatmap's value in a single skill dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub path: String,
    pub name: String,
    pub mods: String,
    pub ar: f64,
    pub cs: f64,
    pub value: f64,
}

/// A snapshot row plus its formatted change annotation, e.g. `"(+12) +3"`.
/// The annotation is empty when the beatmap was not part of the previous
/// run.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub path: String,
    pub name: String,
    pub mods: String,
    pub ar: f64,
    pub cs: f64,
    pub value: f64,
    pub change: String,
}

/// How current entries are joined against the previous run's snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Exact equality on (path, mods). The corrected default.
    #[default]
    Exact,
    /// Legacy join: a previous entry matches when its path and mods start
    /// with the current entry's path and mods. Kept for compatibility with
    /// historical change columns; misfires when one path is a proper
    /// prefix of another, so prefer [`MatchPolicy::Exact`].
    Prefix,
}

impl MatchPolicy {
    fn matches(self, prev: &RankingRow, current: &RankingRow) -> bool {
        match self {
            MatchPolicy::Exact => prev.path == current.path && prev.mods == current.mods,
            MatchPolicy::Prefix => {
                prev.path.starts_with(&current.path) && prev.mods.starts_with(&current.mods)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
struct DimHistory {
    current: Vec<RankingRow>,
    previous: Vec<RankingRow>,
}

/// Snapshot pairs for all seven dimensions across successive runs.
///
/// Owned by the caller and passed into [`build_rankings`] explicitly, so
/// diff passes can be replayed against a cloned history in tests. Starts
/// empty; after `n` passes, `current` holds the snapshot of pass `n` and
/// `previous` the snapshot of pass `n - 1`.
#[derive(Debug, Clone, Default)]
pub struct RunHistory {
    dims: [DimHistory; NUM_SKILLS],
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the most recent diff pass for one dimension.
    pub fn current(&self, skill: Skill) -> &[RankingRow] {
        &self.dims[skill.index()].current
    }

    /// Snapshot of the pass before the most recent one.
    pub fn previous(&self, skill: Skill) -> &[RankingRow] {
        &self.dims[skill.index()].previous
    }
}

/// The seven annotated rankings produced by one diff pass.
#[derive(Debug, Clone)]
pub struct RankingTables {
    tables: [Vec<RankingEntry>; NUM_SKILLS],
}

impl RankingTables {
    pub fn get(&self, skill: Skill) -> &[RankingEntry] {
        &self.tables[skill.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, &[RankingEntry])> {
        Skill::ALL
            .iter()
            .map(move |skill| (*skill, self.get(*skill)))
    }
}

/// Build the seven rankings for a completed run and rotate `history`.
///
/// Per dimension the records are sorted descending by value (stable sort:
/// equal values keep record order), each entry is joined against the prior
/// run's snapshot under `policy`, and the change annotation is formatted
/// from the rank and value deltas. The prior run's snapshot then becomes
/// `previous` and the freshly built one `current`.
///
/// Records are read-only; the history rotation is the only side effect.
pub fn build_rankings(
    records: &[BeatmapRecord],
    history: &mut RunHistory,
    policy: MatchPolicy,
) -> RankingTables {
    let mut tables: [Vec<RankingEntry>; NUM_SKILLS] = std::array::from_fn(|_| Vec::new());

    for skill in Skill::ALL {
        let mut rows: Vec<RankingRow> = records
            .iter()
            .map(|record| RankingRow {
                path: record.path.clone(),
                name: record.name.clone(),
                mods: record.mods.clone(),
                ar: record.ar,
                cs: record.cs,
                value: record.skills.value(skill),
            })
            .collect();
        rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

        let dim = &mut history.dims[skill.index()];
        let prior = std::mem::take(&mut dim.current);

        let entries = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let change = prior
                    .iter()
                    .position(|prev| policy.matches(prev, row))
                    .map(|j| format_change(j as i64 - i as i64, row.value - prior[j].value))
                    .unwrap_or_default();
                RankingEntry {
                    path: row.path.clone(),
                    name: row.name.clone(),
                    mods: row.mods.clone(),
                    ar: row.ar,
                    cs: row.cs,
                    value: row.value,
                    change,
                }
            })
            .collect();

        dim.previous = prior;
        dim.current = rows;
        tables[skill.index()] = entries;
    }

    debug!(records = records.len(), "ranking pass complete");
    RankingTables { tables }
}

/// Change column format: `"(<value delta>) <rank delta>"`.
///
/// The value delta is truncated to an integer and always carries a `+`
/// when non-negative. The rank delta carries a `+` when non-negative and
/// is printed unsigned when negative (a drop of 3 places reads `3`).
fn format_change(rank_delta: i64, value_delta: f64) -> String {
    let value_sign = if value_delta >= 0.0 { "+" } else { "" };
    let rank = if rank_delta >= 0 {
        format!("+{rank_delta}")
    } else {
        rank_delta.abs().to_string()
    };
    format!("({}{}) {}", value_sign, value_delta as i64, rank)
}
