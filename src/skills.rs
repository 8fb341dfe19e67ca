//! Skill dimensions and per-beatmap metric records.

use serde::{Deserialize, Serialize};

pub const NUM_SKILLS: usize = 7;

/// The seven ranked skill dimensions, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skill {
    Stamina,
    Tenacity,
    Agility,
    Accuracy,
    Precision,
    Reaction,
    Memory,
}

impl Skill {
    pub const ALL: [Skill; NUM_SKILLS] = [
        Skill::Stamina,
        Skill::Tenacity,
        Skill::Agility,
        Skill::Accuracy,
        Skill::Precision,
        Skill::Reaction,
        Skill::Memory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Skill::Stamina => "Stamina",
            Skill::Tenacity => "Tenacity",
            Skill::Agility => "Agility",
            Skill::Accuracy => "Accuracy",
            Skill::Precision => "Precision",
            Skill::Reaction => "Reaction",
            Skill::Memory => "Memory",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Skill values produced by the calculator for one beatmap.
///
/// `reading` is part of the calculator output but has no ranking dimension;
/// it is carried through untouched so masks of future calculator versions
/// round-trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillValues {
    pub stamina: f64,
    pub tenacity: f64,
    pub agility: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub reaction: f64,
    pub memory: f64,
    #[serde(default)]
    pub reading: f64,
}

impl SkillValues {
    pub fn value(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Stamina => self.stamina,
            Skill::Tenacity => self.tenacity,
            Skill::Agility => self.agility,
            Skill::Accuracy => self.accuracy,
            Skill::Precision => self.precision,
            Skill::Reaction => self.reaction,
            Skill::Memory => self.memory,
        }
    }
}

/// One successfully computed beatmap. Produced by the batch engine,
/// immutable afterwards; a new run starts from an empty set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapRecord {
    /// Identifier the batch was started with (a file path). Stable across
    /// runs and used, together with `mods`, as the ranking join key.
    pub path: String,
    /// Display name reported by the calculator.
    pub name: String,
    /// Modifier text exactly as supplied by the caller.
    pub mods: String,
    pub ar: f64,
    pub cs: f64,
    pub skills: SkillValues,
}
