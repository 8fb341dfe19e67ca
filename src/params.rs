//! Tuning-parameter store for the calculator's formula variables.
//!
//! Parameters are grouped per skill (group name -> variable name -> value)
//! and persisted as pretty JSON. The calculator reads them through
//! [`crate::calc::SkillCalculator::reload_params`] at batch start.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamStore {
    #[serde(default)]
    groups: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ParamStore {
    /// Load the store from `path`, creating an empty one on disk if the
    /// file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let raw = fs::read_to_string(path).context("read param store")?;
            let store: ParamStore = serde_json::from_str(&raw).context("parse param store")?;
            return Ok(store);
        }
        let store = ParamStore::default();
        store.save(path)?;
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("create param store dir")?;
        }
        let raw = serde_json::to_string_pretty(self).context("serialize param store")?;
        fs::write(path, raw).context("write param store")?;
        Ok(())
    }

    /// Drop all values. Callers follow up with a calculator reload so the
    /// built-in defaults take effect again.
    pub fn reset(&mut self, path: &Path) -> Result<()> {
        self.groups.clear();
        if path.exists() {
            fs::remove_file(path).context("remove param store")?;
        }
        Ok(())
    }

    pub fn get(&self, group: &str, key: &str) -> Option<f64> {
        self.groups.get(group).and_then(|vars| vars.get(key)).copied()
    }

    pub fn set(&mut self, group: &str, key: &str, value: f64) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn group(&self, group: &str) -> Option<&BTreeMap<String, f64>> {
        self.groups.get(group)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn default_store_path() -> Result<PathBuf> {
    let base = BaseDirs::new().context("resolve home dir")?;
    Ok(base.data_local_dir().join("skillrank").join("params.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skillrank-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn set_get_roundtrip() {
        let mut store = ParamStore::default();
        store.set("Stamina", "decay", 0.82);
        store.set("Stamina", "weight", 1.5);
        store.set("Reaction", "window", 220.0);
        assert_eq!(store.get("Stamina", "decay"), Some(0.82));
        assert_eq!(store.get("Reaction", "window"), Some(220.0));
        assert_eq!(store.get("Reaction", "missing"), None);
        assert_eq!(store.group_names().count(), 2);
    }

    #[test]
    fn persists_and_reloads() {
        let path = temp_path("persist");
        let mut store = ParamStore::default();
        store.set("Agility", "cap", 9.1);
        store.save(&path).unwrap();

        let loaded = ParamStore::load_or_create(&path).unwrap();
        assert_eq!(loaded, store);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn load_or_create_writes_empty_store() {
        let path = temp_path("create");
        fs::remove_file(&path).ok();
        let store = ParamStore::load_or_create(&path).unwrap();
        assert!(store.is_empty());
        assert!(path.exists());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn reset_clears_values_and_file() {
        let path = temp_path("reset");
        let mut store = ParamStore::default();
        store.set("Memory", "halflife", 3.0);
        store.save(&path).unwrap();

        store.reset(&path).unwrap();
        assert!(store.is_empty());
        assert!(!path.exists());
    }
}
