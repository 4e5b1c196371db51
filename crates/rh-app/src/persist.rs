//! Controller-state persistence.
//!
//! One small JSON file under `.radiant/` holding each zone's integral
//! term. Loading it back seeds the controllers so accumulated
//! degree-seconds of error survive a restart.

use crate::error::AppResult;
use chrono::Utc;
use rh_controls::ZoneControllers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedState {
    /// RFC 3339 stamp of the save.
    pub saved_at: String,
    /// Zone name -> controller integral term.
    pub integrals: BTreeMap<String, f64>,
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(".radiant").join("state.json")
}

/// Save every zone's integral term under `root`.
pub fn save_state(root: &Path, controllers: &ZoneControllers) -> AppResult<()> {
    let state = PersistedState {
        saved_at: Utc::now().to_rfc3339(),
        integrals: controllers
            .entries()
            .iter()
            .map(|e| (e.zone.clone(), e.controller.i))
            .collect(),
    };
    let path = state_path(root);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&path, serde_json::to_string_pretty(&state)?)?;
    info!(path = %path.display(), zones = state.integrals.len(), "controller state saved");
    Ok(())
}

/// Load persisted state from `root`, if any exists.
pub fn load_state(root: &Path) -> AppResult<Option<PersistedState>> {
    let path = state_path(root);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let state: PersistedState = serde_json::from_str(&content)?;
    info!(path = %path.display(), saved_at = %state.saved_at, "controller state loaded");
    Ok(Some(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_state_is_none() {
        let dir = std::env::temp_dir().join(format!("radiant_persist_none_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        assert!(load_state(&dir).unwrap().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn state_round_trips_through_json() {
        let state = PersistedState {
            saved_at: "2026-01-01T00:00:00Z".to_string(),
            integrals: [("zone 1".to_string(), 12.5)].into_iter().collect(),
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: PersistedState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
