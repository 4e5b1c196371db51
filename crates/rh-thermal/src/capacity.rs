//! Volumetric heat capacities.

use std::collections::BTreeMap;
use tracing::warn;

/// BTU required to raise one cubic foot of a material by one °F.
///
/// The built-in entries cover the materials every building uses; a
/// description can add or override entries for its own materials. Unknown
/// materials fall back to wood with a warning rather than failing the
/// tick (only topology references are fatal).
#[derive(Debug, Clone)]
pub struct CapacityTable {
    entries: BTreeMap<String, f64>,
}

const WOOD_BTU_FT3_F: f64 = 10.9;

impl Default for CapacityTable {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        for (name, capacity) in [
            ("air", 0.018),
            ("water", 62.43),
            ("concrete", 22.0),
            ("wood", WOOD_BTU_FT3_F),
            ("soil", 20.0),
        ] {
            entries.insert(name.to_string(), capacity);
        }
        Self { entries }
    }
}

impl CapacityTable {
    /// Add or override a material's capacity.
    pub fn insert(&mut self, name: impl Into<String>, btu_ft3_f: f64) {
        self.entries.insert(name.into(), btu_ft3_f);
    }

    /// Capacity for a material, falling back to wood for unknown names.
    pub fn get(&self, name: &str) -> f64 {
        match self.entries.get(name) {
            Some(&capacity) => capacity,
            None => {
                warn!(material = name, "unknown heat capacity; assuming wood");
                WOOD_BTU_FT3_F
            }
        }
    }
}
