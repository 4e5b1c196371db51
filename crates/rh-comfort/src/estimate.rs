//! Per-volume comfort results.

use crate::fanger::{feels, Fanger};
use crate::ComfortResult;
use serde::{Deserialize, Serialize};

/// Derived comfort result for one occupied volume, one tick.
///
/// Not stored state: recomputed every tick from fused temperatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortEstimate {
    /// Predicted mean vote, −3 .. +3.
    pub pmv: f64,
    pub feels: String,
    pub clo: f64,
    pub clo_description: String,
    pub met: f64,
    pub met_description: String,
}

impl ComfortEstimate {
    /// Evaluate the model, resolving descriptors.
    pub fn evaluate(model: &Fanger) -> ComfortResult<Self> {
        let pmv = model.pmv()?;
        let clothing = model.clothing();
        let metabolism = model.metabolism();
        Ok(Self {
            pmv,
            feels: feels(pmv).to_string(),
            clo: model.clo,
            clo_description: clothing.description.to_string(),
            met: model.met,
            met_description: metabolism.description.to_string(),
        })
    }

    /// Degraded placeholder reported when the model fails: zero vote and
    /// unknown descriptors, never a tick abort.
    pub fn unknown() -> Self {
        Self {
            pmv: 0.0,
            feels: "unknown".to_string(),
            clo: f64::NAN,
            clo_description: "unknown".to_string(),
            met: f64::NAN,
            met_description: "unknown".to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.feels == "unknown"
    }
}
