//! Tuning resolution.

use rh_building::{PidTuningDef, PidTuningPatchDef};
use serde::{Deserialize, Serialize};

/// Resolved PID tuning for one zone.
///
/// Always a structural copy: every controller owns its own figures, so
/// runtime mutation of one zone's gains never leaks into another's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub lout: (f64, f64),
    /// Persisted integral state to seed the controller with.
    pub integral: Option<f64>,
}

impl From<&PidTuningDef> for Tuning {
    fn from(def: &PidTuningDef) -> Self {
        Self {
            kp: def.kp,
            ki: def.ki,
            kd: def.kd,
            lout: (def.lout[0], def.lout[1]),
            integral: def.integral,
        }
    }
}

impl Tuning {
    /// Merge a zone patch over the default tuning, field by field.
    pub fn merged(default: &PidTuningDef, patch: Option<&PidTuningPatchDef>) -> Self {
        let mut tuning = Tuning::from(default);
        if let Some(patch) = patch {
            if let Some(kp) = patch.kp {
                tuning.kp = kp;
            }
            if let Some(ki) = patch.ki {
                tuning.ki = ki;
            }
            if let Some(kd) = patch.kd {
                tuning.kd = kd;
            }
            if let Some(lout) = patch.lout {
                tuning.lout = (lout[0], lout[1]);
            }
            if let Some(integral) = patch.integral {
                tuning.integral = Some(integral);
            }
        }
        tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_patch_copies_default() {
        let default = PidTuningDef::default();
        let tuning = Tuning::merged(&default, None);
        assert_eq!(tuning.kp, default.kp);
        assert_eq!(tuning.lout, (0.0, 1.0));
        assert_eq!(tuning.integral, None);
    }

    #[test]
    fn patch_wins_field_by_field() {
        let default = PidTuningDef::default();
        let patch = PidTuningPatchDef {
            ki: Some(0.005),
            lout: Some([0.0, 1.25]),
            integral: Some(12.0),
            ..PidTuningPatchDef::default()
        };
        let tuning = Tuning::merged(&default, Some(&patch));
        assert_eq!(tuning.kp, default.kp); // inherited
        assert_eq!(tuning.ki, 0.005);
        assert_eq!(tuning.lout, (0.0, 1.25));
        assert_eq!(tuning.integral, Some(12.0));
    }

    #[test]
    fn merged_tunings_are_independent_copies() {
        let default = PidTuningDef::default();
        let mut a = Tuning::merged(&default, None);
        let b = Tuning::merged(&default, None);
        a.kp = 99.0;
        assert_ne!(a.kp, b.kp);
    }
}
