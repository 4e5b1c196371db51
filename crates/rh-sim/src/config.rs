//! Loop configuration and external events.

use rh_core::VolumeId;
use std::collections::BTreeMap;

/// External wake reasons delivered to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// Something happened (input, sensor activity); process a tick.
    Wake,
    /// Clean shutdown requested.
    Quit,
}

/// Update-loop timing and comfort parameters.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Event-triggered ticks arriving faster than this are coalesced so
    /// bursts (key repeat) don't flood the model with near-zero steps.
    /// A UX tuning choice, not a physical invariant.
    pub debounce_s: f64,
    /// Maximum polling latency: with no event, the loop proceeds on a
    /// time-elapsed basis after this long.
    pub poll_s: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            debounce_s: 0.3,
            poll_s: 1.0,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<(), crate::SimError> {
        if !(self.debounce_s.is_finite() && self.debounce_s >= 0.0) {
            return Err(crate::SimError::InvalidArg {
                what: "debounce_s must be non-negative",
            });
        }
        if !(self.poll_s.is_finite() && self.poll_s > 0.0) {
            return Err(crate::SimError::InvalidArg {
                what: "poll_s must be positive",
            });
        }
        Ok(())
    }
}

/// Per-volume clothing/metabolism override.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComfortOverride {
    pub clo: Option<f64>,
    pub met: Option<f64>,
}

/// Comfort model defaults plus per-volume overrides.
#[derive(Debug, Clone)]
pub struct ComfortDefaults {
    /// Fixed relative humidity fraction used for every estimate.
    pub humidity: f64,
    pub clo: f64,
    pub met: f64,
    pub overrides: BTreeMap<VolumeId, ComfortOverride>,
}

impl Default for ComfortDefaults {
    fn default() -> Self {
        Self {
            humidity: 0.5,
            clo: 1.0,
            met: 1.2,
            overrides: BTreeMap::new(),
        }
    }
}

impl ComfortDefaults {
    /// Resolved (clo, met) for a volume.
    pub fn resolve(&self, id: VolumeId) -> (f64, f64) {
        match self.overrides.get(&id) {
            Some(o) => (o.clo.unwrap_or(self.clo), o.met.unwrap_or(self.met)),
            None => (self.clo, self.met),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rh_core::Id;

    #[test]
    fn default_config_validates() {
        assert!(LoopConfig::default().validate().is_ok());
    }

    #[test]
    fn bad_poll_rejected() {
        let config = LoopConfig {
            poll_s: 0.0,
            ..LoopConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn override_merges_field_by_field() {
        let mut defaults = ComfortDefaults::default();
        defaults.overrides.insert(
            Id::from_index(3),
            ComfortOverride {
                clo: Some(0.5),
                met: None,
            },
        );
        assert_eq!(defaults.resolve(Id::from_index(3)), (0.5, 1.2));
        assert_eq!(defaults.resolve(Id::from_index(4)), (1.0, 1.2));
    }
}
