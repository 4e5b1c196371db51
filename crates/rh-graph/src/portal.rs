//! Directed thermal connections.

use crate::error::{GraphError, GraphResult};
use rh_core::VolumeId;

/// A directed resistive connection from its owning volume onto another.
///
/// Portals are created during topology construction and never mutated.
/// `r` is the static conduction resistance; `film` is the convective
/// surface-film resistance, kept separate so a thermal mass can radiate at
/// its own internal temperature (r = 0) while the surface film still
/// limits convective transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub name: String,
    pub onto: VolumeId,
    /// Cross-sectional area, ft².
    pub area: f64,
    /// Static resistance, ft²·°F·h/BTU. Zero models direct/fluid coupling.
    pub r: f64,
    /// Film resistance, same units.
    pub film: f64,
}

impl Portal {
    pub fn new(
        name: impl Into<String>,
        onto: VolumeId,
        area: f64,
        r: f64,
        film: f64,
    ) -> GraphResult<Self> {
        let name = name.into();
        if !(area.is_finite() && area > 0.0) {
            return Err(GraphError::BadPortal {
                what: format!("{name}: area must be positive, got {area}"),
            });
        }
        if !(r.is_finite() && r >= 0.0) {
            return Err(GraphError::BadPortal {
                what: format!("{name}: resistance must be non-negative, got {r}"),
            });
        }
        if !(film.is_finite() && film >= 0.0) {
            return Err(GraphError::BadPortal {
                what: format!("{name}: film resistance must be non-negative, got {film}"),
            });
        }
        Ok(Self {
            name,
            onto,
            area,
            r,
            film,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rh_core::Id;

    #[test]
    fn zero_resistance_is_allowed() {
        // direct/fluid coupling
        let p = Portal::new("floor", Id::from_index(0), 100.0, 0.0, 0.1).unwrap();
        assert_eq!(p.r, 0.0);
    }

    #[test]
    fn zero_area_rejected() {
        assert!(Portal::new("bad", Id::from_index(0), 0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn negative_resistance_rejected() {
        assert!(Portal::new("bad", Id::from_index(0), 1.0, -1.0, 0.0).is_err());
        assert!(Portal::new("bad", Id::from_index(0), 1.0, 1.0, -0.5).is_err());
    }
}
