//! Per-volume heat-flow aggregation for monitoring.

use rh_core::VolumeId;
use rh_graph::World;
use rh_thermal::{facing_temperature, FluxMap};

/// Signed net load and radiant temperature of one volume, one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeAggregate {
    pub id: VolumeId,
    /// Net heat gained over the interval, BTU.
    pub net_btu: f64,
    /// Net heat rate, BTU/h (zero for a zero-length interval).
    pub btu_h: f64,
    /// Area-weighted average radiant temperature across the volume's
    /// portals, °F; the volume's own air temperature when no portal area
    /// is connected.
    pub radiant_f: f64,
}

/// Aggregate one volume's portal contributions.
///
/// Net load sums the signed flux entries the volume owns; radiant
/// temperature weights each owned portal's facing temperature by its
/// area.
pub fn aggregate_volume(
    world: &World,
    id: VolumeId,
    flux: &FluxMap,
    elapsed_s: f64,
) -> VolumeAggregate {
    let volume = world.volume(id);
    let inside = volume.conditions.temperature;

    let mut net_btu = 0.0;
    for (key, &q) in flux {
        if key.source == id {
            net_btu += q;
        }
    }

    let mut area = 0.0;
    let mut weighted = 0.0;
    for portal in &volume.portals {
        let outside = world.volume(portal.onto).conditions.temperature;
        let t = facing_temperature(portal, inside, outside);
        area += portal.area;
        weighted += portal.area * t;
    }
    let radiant_f = if area > 0.0 { weighted / area } else { inside };

    let btu_h = if elapsed_s > 0.0 {
        net_btu * 3600.0 / elapsed_s
    } else {
        0.0
    };

    VolumeAggregate {
        id,
        net_btu,
        btu_h,
        radiant_f,
    }
}
