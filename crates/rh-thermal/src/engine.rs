//! The network engine contract and the conduction reference engine.

use crate::capacity::CapacityTable;
use rh_core::VolumeId;
use rh_graph::World;
use std::collections::BTreeMap;

/// Identifies one directional heat-flow contribution: the portal named
/// `portal`, owned by `source`, onto `dest`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FluxKey {
    pub source: VolumeId,
    pub dest: VolumeId,
    pub portal: String,
}

/// Heat transferred through each portal over one interval, BTU.
///
/// Positive values are heat gained by the portal's owning volume. A
/// `BTreeMap` keeps iteration deterministic for display and tests.
pub type FluxMap = BTreeMap<FluxKey, f64>;

/// The contract the control loop requires from a thermal-network engine.
pub trait ThermalNetwork {
    /// Heat transferred through every portal over `elapsed_s` seconds.
    fn compute(&self, world: &World, elapsed_s: f64) -> FluxMap;

    /// Apply net heat deltas, advancing every volume's temperature.
    fn absorb(&self, world: &mut World, flux: &FluxMap);
}

/// Resistance floor for portals modeling direct coupling (both static and
/// film resistance zero).
const R_DIRECT: f64 = 1e-3;

/// Explicit per-portal conduction engine.
///
/// Heat through a portal is `ΔT · area / (r + film)` BTU/h, integrated
/// over the elapsed interval. Temperature updates divide by the volume's
/// thermal mass (ft³ × volumetric capacity).
#[derive(Debug, Clone, Default)]
pub struct ConductionEngine {
    capacities: CapacityTable,
}

impl ConductionEngine {
    pub fn new(capacities: CapacityTable) -> Self {
        Self { capacities }
    }

    fn thermal_mass(&self, world: &World, id: VolumeId) -> f64 {
        let volume = world.volume(id);
        volume.volume_ft3() * self.capacities.get(&volume.material)
    }
}

impl ThermalNetwork for ConductionEngine {
    fn compute(&self, world: &World, elapsed_s: f64) -> FluxMap {
        let hours = elapsed_s / 3600.0;
        let mut flux = FluxMap::new();
        for volume in world.volumes() {
            let t_owner = volume.conditions.temperature;
            for portal in &volume.portals {
                let t_onto = world.volume(portal.onto).conditions.temperature;
                let resistance = (portal.r + portal.film).max(R_DIRECT);
                let q = (t_onto - t_owner) * portal.area / resistance * hours;
                flux.insert(
                    FluxKey {
                        source: volume.id,
                        dest: portal.onto,
                        portal: portal.name.clone(),
                    },
                    q,
                );
            }
        }
        flux
    }

    fn absorb(&self, world: &mut World, flux: &FluxMap) {
        for (key, &q) in flux {
            let source_mass = self.thermal_mass(world, key.source);
            let dest_mass = self.thermal_mass(world, key.dest);
            if source_mass > 0.0 {
                world.volume_mut(key.source).conditions.temperature += q / source_mass;
            }
            if dest_mass > 0.0 {
                world.volume_mut(key.dest).conditions.temperature -= q / dest_mass;
            }
        }
    }
}
