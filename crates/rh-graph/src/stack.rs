//! Zone hydronic stacks.

use rh_core::VolumeId;

/// Floor assembly style of a whole zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assembly {
    /// Concrete slab on grade, coupled to ground through under-slab
    /// insulation.
    Slab,
    /// Heated subfloor on joists; no ground coupling.
    Joist,
}

/// The derived three-layer hydronic stack of one heating zone.
///
/// Direct identifiers for every layer: member rooms (first is primary),
/// the per-room floor coverings, the shared slab/subfloor, and the shared
/// fluid volume. Holding ids here removes any need to derive related
/// volumes from name patterns.
#[derive(Debug, Clone)]
pub struct ZoneStack {
    pub name: String,
    /// Member rooms in declared order; `members[0]` is the primary whose
    /// temperature is the controller's process value.
    pub members: Vec<VolumeId>,
    /// One floor covering volume per member, same order.
    pub floors: Vec<VolumeId>,
    /// Shared slab/subfloor volume.
    pub slab: VolumeId,
    /// Shared fluid (loop water) volume.
    pub fluid: VolumeId,
    pub assembly: Assembly,
}

impl ZoneStack {
    /// The primary member room.
    pub fn primary(&self) -> VolumeId {
        self.members[0]
    }

    /// Position of a volume in the member list, if it belongs to this
    /// zone.
    pub fn member_position(&self, id: VolumeId) -> Option<usize> {
        self.members.iter().position(|&m| m == id)
    }
}

/// Equivalent fluid-layer thickness of a radiant loop, inches.
///
/// Piping on foot-spaced centers runs one linear foot per square foot of
/// footprint; 1/2" tube holds 0.92 US gallons per 100 ft, and a gallon is
/// 231 in³. Spread over the footprint this is a fixed thickness,
/// independent of zone size.
pub fn loop_fluid_thickness_in() -> f64 {
    0.92 / 100.0 * 231.0 / 144.0
}
