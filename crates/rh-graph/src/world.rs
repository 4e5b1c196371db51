//! The volume arena.

use crate::error::{GraphError, GraphResult};
use crate::portal::Portal;
use crate::volume::{Conditions, Volume};
use rh_core::VolumeId;
use std::collections::HashMap;

/// Arena of volumes addressed by stable ids.
///
/// Ids are issued by this arena and index directly into it; containment
/// and portal adjacency are id links, so the graph has no owning cycles.
/// Volume names are unique across the world.
#[derive(Debug, Clone, Default)]
pub struct World {
    volumes: Vec<Volume>,
    by_name: HashMap<String, VolumeId>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a volume and return its id. Names must be unique.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        size: [f64; 3],
        material: impl Into<String>,
        temperature: f64,
    ) -> GraphResult<VolumeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateName { name });
        }
        let id = VolumeId::from_index(self.volumes.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.volumes.push(Volume {
            id,
            name,
            size,
            material: material.into(),
            conditions: Conditions {
                temperature,
                sensor: None,
            },
            portals: Vec::new(),
            contained_by: None,
            contains: Vec::new(),
        });
        Ok(id)
    }

    /// Record that `parent` contains `child`.
    pub fn contain(&mut self, parent: VolumeId, child: VolumeId) -> GraphResult<()> {
        if self.volumes[child.index() as usize].contained_by.is_some() {
            return Err(GraphError::AlreadyContained {
                name: self.volumes[child.index() as usize].name.clone(),
            });
        }
        self.volumes[child.index() as usize].contained_by = Some(parent);
        self.volumes[parent.index() as usize].contains.push(child);
        Ok(())
    }

    /// Attach a portal to its owning volume. The destination must exist.
    pub fn connect(&mut self, owner: VolumeId, portal: Portal) -> GraphResult<()> {
        if portal.onto.index() as usize >= self.volumes.len() {
            return Err(GraphError::BadPortal {
                what: format!("{}: destination volume does not exist", portal.name),
            });
        }
        self.volumes[owner.index() as usize].portals.push(portal);
        Ok(())
    }

    /// Number of volumes.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Volume by id. Ids are arena-issued; a foreign id panics.
    pub fn volume(&self, id: VolumeId) -> &Volume {
        &self.volumes[id.index() as usize]
    }

    pub fn volume_mut(&mut self, id: VolumeId) -> &mut Volume {
        &mut self.volumes[id.index() as usize]
    }

    /// Volume id by name.
    pub fn id_of(&self, name: &str) -> Option<VolumeId> {
        self.by_name.get(name).copied()
    }

    /// Volume by name.
    pub fn by_name(&self, name: &str) -> Option<&Volume> {
        self.id_of(name).map(|id| self.volume(id))
    }

    /// All volumes in insertion order.
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    /// Depth-first walk over the containment tree, roots first.
    ///
    /// Yields `(id, depth)` pairs. Volumes with no parent are roots.
    pub fn walk(&self) -> Vec<(VolumeId, usize)> {
        let mut out = Vec::with_capacity(self.volumes.len());
        let mut stack: Vec<(VolumeId, usize)> = self
            .volumes
            .iter()
            .rev()
            .filter(|v| v.contained_by.is_none())
            .map(|v| (v.id, 0))
            .collect();
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            let v = self.volume(id);
            for &child in v.contains.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_rejected() {
        let mut world = World::new();
        world.add("left", [1.0, 1.0, 1.0], "air", 68.0).unwrap();
        assert!(matches!(
            world.add("left", [1.0, 1.0, 1.0], "air", 68.0),
            Err(GraphError::DuplicateName { .. })
        ));
    }

    #[test]
    fn containment_is_single_parent() {
        let mut world = World::new();
        let a = world.add("world", [1.0, 1.0, 1.0], "air", -40.0).unwrap();
        let b = world.add("ground", [1.0, 1.0, 1.0], "soil", 41.0).unwrap();
        let c = world.add("left", [1.0, 1.0, 1.0], "air", 68.0).unwrap();
        world.contain(a, b).unwrap();
        world.contain(a, c).unwrap();
        assert!(world.contain(b, c).is_err());
        assert_eq!(world.volume(b).contained_by, Some(a));
        assert_eq!(world.volume(a).contains, vec![b, c]);
    }

    #[test]
    fn walk_visits_roots_then_children_in_order() {
        let mut world = World::new();
        let w = world.add("world", [1.0, 1.0, 1.0], "air", -40.0).unwrap();
        let g = world.add("ground", [1.0, 1.0, 1.0], "soil", 41.0).unwrap();
        let l = world.add("left", [1.0, 1.0, 1.0], "air", 68.0).unwrap();
        let f = world.add("left floor", [1.0, 1.0, 0.01], "wood", 68.0).unwrap();
        world.contain(w, g).unwrap();
        world.contain(w, l).unwrap();
        world.contain(l, f).unwrap();

        let visited = world.walk();
        let names: Vec<(&str, usize)> = visited
            .iter()
            .map(|&(id, d)| (world.volume(id).name.as_str(), d))
            .collect();
        assert_eq!(
            names,
            vec![
                ("world", 0),
                ("ground", 1),
                ("left", 1),
                ("left floor", 2)
            ]
        );
    }

    #[test]
    fn connect_requires_existing_destination() {
        let mut world = World::new();
        let a = world.add("left", [1.0, 1.0, 1.0], "air", 68.0).unwrap();
        let bogus = VolumeId::from_index(99);
        let portal = Portal::new("bad", bogus, 1.0, 1.0, 0.0).unwrap();
        assert!(world.connect(a, portal).is_err());
    }
}
