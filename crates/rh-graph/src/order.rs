//! Zone-aware ordering for display and selection.

use crate::stack::ZoneStack;
use crate::volume::Volume;
use crate::world::World;
use rh_core::VolumeId;
use std::cmp::Ordering;

/// Compare two volumes for display.
///
/// Volumes in the same zone sort by their declared member position; a
/// volume with a zone sorts before any volume without one; volumes in
/// different zones sort by zone name; volumes with no zone sort by their
/// own name. This is a strict weak ordering, stable and transitive for
/// any input set.
pub fn compare_for_display(a: &Volume, b: &Volume, stacks: &[ZoneStack]) -> Ordering {
    let za = zone_of(a.id, stacks);
    let zb = zone_of(b.id, stacks);
    match (za, zb) {
        (Some((zi, pi)), Some((zj, pj))) => {
            if zi == zj {
                pi.cmp(&pj)
            } else {
                stacks[zi].name.cmp(&stacks[zj].name)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

/// Sort the given volume ids for display.
pub fn sort_for_display(world: &World, stacks: &[ZoneStack], ids: &mut [VolumeId]) {
    ids.sort_by(|&a, &b| compare_for_display(world.volume(a), world.volume(b), stacks));
}

fn zone_of(id: VolumeId, stacks: &[ZoneStack]) -> Option<(usize, usize)> {
    stacks
        .iter()
        .enumerate()
        .find_map(|(zi, stack)| stack.member_position(id).map(|pi| (zi, pi)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Assembly;
    use crate::world::World;

    fn fixture() -> (World, Vec<ZoneStack>) {
        let mut world = World::new();
        let a = world.add("alpha", [1.0, 1.0, 1.0], "air", 68.0).unwrap();
        let b = world.add("beta", [1.0, 1.0, 1.0], "air", 68.0).unwrap();
        let c = world.add("gamma", [1.0, 1.0, 1.0], "air", 68.0).unwrap();
        let slab = world.add("slab", [1.0, 1.0, 0.1], "wood", 68.0).unwrap();
        let fluid = world.add("fluid", [1.0, 1.0, 0.01], "water", 68.0).unwrap();
        let stacks = vec![ZoneStack {
            name: "zone 1".to_string(),
            // Declared order: beta before alpha, deliberately not
            // alphabetical.
            members: vec![b, a],
            floors: vec![],
            slab,
            fluid,
            assembly: Assembly::Slab,
        }];
        let _ = c;
        (world, stacks)
    }

    #[test]
    fn zone_members_sort_by_declared_position() {
        let (world, stacks) = fixture();
        let mut ids: Vec<_> = ["alpha", "beta"]
            .iter()
            .map(|n| world.id_of(n).unwrap())
            .collect();
        sort_for_display(&world, &stacks, &mut ids);
        let names: Vec<_> = ids.iter().map(|&id| world.volume(id).name.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
    }

    #[test]
    fn zoned_before_unzoned_then_lexicographic() {
        let (world, stacks) = fixture();
        let mut ids: Vec<_> = ["gamma", "alpha", "slab", "beta", "fluid"]
            .iter()
            .map(|n| world.id_of(n).unwrap())
            .collect();
        sort_for_display(&world, &stacks, &mut ids);
        let names: Vec<_> = ids.iter().map(|&id| world.volume(id).name.as_str()).collect();
        // beta, alpha are zoned; fluid/gamma/slab are not members and sort
        // by name.
        assert_eq!(names, vec!["beta", "alpha", "fluid", "gamma", "slab"]);
    }

    #[test]
    fn sort_is_stable_under_repetition() {
        let (world, stacks) = fixture();
        let mut ids: Vec<_> = world.volumes().iter().map(|v| v.id).collect();
        sort_for_display(&world, &stacks, &mut ids);
        let once: Vec<_> = ids.clone();
        sort_for_display(&world, &stacks, &mut ids);
        assert_eq!(once, ids);
    }
}
