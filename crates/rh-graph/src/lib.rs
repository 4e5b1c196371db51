//! rh-graph: the thermal world graph.
//!
//! A building is an arena of named [`Volume`]s (rooms, floors, slabs,
//! hydronic loops, outside air, ground) connected by resistive
//! [`Portal`]s. Containment is an id relation used for traversal and
//! display only; heat flows exclusively through portals.
//!
//! [`TopologyBuilder`] turns a declarative `BuildingDescription` into the
//! frozen world graph plus one explicit [`ZoneStack`] per heating zone.

pub mod builder;
pub mod error;
pub mod order;
pub mod portal;
pub mod stack;
pub mod volume;
pub mod world;

pub use builder::TopologyBuilder;
pub use error::{GraphError, GraphResult};
pub use order::{compare_for_display, sort_for_display};
pub use portal::Portal;
pub use stack::{Assembly, ZoneStack};
pub use volume::{Conditions, Volume};
pub use world::World;
