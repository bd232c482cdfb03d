//! [`ZoneRegistry`] – resolves parsed zone definitions against the world.
//!
//! Each reference name is looked up once through the injected
//! [`WorldQuery`].  Resolution is fail-fast: the first zone without
//! references or the first unknown object aborts the build, so a table never
//! contains partially resolved zones.  Positions are never refreshed after
//! the build.

use std::collections::HashMap;

use simplus_hal::WorldQuery;
use simplus_types::{Pose3D, ReferenceObject, SimError};
use tracing::{debug, info};

use crate::action::ActionZone;
use crate::config::{ZoneDefinition, ZoneRule};
use crate::nearest::ReferenceSet;
use crate::table::{Zone, ZoneTable};
use crate::trap::TrapZone;
use crate::zone::ZoneGeometry;

/// Builds [`ZoneTable`]s from [`ZoneDefinition`]s.
///
/// # Example
///
/// ```
/// use simplus_hal::SimWorld;
/// use simplus_types::Pose3D;
/// use simplus_zones::config::{parse_zone_table, ZoneKind};
/// use simplus_zones::registry::ZoneRegistry;
///
/// let world = SimWorld::builder()
///     .with_object("box", Pose3D::new(0.0, 0.0, 0.0))
///     .build();
/// let defs = parse_zone_table("pickup;box;1;1.0;1;-1", ZoneKind::Action).unwrap();
/// let table = ZoneRegistry::new(&world).build(defs).unwrap();
///
/// let event = table.call_action("pickup", &Pose3D::new(0.5, 0.0, 0.0)).unwrap();
/// assert_eq!(event.score_delta, 1.0);
/// ```
pub struct ZoneRegistry<'w, W: WorldQuery + ?Sized> {
    world: &'w W,
}

impl<'w, W: WorldQuery + ?Sized> ZoneRegistry<'w, W> {
    pub fn new(world: &'w W) -> Self {
        Self { world }
    }

    /// Resolve every definition and collect them into a table.  Later
    /// definitions with an id already present replace the earlier one.
    ///
    /// # Errors
    ///
    /// - [`SimError::EmptyZone`] for a definition without reference names.
    /// - [`SimError::ObjectNotFound`] for the first name the world lacks.
    /// - Any transport error raised by the world query.
    pub fn build<I>(&self, definitions: I) -> Result<ZoneTable, SimError>
    where
        I: IntoIterator<Item = ZoneDefinition>,
    {
        let mut cache: HashMap<String, Pose3D> = HashMap::new();
        let mut table = ZoneTable::new();
        for def in definitions {
            let zone = self.resolve_cached(def, &mut cache)?;
            table.insert(zone);
        }
        info!(
            zones = table.len(),
            objects = cache.len(),
            "zone table built"
        );
        Ok(table)
    }

    /// Resolve a single definition.
    pub fn resolve(&self, definition: ZoneDefinition) -> Result<Zone, SimError> {
        self.resolve_cached(definition, &mut HashMap::new())
    }

    fn resolve_cached(
        &self,
        definition: ZoneDefinition,
        cache: &mut HashMap<String, Pose3D>,
    ) -> Result<Zone, SimError> {
        let ZoneDefinition {
            id,
            reference_names,
            trigger_radius,
            rule,
        } = definition;

        if reference_names.is_empty() {
            return Err(SimError::EmptyZone(id));
        }

        let mut objects = Vec::with_capacity(reference_names.len());
        for name in reference_names {
            let position = match cache.get(&name) {
                Some(&p) => p,
                None => {
                    let p = self.world.lookup_object_position(&name)?;
                    cache.insert(name.clone(), p);
                    p
                }
            };
            objects.push(ReferenceObject::new(name, position));
        }

        let references = ReferenceSet::new(&id, objects)?;
        debug!(zone = %id, references = references.len(), "zone resolved");
        let geometry = ZoneGeometry::new(id, references, trigger_radius);

        Ok(match rule {
            ZoneRule::Action {
                reward_score,
                penalty_score,
            } => Zone::Action(ActionZone::new(geometry, reward_score, penalty_score)),
            ZoneRule::Trap {
                bandgap_radius,
                penalty,
            } => Zone::Trap(TrapZone::new(geometry, bandgap_radius, penalty)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::{ZoneKind, parse_zone_table};
    use simplus_hal::SimWorld;

    fn world() -> SimWorld {
        SimWorld::builder()
            .with_object("box", Pose3D::new(1.0, 0.0, 0.0))
            .with_object("box0", Pose3D::new(2.0, 0.0, 0.0))
            .with_object("box1", Pose3D::new(3.0, 0.0, 0.0))
            .with_object("pit", Pose3D::new(0.0, 1.0, 0.0))
            .build()
    }

    /// Counts lookups to check each name is queried once.
    struct CountingWorld {
        inner: SimWorld,
        lookups: RefCell<Vec<String>>,
    }

    impl WorldQuery for CountingWorld {
        fn lookup_object_position(&self, name: &str) -> Result<Pose3D, SimError> {
            self.lookups.borrow_mut().push(name.to_string());
            self.inner.lookup_object_position(name)
        }

        fn lookup_robot_pose(&self) -> Result<Pose3D, SimError> {
            self.inner.lookup_robot_pose()
        }

        fn lookup_robot_orientation(&self) -> Result<[f64; 3], SimError> {
            self.inner.lookup_robot_orientation()
        }
    }

    #[test]
    fn resolves_expanded_names_in_order() {
        let w = world();
        let defs = parse_zone_table("pickup;box;3;0.5;1;-1", ZoneKind::Action).unwrap();
        let table = ZoneRegistry::new(&w).build(defs).unwrap();
        let zone = table.get("pickup").unwrap();
        let names: Vec<&str> = zone
            .geometry()
            .references
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(names, vec!["box", "box0", "box1"]);
        assert_eq!(
            zone.geometry().references.get(2).map(|o| o.position),
            Some(Pose3D::new(3.0, 0.0, 0.0))
        );
    }

    #[test]
    fn builds_trap_zones() {
        let w = world();
        let defs = parse_zone_table("hole;pit;1;0.2;0.1;4", ZoneKind::Trap).unwrap();
        let mut table = ZoneRegistry::new(&w).build(defs).unwrap();
        let sweep = table.check_traps(&Pose3D::new(0.0, 0.9, 0.0));
        assert!((sweep.total_penalty - 4.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_object_fails_the_whole_build() {
        let w = world();
        let defs = parse_zone_table("ok;box;1;1;1;0\nbad;box;4;1;1;0", ZoneKind::Action).unwrap();
        // "box" x4 needs box2, which the world lacks.
        assert_eq!(
            ZoneRegistry::new(&w).build(defs),
            Err(SimError::ObjectNotFound("box2".to_string()))
        );
    }

    #[test]
    fn empty_zone_fails_at_build() {
        let w = world();
        let def = ZoneDefinition {
            id: "nothing".to_string(),
            reference_names: vec![],
            trigger_radius: 1.0,
            rule: ZoneRule::Action {
                reward_score: 1.0,
                penalty_score: 0.0,
            },
        };
        assert_eq!(
            ZoneRegistry::new(&w).build(vec![def]),
            Err(SimError::EmptyZone("nothing".to_string()))
        );
    }

    #[test]
    fn transport_errors_propagate() {
        let mut w = world();
        w.disconnect();
        let defs = parse_zone_table("pickup;box;1;1;1;0", ZoneKind::Action).unwrap();
        assert!(matches!(
            ZoneRegistry::new(&w).build(defs),
            Err(SimError::Transport { .. })
        ));
    }

    #[test]
    fn shared_names_are_looked_up_once() {
        let w = CountingWorld {
            inner: world(),
            lookups: RefCell::new(Vec::new()),
        };
        let defs =
            parse_zone_table("a;box;2;1;1;0\nb;box,pit;1,1;1;1;0", ZoneKind::Action).unwrap();
        let table = ZoneRegistry::new(&w).build(defs).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(*w.lookups.borrow(), vec!["box", "box0", "pit"]);
    }

    #[test]
    fn works_through_trait_object() {
        let w = world();
        let dyn_world: &dyn WorldQuery = &w;
        let defs = parse_zone_table("pickup;box;1;1;1;0", ZoneKind::Action).unwrap();
        let zone = ZoneRegistry::new(dyn_world)
            .resolve(defs.into_iter().next().unwrap())
            .unwrap();
        assert_eq!(zone.kind(), ZoneKind::Action);
    }
}
