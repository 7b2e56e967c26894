use std::any::type_name;
use std::ops::{AddAssign, Mul};

use super::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Pos(f32, f32, f32);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Vel(f32, f32, f32);

#[derive(Debug, Clone, PartialEq)]
struct Tag(&'static str);

impl AddAssign<Vel> for Pos {
    fn add_assign(&mut self, vel: Vel) {
        self.0 += vel.0;
        self.1 += vel.1;
        self.2 += vel.2;
    }
}

impl Mul<f32> for Vel {
    type Output = Vel;

    fn mul(self, dt: f32) -> Vel {
        Vel(self.0 * dt, self.1 * dt, self.2 * dt)
    }
}

/// Log of invoked systems, used as the context.
type Calls = Vec<(&'static str, usize)>;

fn world() -> World<Calls> {
    World::new::<(Pos, Vel, Tag)>(Calls::new()).unwrap()
}

#[test]
fn test_declared_ids() {
    let world = world();
    assert_eq!(world.id_of::<Pos>().unwrap().index(), 1);
    assert_eq!(world.id_of::<Vel>().unwrap().index(), 2);
    assert_eq!(world.id_of::<Tag>().unwrap().index(), 3);
    assert_eq!(
        world.id_of::<u32>(),
        Err(EcsError::TypeNotRegistered {
            type_name: type_name::<u32>(),
        }),
    );

    let single = World::new::<(Tag,)>(()).unwrap();
    assert_eq!(single.id_of::<Tag>().unwrap().index(), 1);
    assert_eq!(single.registry().len(), 1);
}

#[test]
fn test_duplicate_declaration() {
    let result = World::new::<(Pos, Vel, Pos)>(());
    assert_eq!(
        result.err(),
        Some(EcsError::DuplicateType {
            type_name: type_name::<Pos>(),
        }),
    );
}

#[test]
fn test_add_entity() {
    let mut world = world();
    let a = Pos(1.0, 2.0, 3.0);
    let b = Vel(4.0, 5.0, 6.0);
    let handle = world.add_entity((a, b)).unwrap();
    assert_eq!(handle.index(), 0);

    let mask = *world.entity(handle).unwrap().mask();
    let pos = world.id_of::<Pos>().unwrap().index();
    let vel = world.id_of::<Vel>().unwrap().index();
    assert_eq!(mask.ones().collect::<Vec<_>>(), [pos, vel]);

    assert_eq!(world.get::<Pos>(handle), Ok(&a));
    assert_eq!(world.get::<Vel>(handle), Ok(&b));
    assert_eq!(
        world.get::<Tag>(handle),
        Err(EcsError::ComponentNotAttached {
            entity: handle,
            type_name: type_name::<Tag>(),
        }),
    );

    let second = world.add_entity((Tag("second"),)).unwrap();
    assert_eq!(second.index(), 1);
    assert_eq!(world.entity_count(), 2);
    assert_eq!(world.get::<Tag>(second), Ok(&Tag("second")));
}

#[test]
fn test_add_entity_is_atomic() {
    let mut world = world();
    assert_eq!(
        world.add_entity((Pos::default(), 7u8)),
        Err(EcsError::TypeNotRegistered {
            type_name: type_name::<u8>(),
        }),
    );
    assert_eq!(
        world.add_entity((Pos::default(), Pos::default())),
        Err(EcsError::DuplicateComponent {
            type_name: type_name::<Pos>(),
        }),
    );
    assert_eq!(world.entity_count(), 0);
    let pos = world.id_of::<Pos>().unwrap();
    assert_eq!(world.storages().len_of(pos), Some(0));
}

#[test]
fn test_empty_entity() {
    let mut world = world();
    let handle = world.add_entity(()).unwrap();
    assert!(world.entity(handle).unwrap().mask().is_empty());
}

#[test]
fn test_unknown_entity() {
    let mut world = world();
    let handle = world.add_entity((Pos::default(),)).unwrap();
    let missing = EntityHandle::new(handle.index() + 1);
    assert_eq!(world.get::<Pos>(missing), Err(EcsError::EntityNotFound(missing)));
    assert_eq!(world.enable::<Pos>(missing), Err(EcsError::EntityNotFound(missing)));
    assert!(world.entity(missing).is_err());
}

#[test]
fn test_disable_enable_round_trip() {
    let mut world = world();
    let handle = world.add_entity((Pos(1.0, 1.0, 1.0), Vel::default())).unwrap();
    let before = *world.entity(handle).unwrap().mask();

    world.disable::<Pos>(handle).unwrap();
    let pos = world.id_of::<Pos>().unwrap();
    assert!(!world.entity(handle).unwrap().is_enabled(pos));
    assert_eq!(world.get::<Pos>(handle), Ok(&Pos(1.0, 1.0, 1.0)));

    world.enable::<Pos>(handle).unwrap();
    assert_eq!(*world.entity(handle).unwrap().mask(), before);
    assert_eq!(world.get::<Pos>(handle), Ok(&Pos(1.0, 1.0, 1.0)));
}

#[test]
fn test_toggle_missing_component() {
    let mut world = world();
    let handle = world.add_entity((Pos::default(),)).unwrap();
    let before = *world.entity(handle).unwrap().mask();

    let error = EcsError::ComponentNotAttached {
        entity: handle,
        type_name: type_name::<Vel>(),
    };
    assert_eq!(world.enable::<Vel>(handle), Err(error.clone()));
    assert_eq!(world.disable::<Vel>(handle), Err(error));
    assert_eq!(*world.entity(handle).unwrap().mask(), before);
}

#[test]
fn test_subset_matching() {
    let mut world = world();
    let full = world
        .add_entity((Pos::default(), Vel::default(), Tag("full")))
        .unwrap();
    let _partial = world.add_entity((Pos::default(),)).unwrap();

    world
        .add_system::<(Pos, Vel), _>(0, |_, entity, calls| {
            calls.push(("movement", entity.handle().index()));
            Ok(())
        })
        .unwrap();
    world.update(1.0);

    assert_eq!(world.context(), &[("movement", full.index())]);
}

#[test]
fn test_disabled_component_is_skipped() {
    let mut world = world();
    let handle = world.add_entity((Pos::default(), Vel::default())).unwrap();
    world
        .add_system::<(Pos, Vel), _>(0, |_, entity, calls| {
            calls.push(("movement", entity.handle().index()));
            Ok(())
        })
        .unwrap();

    world.disable::<Vel>(handle).unwrap();
    world.update(1.0);
    assert!(world.context().is_empty());

    world.enable::<Vel>(handle).unwrap();
    world.update(1.0);
    assert_eq!(world.context().len(), 1);
}

#[test]
fn test_descending_order() {
    let mut world = world();
    world.add_entity((Pos::default(), Vel::default())).unwrap();

    world
        .add_system::<(Pos,), _>(1, |_, _, calls| {
            calls.push(("low", 0));
            Ok(())
        })
        .unwrap();
    world
        .add_system::<(Pos,), _>(5, |_, _, calls| {
            calls.push(("high", 0));
            Ok(())
        })
        .unwrap();
    world.update(0.5);

    assert_eq!(world.context(), &[("high", 0), ("low", 0)]);
}

#[test]
fn test_equal_order_keeps_insertion() {
    let mut world = world();
    world.add_entity((Pos::default(),)).unwrap();
    for name in ["first", "second", "third"] {
        world
            .add_system::<(Pos,), _>(3, move |_, _, calls| {
                calls.push((name, 0));
                Ok(())
            })
            .unwrap();
    }
    world.update(0.5);

    let names: Vec<_> = world.context().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["first", "second", "third"]);
}

#[test]
fn test_entities_in_insertion_order() {
    let mut world = world();
    for _ in 0..4 {
        world.add_entity((Pos::default(),)).unwrap();
    }
    world
        .add_system::<(Pos,), _>(0, |_, entity, calls| {
            calls.push(("visit", entity.handle().index()));
            Ok(())
        })
        .unwrap();
    world.update(0.1);

    let visited: Vec<_> = world.context().iter().map(|(_, index)| *index).collect();
    assert_eq!(visited, [0, 1, 2, 3]);
}

#[test]
fn test_movement_scenario() {
    let mut world = World::new::<(Pos, Vel)>(()).unwrap();
    let handle = world
        .add_entity((Pos(0.0, 0.0, 0.0), Vel(1.0, 0.0, 0.0)))
        .unwrap();
    world
        .add_system::<(Pos, Vel), _>(0, |dt, entity, _| {
            let vel = *entity.get::<Vel>()?;
            *entity.get_mut::<Pos>()? += vel * dt;
            Ok(())
        })
        .unwrap();

    world.update(2.0);
    assert_eq!(world.get::<Pos>(handle), Ok(&Pos(2.0, 0.0, 0.0)));
}

#[test]
fn test_two_systems_scenario() {
    let mut world = world();
    world.add_entity((Pos::default(), Vel::default())).unwrap();
    world
        .add_system::<(Pos,), _>(0, |_, _, calls| {
            calls.push(("position", 0));
            Ok(())
        })
        .unwrap();
    world
        .add_system::<(Pos, Vel), _>(1, |_, _, calls| {
            calls.push(("movement", 0));
            Ok(())
        })
        .unwrap();
    world.update(1.0 / 60.0);

    assert_eq!(world.context(), &[("movement", 0), ("position", 0)]);
}

#[test]
fn test_failing_system_does_not_stop_frame() {
    let mut world = world();
    world.add_entity((Pos::default(),)).unwrap();
    world.add_entity((Pos::default(),)).unwrap();

    world
        .add_system::<(Pos,), _>(2, |_, entity, calls| {
            calls.push(("failing", entity.handle().index()));
            entity.get::<Tag>()?;
            Ok(())
        })
        .unwrap();
    world
        .add_system::<(Pos,), _>(1, |_, entity, calls| {
            calls.push(("next", entity.handle().index()));
            Ok(())
        })
        .unwrap();
    world.update(1.0);

    assert_eq!(
        world.context(),
        &[("failing", 0), ("failing", 1), ("next", 0), ("next", 1)],
    );
}

#[test]
fn test_toggle_inside_system() {
    let mut world = world();
    let handle = world.add_entity((Pos::default(), Tag("once"))).unwrap();
    world
        .add_system::<(Tag,), _>(0, |_, entity, calls| {
            calls.push(("tag", entity.handle().index()));
            entity.disable::<Tag>()?;
            Ok(())
        })
        .unwrap();

    world.update(1.0);
    world.update(1.0);
    assert_eq!(world.context().len(), 1);
    let tag = world.id_of::<Tag>().unwrap();
    assert!(!world.entity(handle).unwrap().is_enabled(tag));
}

#[test]
fn test_system_over_undeclared_type() {
    let mut world = world();
    let result = world.add_system::<(Pos, u64), _>(0, |_, _, _| Ok(()));
    assert_eq!(
        result,
        Err(EcsError::TypeNotRegistered {
            type_name: type_name::<u64>(),
        }),
    );
    assert_eq!(world.system_count(), 0);
}

struct Counter {
    visited: usize,
}

impl System<Calls> for Counter {
    fn run(&mut self, _: DeltaTime, entity: &mut EntityMut<'_>, calls: &mut Calls) -> SystemResult {
        self.visited += 1;
        calls.push(("counter", entity.handle().index()));
        Ok(())
    }
}

#[test]
fn test_boxed_system() {
    let mut world = world();
    world.add_entity((Vel::default(),)).unwrap();
    world
        .add_boxed_system::<(Vel,)>(0, Box::new(Counter { visited: 0 }))
        .unwrap();
    world.update(1.0);
    world.update(1.0);

    assert_eq!(world.context(), &[("counter", 0), ("counter", 0)]);
    assert_eq!(world.systems().iter().next().map(SystemEntry::order), Some(0));
}
