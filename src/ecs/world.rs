//! Utilities for storage of ECS.

use std::error::Error;

use crate::config::Config;

use super::component::{Component, ComponentStorages, ComponentTypeId, TypeRegistry};
use super::entity::{self, Entity, EntityHandle, EntityMut};
use super::error::*;
use super::system::{Bundle, DeltaTime, Signature, System, SystemRegistry, SystemResult};

/// Storage for entities, components and systems of ECS.
///
/// Component types are declared once on creation; entities and systems are added later.
/// Context of type `C` is owned by the world and passed to every system as is.
///
/// Systems must not rely on adding entities or systems while [`World::update`] runs:
/// they only receive the current entity and the context.
///
pub struct World<C> {
    config: Config,
    /// Ids of all declared component types.
    registry: TypeRegistry,
    /// One storage per declared component type.
    storages: ComponentStorages,
    /// All entities in insertion order.
    entities: Vec<Entity>,
    systems: SystemRegistry<C>,
    context: C,
}

impl<C> World<C> {
    /// Creates new world with component types from signature `L`
    /// and default configuration.
    pub fn new<L>(context: C) -> Result<Self>
    where
        L: Signature,
    {
        Self::with_config::<L>(Config::default(), context)
    }

    /// Creates new world with component types from signature `L`.
    ///
    /// # Errors
    ///
    /// Fails if `L` contains the same type twice
    /// or more than [`MAX_COMPONENTS`](super::MAX_COMPONENTS) types.
    ///
    pub fn with_config<L>(config: Config, context: C) -> Result<Self>
    where
        L: Signature,
    {
        let mut registry = TypeRegistry::new();
        let mut storages = ComponentStorages::new();
        L::register(&mut registry, &mut storages)?;
        log::debug!(
            "{} component types were declared for \"{}\"",
            registry.len(),
            config.name(),
        );

        Ok(Self {
            entities: Vec::with_capacity(config.entity_capacity()),
            systems: SystemRegistry::with_capacity(config.system_capacity()),
            config,
            registry,
            storages,
            context,
        })
    }

    /// Configuration of this world.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registry of all declared component types.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Storages of all declared component types.
    pub fn storages(&self) -> &ComponentStorages {
        &self.storages
    }

    /// Looks up the id of declared component type `T`.
    pub fn id_of<T>(&self) -> Result<ComponentTypeId>
    where
        T: Component,
    {
        self.registry.id_of::<T>()
    }

    /// Context passed to all systems.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable context passed to all systems.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consumes the world and returns its context.
    pub fn into_context(self) -> C {
        self.context
    }

    /// Creates new entity with given components, all of them enabled.
    ///
    /// # Errors
    ///
    /// Fails without any change if some component type was not declared
    /// or given more than once.
    ///
    pub fn add_entity<B>(&mut self, components: B) -> Result<EntityHandle>
    where
        B: Bundle,
    {
        B::mask(&self.registry)?;
        if let Some(type_name) = B::duplicate() {
            return Err(EcsError::DuplicateComponent { type_name });
        }

        let mut entity = Entity::new();
        components.push(&self.registry, &mut self.storages, &mut entity)?;
        let handle = EntityHandle::new(self.entities.len());
        log::debug!("{} created with mask {:?}", handle, entity.mask());
        self.entities.push(entity);
        Ok(handle)
    }

    /// Retrieves entity by its handle.
    pub fn entity(&self, handle: EntityHandle) -> Result<&Entity> {
        self.entities
            .get(handle.index())
            .ok_or(EcsError::EntityNotFound(handle))
    }

    /// Retrieves mutable view of entity by its handle.
    pub fn entity_mut(&mut self, handle: EntityHandle) -> Result<EntityMut<'_>> {
        let entity = self
            .entities
            .get_mut(handle.index())
            .ok_or(EcsError::EntityNotFound(handle))?;
        Ok(EntityMut::new(
            handle,
            entity,
            &self.registry,
            &mut self.storages,
        ))
    }

    /// Returns iterator over all entities with their handles in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (EntityHandle::new(index), entity))
    }

    /// Count of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self, handle: EntityHandle) -> Result<&T>
    where
        T: Component,
    {
        let entity = self.entity(handle)?;
        entity::get(handle, entity, &self.registry, &self.storages)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_mut<T>(&mut self, handle: EntityHandle) -> Result<&mut T>
    where
        T: Component,
    {
        let entity = self
            .entities
            .get(handle.index())
            .ok_or(EcsError::EntityNotFound(handle))?;
        entity::get_mut(handle, entity, &self.registry, &mut self.storages)
    }

    /// Enables component of type `T` attached to the entity.
    pub fn enable<T>(&mut self, handle: EntityHandle) -> Result<()>
    where
        T: Component,
    {
        self.entity_mut(handle)?.enable::<T>()
    }

    /// Disables component of type `T` attached to the entity.
    pub fn disable<T>(&mut self, handle: EntityHandle) -> Result<()>
    where
        T: Component,
    {
        self.entity_mut(handle)?.disable::<T>()
    }

    /// Adds new system which will handle all entities with components from signature `S`.
    ///
    /// Systems with higher `order` run first.
    ///
    pub fn add_system<S, F>(&mut self, order: i32, callback: F) -> Result<()>
    where
        S: Signature,
        F: FnMut(DeltaTime, &mut EntityMut<'_>, &mut C) -> SystemResult + 'static,
    {
        self.add_boxed_system::<S>(order, Box::new(callback))
    }

    /// Adds new system object which will handle all entities with components from signature `S`.
    pub fn add_boxed_system<S>(&mut self, order: i32, system: Box<dyn System<C>>) -> Result<()>
    where
        S: Signature,
    {
        let mask = S::mask(&self.registry)?;
        let types: Box<[_]> = S::types().iter().map(|(_, name)| *name).collect();
        log::debug!("system over {:?} added with order {}", types, order);
        self.systems.add(order, mask, types, system);
        Ok(())
    }

    /// All systems in execution order.
    pub fn systems(&self) -> &SystemRegistry<C> {
        &self.systems
    }

    /// Count of systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Runs one frame: every system, in order, over every matching entity, in insertion order.
    ///
    /// Errors returned by systems are logged and do not stop the frame.
    /// Consistency failures of the storage are logged as errors, all others as warnings.
    ///
    pub fn update(&mut self, dt: DeltaTime) {
        let Self {
            registry,
            storages,
            entities,
            systems,
            context,
            ..
        } = self;

        for entry in systems.iter_mut() {
            let mask = *entry.mask();
            for (index, entity) in entities.iter_mut().enumerate() {
                if !mask.matches(entity.mask()) {
                    continue;
                }
                let handle = EntityHandle::new(index);
                log::trace!("running system over {:?} on {}", entry.types(), handle);
                let mut view = EntityMut::new(handle, entity, &*registry, &mut *storages);
                let error = match entry.system_mut().run(dt, &mut view, context) {
                    Ok(()) => continue,
                    Err(error) => error,
                };
                if is_consistency_failure(error.as_ref()) {
                    log::error!(
                        "ECS consistency failure in system over {:?} on {}: {}",
                        entry.types(),
                        handle,
                        error,
                    );
                } else {
                    log::warn!(
                        "system over {:?} failed on {}: {}",
                        entry.types(),
                        handle,
                        error,
                    );
                }
            }
        }

        if self.config.enable_validation() {
            if let Err(error) = self.validate() {
                log::error!("ECS validation failure: {}", error);
            }
        }
    }

    /// Checks that every enabled component of every entity is attached
    /// and that every slot points into its storage.
    pub fn validate(&self) -> Result<()> {
        for (handle, entity) in self.entities() {
            for bit in entity.mask().ones() {
                let attached = entity.components().any(|(id, _)| id.index() == bit);
                if !attached {
                    return Err(EcsError::MaskMismatch { entity: handle, bit });
                }
            }
            for (id, slot) in entity.components() {
                let type_name = self.registry.name_of(id).unwrap_or("<unknown>");
                let len = self.storages.len_of(id).unwrap_or(0);
                if slot >= len {
                    return Err(EcsError::SlotOutOfRange {
                        type_name,
                        slot,
                        len,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Returns `true` if the error means that storages and entities disagree.
fn is_consistency_failure(error: &(dyn Error + Send + Sync + 'static)) -> bool {
    matches!(
        error.downcast_ref::<EcsError>(),
        Some(EcsError::SlotOutOfRange { .. } | EcsError::MaskMismatch { .. }),
    )
}
