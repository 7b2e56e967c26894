//! Utilities for *entities* in ECS.

use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;

use super::component::{Component, ComponentStorages, ComponentTypeId, TypeRegistry};
use super::error::*;
use super::Mask;

/// Identifier of the *entity* of ECS: its position in the list of entities.
///
/// Entities are never removed, so the handle stays valid for the lifetime of its world.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(usize);

impl EntityHandle {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the entity in the list of entities.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "entity #{}", self.0)
    }
}

/// *Entity* of ECS: set of enabled components and slots of all attached components.
///
/// Bit `t` of the mask is set only if the entity has a slot for component type `t`
/// and that component is enabled.
///
#[derive(Debug, Clone, Default)]
pub struct Entity {
    mask: Mask,
    slots: BTreeMap<ComponentTypeId, usize>,
}

impl Entity {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mask of enabled components.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Slot of attached component with given type id, if any.
    pub fn slot(&self, id: ComponentTypeId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    /// Returns `true` if component with given type id is attached to the entity.
    pub fn has(&self, id: ComponentTypeId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Returns `true` if component with given type id is attached and enabled.
    pub fn is_enabled(&self, id: ComponentTypeId) -> bool {
        self.mask.test(id.index())
    }

    /// Returns iterator over type ids and slots of all attached components.
    pub fn components(&self) -> impl Iterator<Item = (ComponentTypeId, usize)> + '_ {
        self.slots.iter().map(|(id, slot)| (*id, *slot))
    }

    pub(crate) fn attach(&mut self, id: ComponentTypeId, slot: usize) {
        self.slots.insert(id, slot);
    }

    /// Returns `false` if there is no component to enable.
    pub(crate) fn enable(&mut self, id: ComponentTypeId) -> bool {
        if !self.has(id) {
            return false;
        }
        self.mask.set(id.index());
        true
    }

    /// Returns `false` if there is no component to disable.
    pub(crate) fn disable(&mut self, id: ComponentTypeId) -> bool {
        if !self.has(id) {
            return false;
        }
        if self.is_enabled(id) {
            self.mask.clear(id.index());
        } else {
            log::debug!("component {} is already disabled", id);
        }
        true
    }
}

pub(crate) fn get<'a, T>(
    handle: EntityHandle,
    entity: &Entity,
    registry: &TypeRegistry,
    storages: &'a ComponentStorages,
) -> Result<&'a T>
where
    T: Component,
{
    let id = registry.id_of::<T>()?;
    let slot = entity.slot(id).ok_or_else(|| not_attached::<T>(handle))?;
    storages.storage::<T>(id)?.get(slot)
}

pub(crate) fn get_mut<'a, T>(
    handle: EntityHandle,
    entity: &Entity,
    registry: &TypeRegistry,
    storages: &'a mut ComponentStorages,
) -> Result<&'a mut T>
where
    T: Component,
{
    let id = registry.id_of::<T>()?;
    let slot = entity.slot(id).ok_or_else(|| not_attached::<T>(handle))?;
    storages.storage_mut::<T>(id)?.get_mut(slot)
}

pub(crate) fn set_enabled<T>(
    handle: EntityHandle,
    entity: &mut Entity,
    registry: &TypeRegistry,
    enabled: bool,
) -> Result<()>
where
    T: Component,
{
    let id = registry.id_of::<T>()?;
    let done = if enabled {
        entity.enable(id)
    } else {
        entity.disable(id)
    };
    if done {
        return Ok(());
    }
    let error = not_attached::<T>(handle);
    let action = if enabled { "enable" } else { "disable" };
    log::warn!("failed to {} component: {}", action, error);
    Err(error)
}

fn not_attached<T>(entity: EntityHandle) -> EcsError {
    EcsError::ComponentNotAttached {
        entity,
        type_name: type_name::<T>(),
    }
}

/// Mutable view of one entity with access to its components.
///
/// This is what system callbacks receive for every matching entity.
///
pub struct EntityMut<'a> {
    handle: EntityHandle,
    entity: &'a mut Entity,
    registry: &'a TypeRegistry,
    storages: &'a mut ComponentStorages,
}

impl<'a> EntityMut<'a> {
    pub(crate) fn new(
        handle: EntityHandle,
        entity: &'a mut Entity,
        registry: &'a TypeRegistry,
        storages: &'a mut ComponentStorages,
    ) -> Self {
        Self {
            handle,
            entity,
            registry,
            storages,
        }
    }

    /// Handle of the entity.
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    /// Mask of enabled components of the entity.
    pub fn mask(&self) -> &Mask {
        self.entity.mask()
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has<T>(&self) -> bool
    where
        T: Component,
    {
        self.registry
            .id_of::<T>()
            .map(|id| self.entity.has(id))
            .unwrap_or(false)
    }

    /// Returns `true` if component of type `T` is attached to the entity and enabled.
    pub fn is_enabled<T>(&self) -> bool
    where
        T: Component,
    {
        self.registry
            .id_of::<T>()
            .map(|id| self.entity.is_enabled(id))
            .unwrap_or(false)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self) -> Result<&T>
    where
        T: Component,
    {
        get(self.handle, &*self.entity, self.registry, &*self.storages)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_mut<T>(&mut self) -> Result<&mut T>
    where
        T: Component,
    {
        get_mut(self.handle, &*self.entity, self.registry, &mut *self.storages)
    }

    /// Enables component of type `T` attached to the entity.
    pub fn enable<T>(&mut self) -> Result<()>
    where
        T: Component,
    {
        set_enabled::<T>(self.handle, &mut *self.entity, self.registry, true)
    }

    /// Disables component of type `T` attached to the entity.
    ///
    /// Component stays attached and can be enabled again with the same value.
    ///
    pub fn disable<T>(&mut self) -> Result<()>
    where
        T: Component,
    {
        set_enabled::<T>(self.handle, &mut *self.entity, self.registry, false)
    }
}
