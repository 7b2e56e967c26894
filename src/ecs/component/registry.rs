//! Registry of component types declared for one ECS.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::{super::error::*, super::mask::MAX_COMPONENTS, Component, ComponentTypeId};

/// Assigns each declared component type a small integer id.
///
/// Owned by exactly one [`World`](crate::ecs::World),
/// so independent worlds never share ids.
///
#[derive(Debug, Default)]
pub struct TypeRegistry {
    ids: HashMap<TypeId, ComponentTypeId>,
    names: Vec<&'static str>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// Registers component type `T` and returns its new id.
    pub fn register<T>(&mut self) -> Result<ComponentTypeId>
    where
        T: Component,
    {
        self.register_raw(TypeId::of::<T>(), type_name::<T>())
    }

    pub(crate) fn register_raw(
        &mut self,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Result<ComponentTypeId> {
        if self.ids.contains_key(&type_id) {
            return Err(EcsError::DuplicateType { type_name });
        }
        if self.names.len() >= MAX_COMPONENTS {
            return Err(EcsError::TooManyComponents {
                max: MAX_COMPONENTS,
            });
        }
        self.names.push(type_name);
        let id = ComponentTypeId(self.names.len() as u16);
        self.ids.insert(type_id, id);
        Ok(id)
    }

    /// Looks up the id of previously registered component type `T`.
    pub fn id_of<T>(&self) -> Result<ComponentTypeId>
    where
        T: Component,
    {
        self.id_of_raw(TypeId::of::<T>(), type_name::<T>())
    }

    pub(crate) fn id_of_raw(
        &self,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Result<ComponentTypeId> {
        self.ids
            .get(&type_id)
            .copied()
            .ok_or(EcsError::TypeNotRegistered { type_name })
    }

    /// Returns name of the component type with given id, if any.
    pub fn name_of(&self, id: ComponentTypeId) -> Option<&'static str> {
        let index = id.index().checked_sub(1)?;
        self.names.get(index).copied()
    }

    /// Count of registered component types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no component type was registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns iterator over all registered ids with type names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentTypeId, &'static str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (ComponentTypeId(index as u16 + 1), *name))
    }
}
