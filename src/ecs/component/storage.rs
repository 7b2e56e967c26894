//! Utilities for storages of **components** of ECS.

use std::any::{type_name, Any};
use std::ops::{Index, IndexMut};

use super::{super::error::*, Component, ComponentTypeId};

/// Densely packed, append-only storage for statically typed components of ECS.
///
/// Slot index of the component is its position in the storage at the time of insertion.
///
#[derive(Debug)]
pub struct ComponentStore<T>
where
    T: Component,
{
    /// Components are actually stored here.
    components: Vec<T>,
}

impl<T> Default for ComponentStore<T>
where
    T: Component,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentStore<T>
where
    T: Component,
{
    /// Creates an empty component storage.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Appends component to the storage.
    ///
    /// Returns slot index of the new component.
    ///
    pub fn push(&mut self, component: T) -> usize {
        self.components.push(component);
        self.components.len() - 1
    }

    /// Retrieves an immutable reference to component in the slot.
    pub fn get(&self, slot: usize) -> Result<&T> {
        let len = self.components.len();
        self.components
            .get(slot)
            .ok_or_else(|| out_of_range::<T>(slot, len))
    }

    /// Retrieves a mutable reference to component in the slot.
    pub fn get_mut(&mut self, slot: usize) -> Result<&mut T> {
        let len = self.components.len();
        self.components
            .get_mut(slot)
            .ok_or_else(|| out_of_range::<T>(slot, len))
    }

    /// Count of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if storage contains no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns immutable iterator over all components in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.components.iter()
    }
}

fn out_of_range<T>(slot: usize, len: usize) -> EcsError {
    EcsError::SlotOutOfRange {
        type_name: type_name::<T>(),
        slot,
        len,
    }
}

impl<T> Index<usize> for ComponentStore<T>
where
    T: Component,
{
    type Output = T;

    fn index(&self, slot: usize) -> &Self::Output {
        &self.components[slot]
    }
}

impl<T> IndexMut<usize> for ComponentStore<T>
where
    T: Component,
{
    fn index_mut(&mut self, slot: usize) -> &mut Self::Output {
        &mut self.components[slot]
    }
}

/// Type-erased view of [`ComponentStore`].
trait ErasedStore {
    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> ErasedStore for ComponentStore<T>
where
    T: Component,
{
    fn len(&self) -> usize {
        self.components.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// All component storages of one ECS, one per registered component type.
#[derive(Default)]
pub struct ComponentStorages {
    /// Storage of the type with id `n` is at index `n - 1`.
    storages: Vec<Box<dyn ErasedStore>>,
}

impl ComponentStorages {
    /// Creates an empty set of storages.
    pub fn new() -> Self {
        Self {
            storages: Vec::new(),
        }
    }

    /// Creates the storage for components of type `T` with given id.
    ///
    /// Storages must be created in id order, right after the type was registered.
    ///
    pub(crate) fn create<T>(&mut self, id: ComponentTypeId)
    where
        T: Component,
    {
        debug_assert_eq!(id.index(), self.storages.len() + 1);
        self.storages.push(Box::new(ComponentStore::<T>::new()));
    }

    /// Retrieves storage of type `T` by its id.
    pub fn storage<T>(&self, id: ComponentTypeId) -> Result<&ComponentStore<T>>
    where
        T: Component,
    {
        self.erased(id)
            .and_then(|storage| storage.as_any().downcast_ref())
            .ok_or(EcsError::TypeNotRegistered {
                type_name: type_name::<T>(),
            })
    }

    /// Retrieves mutable storage of type `T` by its id.
    pub fn storage_mut<T>(&mut self, id: ComponentTypeId) -> Result<&mut ComponentStore<T>>
    where
        T: Component,
    {
        id.index()
            .checked_sub(1)
            .and_then(|index| self.storages.get_mut(index))
            .and_then(|storage| storage.as_any_mut().downcast_mut())
            .ok_or(EcsError::TypeNotRegistered {
                type_name: type_name::<T>(),
            })
    }

    /// Count of components in storage with given id, if there is such storage.
    pub fn len_of(&self, id: ComponentTypeId) -> Option<usize> {
        self.erased(id).map(|storage| storage.len())
    }

    fn erased(&self, id: ComponentTypeId) -> Option<&dyn ErasedStore> {
        let index = id.index().checked_sub(1)?;
        self.storages.get(index).map(Box::as_ref)
    }
}
