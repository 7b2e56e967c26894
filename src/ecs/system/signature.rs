//! Utilities for signatures of *systems* and bundles of *components* in ECS.

use std::any::{type_name, TypeId};
use std::collections::HashSet;

use crate::ecs::component::{Component, ComponentStorages, TypeRegistry};
use crate::ecs::entity::Entity;
use crate::ecs::error::*;
use crate::ecs::Mask;

/// Ordered list of component types.
///
/// Used to declare all component types of the ECS
/// and to describe which types are handled by the system.
///
pub trait Signature: 'static {
    /// [TypeId]s and names of all types in this signature in declaration order.
    fn types() -> Box<[(TypeId, &'static str)]>;

    /// Registers all types of this signature and creates storages for them.
    fn register(registry: &mut TypeRegistry, storages: &mut ComponentStorages) -> Result<()>;

    /// Builds mask with bits of all types in this signature.
    ///
    /// # Errors
    ///
    /// Fails if some type of this signature was not registered.
    ///
    fn mask(registry: &TypeRegistry) -> Result<Mask> {
        Self::types()
            .iter()
            .map(|&(type_id, type_name)| registry.id_of_raw(type_id, type_name))
            .map(|id| id.map(|id| id.index()))
            .collect()
    }

    /// Name of the first type which occurs in this signature more than once, if any.
    fn duplicate() -> Option<&'static str> {
        let mut seen = HashSet::new();
        Self::types()
            .iter()
            .find(|(type_id, _)| !seen.insert(*type_id))
            .map(|(_, type_name)| *type_name)
    }
}

/// Set of component values attached to one entity on creation.
pub trait Bundle: Signature + Sized {
    /// Moves all components into their storages and attaches them to the entity.
    ///
    /// All types of the bundle must be registered and distinct.
    ///
    fn push(
        self,
        registry: &TypeRegistry,
        storages: &mut ComponentStorages,
        entity: &mut Entity,
    ) -> Result<()>;
}

macro_rules! impl_signature {
    ($($name:ident),*) => {
        impl<$($name),*> Signature for ($($name,)*)
        where
            $($name: Component,)*
        {
            fn types() -> Box<[(TypeId, &'static str)]> {
                Box::from([$((TypeId::of::<$name>(), type_name::<$name>())),*])
            }

            #[allow(unused_variables)]
            fn register(
                registry: &mut TypeRegistry,
                storages: &mut ComponentStorages,
            ) -> Result<()> {
                $(
                    let id = registry.register::<$name>()?;
                    storages.create::<$name>(id);
                )*
                Ok(())
            }
        }

        impl<$($name),*> Bundle for ($($name,)*)
        where
            $($name: Component,)*
        {
            #[allow(non_snake_case, unused_variables)]
            fn push(
                self,
                registry: &TypeRegistry,
                storages: &mut ComponentStorages,
                entity: &mut Entity,
            ) -> Result<()> {
                let ($($name,)*) = self;
                $(
                    let id = registry.id_of::<$name>()?;
                    let slot = storages.storage_mut::<$name>(id)?.push($name);
                    entity.attach(id, slot);
                    entity.enable(id);
                )*
                Ok(())
            }
        }
    };
}

// Generate implementations for empty tuple (unit type)
// and for tuples up to 12 elements.
impl_signature!();
impl_signature!(A);
impl_signature!(A, B);
impl_signature!(A, B, C);
impl_signature!(A, B, C, D);
impl_signature!(A, B, C, D, E);
impl_signature!(A, B, C, D, E, F);
impl_signature!(A, B, C, D, E, F, G);
impl_signature!(A, B, C, D, E, F, G, H);
impl_signature!(A, B, C, D, E, F, G, H, I);
impl_signature!(A, B, C, D, E, F, G, H, I, J);
impl_signature!(A, B, C, D, E, F, G, H, I, J, K);
impl_signature!(A, B, C, D, E, F, G, H, I, J, K, L);
