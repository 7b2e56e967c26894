//! Entity Component System (ECS) utilities for game engine.

pub use component::{Component, ComponentStore, ComponentStorages, ComponentTypeId, TypeRegistry};
pub use entity::{Entity, EntityHandle, EntityMut};
pub use error::{EcsError, Result};
pub use mask::{Mask, MASK_WORDS, MAX_COMPONENTS};
pub use system::{
    Bundle, DeltaTime, Signature, System, SystemEntry, SystemRegistry, SystemResult,
};
pub use world::World;

mod component;
mod entity;
mod error;
mod mask;
mod system;
mod world;

#[cfg(test)]
mod tests;
