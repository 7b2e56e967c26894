//! Utilities for *systems* in ECS.

use std::error::Error;

pub use signature::{Bundle, Signature};

use super::{EntityMut, Mask};

mod signature;

/// Time in seconds between two frames.
pub type DeltaTime = f32;

/// Result of one system invocation.
pub type SystemResult = Result<(), Box<dyn Error + Send + Sync + 'static>>;

/// Objects of this trait represent *system* of ECS.
///
/// Implemented for every closure with matching signature.
///
pub trait System<C> {
    /// Handles one entity which has all components required by this system.
    ///
    /// Context is passed through by the ECS as is.
    ///
    fn run(&mut self, dt: DeltaTime, entity: &mut EntityMut<'_>, context: &mut C) -> SystemResult;
}

impl<C, F> System<C> for F
where
    F: FnMut(DeltaTime, &mut EntityMut<'_>, &mut C) -> SystemResult,
{
    fn run(&mut self, dt: DeltaTime, entity: &mut EntityMut<'_>, context: &mut C) -> SystemResult {
        self(dt, entity, context)
    }
}

/// System with its priority and mask of required components.
pub struct SystemEntry<C> {
    order: i32,
    mask: Mask,
    types: Box<[&'static str]>,
    system: Box<dyn System<C>>,
}

impl<C> SystemEntry<C> {
    /// Priority of the system: higher runs first.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Components required by the system.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Names of components required by the system.
    pub fn types(&self) -> &[&'static str] {
        &self.types
    }

    pub(crate) fn system_mut(&mut self) -> &mut dyn System<C> {
        self.system.as_mut()
    }
}

/// Ordered list of all systems of ECS.
///
/// Systems are sorted by descending order, systems with equal order keep insertion order.
///
pub struct SystemRegistry<C> {
    systems: Vec<SystemEntry<C>>,
}

impl<C> Default for SystemRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SystemRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty registry with space for at least `capacity` systems.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            systems: Vec::with_capacity(capacity),
        }
    }

    /// Appends new system and sorts all systems again.
    pub fn add(
        &mut self,
        order: i32,
        mask: Mask,
        types: Box<[&'static str]>,
        system: Box<dyn System<C>>,
    ) {
        self.systems.push(SystemEntry {
            order,
            mask,
            types,
            system,
        });
        // `sort_by` is stable
        self.systems.sort_by(|a, b| b.order.cmp(&a.order));
    }

    /// Count of systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if there are no systems.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Returns iterator over systems in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &SystemEntry<C>> {
        self.systems.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut SystemEntry<C>> {
        self.systems.iter_mut()
    }
}
