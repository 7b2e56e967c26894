//! Utilities for *components* in ECS.

use std::any::Any;
use std::fmt;

pub use registry::*;
pub use storage::*;

mod registry;
mod storage;

/// Objects of this trait represent *component* of ECS.
///
/// Components should be just plain data.
///
pub trait Component: Any {}

impl<T> Component for T where T: Any {}

/// Identifier of the component type inside of one ECS.
///
/// Ids are assigned in declaration order starting from 1.
/// They are meaningless outside of the [`World`](crate::ecs::World) which assigned them.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(u16);

impl ComponentTypeId {
    /// Index of the bit in [`Mask`](crate::ecs::Mask) for this component type.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
