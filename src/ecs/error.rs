//! Error types of the ECS core.

use thiserror::Error;

use super::EntityHandle;

/// Result of any ECS operation which can fail.
pub type Result<T> = std::result::Result<T, EcsError>;

/// Error that can happen while building or using the ECS.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    #[error("component type `{type_name}` was not declared for this ECS")]
    TypeNotRegistered { type_name: &'static str },

    #[error("component type `{type_name}` was declared more than once")]
    DuplicateType { type_name: &'static str },

    #[error("cannot declare more than {max} component types")]
    TooManyComponents { max: usize },

    #[error("component type `{type_name}` was given more than once for one entity")]
    DuplicateComponent { type_name: &'static str },

    #[error("component `{type_name}` is not attached to {entity}")]
    ComponentNotAttached {
        entity: EntityHandle,
        type_name: &'static str,
    },

    #[error("slot {slot} is out of range for `{type_name}` storage of length {len}")]
    SlotOutOfRange {
        type_name: &'static str,
        slot: usize,
        len: usize,
    },

    #[error("mask of {entity} has bit {bit} set without an attached component")]
    MaskMismatch { entity: EntityHandle, bit: usize },

    #[error("{0} does not exist")]
    EntityNotFound(EntityHandle),
}
