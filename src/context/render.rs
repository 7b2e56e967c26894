//! Headless table of renderable objects.

use slotmap::{new_key_type, SlotMap};
use ultraviolet::Vec3;

use super::Renderer;

new_key_type! {
    /// Unique identifier of the renderable object.
    pub struct ObjectId;
}

/// Uniform data of one renderable object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectUbo {
    pub position: Vec3,
}

impl Default for ObjectUbo {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.5, 0.0, 1.0),
        }
    }
}

/// Storage of uniform data of all renderable objects.
///
/// Stands in for the graphics backend wherever no GPU is available.
///
#[derive(Debug, Default)]
pub struct RenderObjects {
    objects: SlotMap<ObjectId, ObjectUbo>,
}

impl RenderObjects {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Adds new object with default uniform data.
    pub fn add_object(&mut self) -> ObjectId {
        self.objects.insert(ObjectUbo::default())
    }

    /// Count of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if there are no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns iterator over all objects with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &ObjectUbo)> {
        self.objects.iter()
    }
}

impl Renderer for RenderObjects {
    fn object(&self, id: ObjectId) -> Option<&ObjectUbo> {
        self.objects.get(id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut ObjectUbo> {
        self.objects.get_mut(id)
    }
}
