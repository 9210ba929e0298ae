//! Object identity.
//!
//! Every widget owns an [`ObjectBase`], which registers it in a process-wide
//! registry and hands out a stable [`ObjectId`]. Timers and the widget host
//! refer to widgets by id only, so nothing outside the owner holds a pointer
//! to the widget itself.

use std::any::Any;
use std::sync::OnceLock;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::ObjectError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// Ids become invalid once the owning [`ObjectBase`] is dropped.
    pub struct ObjectId;
}

#[derive(Debug)]
struct ObjectEntry {
    type_name: &'static str,
}

static REGISTRY: OnceLock<Mutex<SlotMap<ObjectId, ObjectEntry>>> = OnceLock::new();

fn registry() -> &'static Mutex<SlotMap<ObjectId, ObjectEntry>> {
    REGISTRY.get_or_init(|| Mutex::new(SlotMap::with_key()))
}

/// The Rust type name an object was registered with.
pub fn type_name_of(id: ObjectId) -> Result<&'static str, ObjectError> {
    registry()
        .lock()
        .get(id)
        .map(|entry| entry.type_name)
        .ok_or(ObjectError::InvalidObjectId)
}

/// Base trait for identifiable objects.
pub trait Object: Any + Send + Sync {
    /// This object's unique identifier.
    fn object_id(&self) -> ObjectId;
}

/// Registration handle embedded in every object.
#[derive(Debug)]
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a new object of type `T`.
    pub fn new<T: Object + 'static>() -> Self {
        let type_name = std::any::type_name::<T>();
        let id = registry().lock().insert(ObjectEntry { type_name });
        tracing::trace!(target: targets::OBJECT, ?id, type_name, "object registered");
        Self { id }
    }

    /// The registered id.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        registry().lock().remove(self.id);
        tracing::trace!(target: targets::OBJECT, id = ?self.id, "object unregistered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        base: ObjectBase,
    }

    impl Object for Dummy {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    #[test]
    fn test_register_and_drop() {
        let dummy = Dummy {
            base: ObjectBase::new::<Dummy>(),
        };
        let id = dummy.object_id();
        assert!(type_name_of(id).unwrap().ends_with("Dummy"));

        drop(dummy);
        assert_eq!(type_name_of(id), Err(ObjectError::InvalidObjectId));
    }

    #[test]
    fn test_ids_are_distinct() {
        let a = ObjectBase::new::<Dummy>();
        let b = ObjectBase::new::<Dummy>();
        assert_ne!(a.id(), b.id());
    }
}
