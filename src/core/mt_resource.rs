use std::sync::Arc;

use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

/// A reference-counted resource container with read-write locking.
///
/// `MtResource` is how the world hands out its chunks: the registry owns one
/// handle per chunk, and mesh building or editing code clones the handle for as
/// long as it needs the chunk. It wraps an `Arc<parking_lot::RwLock<T>>`, so
/// locks never poison and guards can be narrowed to a field of `T` with
/// [`MtResource::map`] / [`MtResource::map_mut`].
///
/// # Examples
///
/// ```
/// use voxel_world::core::MtResource;
///
/// let counter = MtResource::new(0);
/// *counter.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
///
/// let pair = MtResource::new((1, 2));
/// *pair.map_mut(|p| &mut p.1) = 5;
/// assert_eq!(*pair.map(|p| &p.1), 5);
/// ```
///
/// # Deadlocks
/// A thread holding a write guard must not request another guard on the same
/// resource. Chunk meshing relies on this: a chunk answers queries for its own
/// cells locally and only locks *other* chunks.
pub struct MtResource<T> {
    resource: Arc<RwLock<T>>,
}

impl<T> MtResource<T> {
    /// Creates a new `MtResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read-only guard for the contained value.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read()
    }

    /// Returns a write guard for the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write()
    }

    /// Returns a read guard narrowed to a part of the contained value.
    pub fn map<U, F>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
    where
        F: FnOnce(&T) -> &U,
    {
        RwLockReadGuard::map(self.resource.read(), f)
    }

    /// Returns a write guard narrowed to a part of the contained value.
    pub fn map_mut<U, F>(&self, f: F) -> MappedRwLockWriteGuard<'_, U>
    where
        F: FnOnce(&mut T) -> &mut U,
    {
        RwLockWriteGuard::map(self.resource.write(), f)
    }

    /// Returns `true` if both handles point at the same resource.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.resource, &other.resource)
    }

    /// Number of live handles to this resource.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.resource)
    }
}

impl<T> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_value() {
        let resource = MtResource::new(vec![1, 2, 3]);
        let clone = resource.clone();

        clone.get_mut().push(4);

        assert_eq!(resource.get().len(), 4);
        assert!(resource.ptr_eq(&clone));
        assert_eq!(resource.handle_count(), 2);
    }

    #[test]
    fn mapped_guards_reach_into_the_value() {
        let resource = MtResource::new([0u8; 4]);
        *resource.map_mut(|a| &mut a[2]) = 9;
        assert_eq!(*resource.map(|a| &a[2]), 9);
        assert_eq!(*resource.get(), [0, 0, 9, 0]);
    }

    #[test]
    fn distinct_resources_are_not_ptr_eq() {
        let a = MtResource::new(1);
        let b = MtResource::new(1);
        assert!(!a.ptr_eq(&b));
    }
}
