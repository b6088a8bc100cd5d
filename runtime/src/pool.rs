//! Handling heap-allocated vectors.

use crate::handle::Handle;
use crate::vector::NativeVector;
use crate::Error;
use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;

/// The global [Pool] that every [NativeVector] handed to the target side is stored.
pub static VECTORS: Lazy<Pool<NativeVector>> = Lazy::new(Default::default);

/// Thread-safe collection of objects only exposed to the target side by their [Handle].
///
/// The target side does not know when native memory may be freed, so it must call
/// [take](Pool::take) explicitly. Stale handles are reported as [Error::InvalidHandle] instead of
/// pointing to freed memory.
pub struct Pool<T> {
    pool: RwLock<HashMap<Handle, Arc<Mutex<Option<T>>>>>,
    counter: AtomicI64,
}

impl<T> Pool<T> {
    /// Runs an action on an object.
    pub fn peek<R>(&self, handle: Handle, action: impl FnOnce(&mut T) -> R) -> Result<R> {
        let pool_guard = self.pool.read().unwrap_or_else(PoisonError::into_inner);
        let obj_arc = pool_guard
            .get(&handle)
            .cloned()
            .ok_or(Error::InvalidHandle(handle))?;
        drop(pool_guard);

        let mut obj = obj_arc.lock().unwrap_or_else(PoisonError::into_inner);
        obj.as_mut()
            .map(action)
            .ok_or(Error::InvalidHandle(handle))
    }

    /// Removes the object pointed by the [Handle] and hands it back.
    pub fn take(&self, handle: Handle) -> Result<T> {
        let obj_arc = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle)
            .ok_or(Error::InvalidHandle(handle))?;
        let mut obj = obj_arc.lock().unwrap_or_else(PoisonError::into_inner);
        obj.take().ok_or(Error::InvalidHandle(handle))
    }

    /// Stores an object.
    ///
    /// New [Handle]s are monotonically increasing and never `0`.
    pub fn store(&self, obj: T) -> Handle {
        let mut pool_guard = self.pool.write().unwrap_or_else(PoisonError::into_inner);
        let handle = self.counter.fetch_add(1, Ordering::Relaxed);
        pool_guard.insert(handle, Arc::new(Mutex::new(Some(obj))));
        handle
    }

    pub fn len(&self) -> usize {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            pool: HashMap::with_capacity(0).into(),
            counter: 1.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn handles_are_never_null() {
        let pool = Pool::default();
        let first = pool.store("first");
        let second = pool.store("second");
        assert_ne!(0, first);
        assert!(second > first);
        assert_eq!(2, pool.len());
    }

    #[test]
    fn peek() {
        let pool = Pool::default();
        let handle = pool.store(vec![1, 2]);
        pool.peek(handle, |v| v.push(3)).unwrap();

        let expected = Ok(vec![1, 2, 3]);
        let actual = pool.peek(handle, |v| v.clone());
        assert_eq!(expected, actual);
    }

    #[test]
    fn take_once() {
        let pool = Pool::default();
        let handle = pool.store(String::from("vector"));
        assert!(!pool.is_empty());

        assert_eq!(Ok(String::from("vector")), pool.take(handle));
        assert!(pool.is_empty());
        assert_eq!(Err(Error::InvalidHandle(handle)), pool.take(handle));
        assert_eq!(Err(Error::InvalidHandle(handle)), pool.peek(handle, |_| ()));
    }

    #[test]
    fn unknown_handle() {
        let pool = Pool::<()>::default();
        assert_eq!(Err(Error::InvalidHandle(0)), pool.peek(0, |_| ()));
        assert_eq!(Err(Error::InvalidHandle(0)), pool.take(0));
    }
}
