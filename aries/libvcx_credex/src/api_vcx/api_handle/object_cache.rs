use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::errors::error::prelude::*;

const INDEX_BITS: u32 = 20;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;
const GENERATION_MASK: u32 = (1 << (32 - INDEX_BITS)) - 1;
/// Slot positions are stored as `index + 1` so no live handle is ever `0`.
const MAX_SLOTS: usize = INDEX_MASK as usize;

type Entry<T> = Arc<Mutex<T>>;

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

#[derive(Debug)]
struct Slots<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    live: usize,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Slots {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }
}

fn encode_handle(index: usize, generation: u32) -> u32 {
    // index < MAX_SLOTS, checked on allocation
    (generation << INDEX_BITS) | (index as u32 + 1)
}

fn decode_handle(handle: u32) -> Option<(usize, u32)> {
    let position = handle & INDEX_MASK;
    if position == 0 {
        return None;
    }
    Some(((position - 1) as usize, handle >> INDEX_BITS))
}

fn next_generation(generation: u32) -> u32 {
    match (generation + 1) & GENERATION_MASK {
        0 => 1,
        next => next,
    }
}

/// Handle indexed store of protocol objects.
///
/// Every object sits behind its own async mutex, so an operation may hold it across awaits
/// while other handles stay usable. The slot table lock itself is never held across an await.
#[derive(Debug)]
pub struct ObjectCache<T> {
    cache_name: String,
    store: RwLock<Slots<T>>,
}

impl<T> ObjectCache<T> {
    pub fn new(cache_name: &str) -> Self {
        Self {
            cache_name: cache_name.to_string(),
            store: RwLock::new(Slots::default()),
        }
    }

    fn _lock_store_read(&self) -> LibvcxResult<RwLockReadGuard<'_, Slots<T>>> {
        self.store.read().map_err(|err| {
            error!("Unable to read-lock Object Store: {:?}", err);
            LibvcxError::from_msg(
                LibvcxErrorKind::PoisonedLock,
                format!("[ObjectCache: {}] Unable to lock Object Store: {:?}", self.cache_name, err),
            )
        })
    }

    fn _lock_store_write(&self) -> LibvcxResult<RwLockWriteGuard<'_, Slots<T>>> {
        self.store.write().map_err(|err| {
            error!("Unable to write-lock Object Store: {:?}", err);
            LibvcxError::from_msg(
                LibvcxErrorKind::PoisonedLock,
                format!("[ObjectCache: {}] Unable to lock Object Store: {:?}", self.cache_name, err),
            )
        })
    }

    fn invalid_handle(&self, handle: u32) -> LibvcxError {
        LibvcxError::from_msg(
            LibvcxErrorKind::InvalidHandle,
            format!("[ObjectCache: {}] Object not found for handle: {}", self.cache_name, handle),
        )
    }

    fn resolve(&self, handle: u32) -> LibvcxResult<Entry<T>> {
        let (index, generation) = decode_handle(handle).ok_or_else(|| self.invalid_handle(handle))?;
        let store = self._lock_store_read()?;
        match store.slots.get(index) {
            Some(Slot {
                generation: slot_generation,
                entry: Some(entry),
            }) if *slot_generation == generation => Ok(Arc::clone(entry)),
            _ => Err(self.invalid_handle(handle)),
        }
    }

    pub fn has_handle(&self, handle: u32) -> bool {
        self.resolve(handle).is_ok()
    }

    pub fn add(&self, obj: T) -> LibvcxResult<u32> {
        let mut store = self._lock_store_write()?;
        let entry = Arc::new(Mutex::new(obj));
        let index = match store.free.pop() {
            Some(index) => index,
            None if store.slots.len() < MAX_SLOTS => {
                store.slots.push(Slot {
                    generation: 1,
                    entry: None,
                });
                store.slots.len() - 1
            }
            None => {
                return Err(LibvcxError::from_msg(
                    LibvcxErrorKind::UnknownError,
                    format!("[ObjectCache: {}] No free handles left", self.cache_name),
                ))
            }
        };
        let slot = &mut store.slots[index];
        slot.entry = Some(entry);
        let handle = encode_handle(index, slot.generation);
        store.live += 1;
        Ok(handle)
    }

    /// Exclusive access to the object until the guard is dropped. Fails with `InvalidHandle`
    /// if the handle was released while waiting for the lock.
    pub async fn lock(&self, handle: u32) -> LibvcxResult<OwnedMutexGuard<T>> {
        let entry = self.resolve(handle)?;
        let guard = Arc::clone(&entry).lock_owned().await;
        match self.resolve(handle) {
            Ok(current) if Arc::ptr_eq(&current, &entry) => Ok(guard),
            _ => Err(self.invalid_handle(handle)),
        }
    }

    pub async fn get<F, R>(&self, handle: u32, closure: F) -> LibvcxResult<R>
    where
        F: FnOnce(&T) -> LibvcxResult<R>,
    {
        let guard = self.lock(handle).await?;
        closure(&guard)
    }

    pub fn release(&self, handle: u32) -> LibvcxResult<()> {
        let (index, generation) = decode_handle(handle).ok_or_else(|| self.invalid_handle(handle))?;
        let mut store = self._lock_store_write()?;
        let slot = match store.slots.get_mut(index) {
            Some(slot) if slot.generation == generation && slot.entry.is_some() => slot,
            _ => return Err(self.invalid_handle(handle)),
        };
        slot.entry = None;
        slot.generation = next_generation(slot.generation);
        store.free.push(index);
        store.live -= 1;
        Ok(())
    }

    /// Releases every live handle, returning how many were released.
    pub fn drain(&self) -> LibvcxResult<usize> {
        let mut store = self._lock_store_write()?;
        let Slots { slots, free, live } = &mut *store;
        for (index, slot) in slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = next_generation(slot.generation);
                free.push(index);
            }
        }
        Ok(std::mem::replace(live, 0))
    }

    pub fn len(&self) -> LibvcxResult<usize> {
        Ok(self._lock_store_read()?.live)
    }

    pub fn is_empty(&self) -> LibvcxResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;

    async fn _get_cloned<T: Clone>(cache: &ObjectCache<T>, handle: u32) -> LibvcxResult<T> {
        cache.get(handle, |obj| Ok(obj.clone())).await
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let cache = ObjectCache::<String>::new("cache-add-get");
        let handle = cache.add("alice".to_string()).unwrap();
        assert_ne!(handle, 0);
        assert!(cache.has_handle(handle));
        assert_eq!(_get_cloned(&cache, handle).await.unwrap(), "alice");
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_handle_zero_is_invalid() {
        let cache = ObjectCache::<u32>::new("cache-zero");
        assert_eq!(
            _get_cloned(&cache, 0).await.unwrap_err().kind(),
            LibvcxErrorKind::InvalidHandle
        );
        assert_eq!(cache.release(0).unwrap_err().kind(), LibvcxErrorKind::InvalidHandle);
    }

    #[tokio::test]
    async fn test_stale_handle_misses_after_slot_reuse() {
        let cache = ObjectCache::<u32>::new("cache-stale");
        let first = cache.add(1).unwrap();
        cache.release(first).unwrap();
        let second = cache.add(2).unwrap();

        assert_ne!(first, second);
        assert_eq!(first & INDEX_MASK, second & INDEX_MASK);
        assert_eq!(
            _get_cloned(&cache, first).await.unwrap_err().kind(),
            LibvcxErrorKind::InvalidHandle
        );
        assert_eq!(_get_cloned(&cache, second).await.unwrap(), 2);
        assert_eq!(cache.release(first).unwrap_err().kind(), LibvcxErrorKind::InvalidHandle);
    }

    #[tokio::test]
    async fn test_handles_are_unique() {
        let cache = ObjectCache::<usize>::new("cache-unique");
        let mut handles: Vec<u32> = (0..100).map(|i| cache.add(i).unwrap()).collect();
        handles.sort_unstable();
        handles.dedup();
        assert_eq!(handles.len(), 100);
    }

    #[tokio::test]
    async fn test_drain() {
        let cache = ObjectCache::<u32>::new("cache-drain");
        let handles: Vec<u32> = (0..5).map(|i| cache.add(i).unwrap()).collect();
        assert_eq!(cache.drain().unwrap(), 5);
        assert!(cache.is_empty().unwrap());
        for handle in handles {
            assert!(!cache.has_handle(handle));
        }
    }

    #[tokio::test]
    async fn test_lock_serializes_same_handle() {
        let cache = Arc::new(ObjectCache::<Vec<u32>>::new("cache-serialize"));
        let handle = cache.add(vec![]).unwrap();

        let mut guard = cache.lock(handle).await.unwrap();
        let cache_clone = Arc::clone(&cache);
        let waiter = tokio::spawn(async move {
            let mut guard = cache_clone.lock(handle).await.unwrap();
            guard.push(2);
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        guard.push(1);
        drop(guard);
        waiter.await.unwrap();

        assert_eq!(_get_cloned(&*cache, handle).await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_lock_fails_when_released_while_waiting() {
        let cache = Arc::new(ObjectCache::<u32>::new("cache-release-waiting"));
        let handle = cache.add(1).unwrap();

        let guard = cache.lock(handle).await.unwrap();
        let cache_clone = Arc::clone(&cache);
        let waiter = tokio::spawn(async move { cache_clone.lock(handle).await.map(|_| ()) });
        tokio::time::sleep(Duration::from_millis(20)).await;
        cache.release(handle).unwrap();
        drop(guard);

        assert_eq!(
            waiter.await.unwrap().unwrap_err().kind(),
            LibvcxErrorKind::InvalidHandle
        );
    }

    #[test]
    fn test_generation_wraps_without_zero() {
        assert_eq!(next_generation(GENERATION_MASK), 1);
        assert_eq!(next_generation(1), 2);
    }
}
