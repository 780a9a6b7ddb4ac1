use super::LockError;

/// Reader/writer lock over one whole collection.
///
/// Any number of readers may hold the lock together; a writer holds it alone.
/// In-memory locks use `Mutex` + `Condvar`; a multi-process deployment might
/// back this with a lock file or a database advisory lock.
pub trait CollectionLock: Send + Sync {
    /// Acquire shared access, blocking while a writer holds or waits for the lock.
    fn lock_shared(&self) -> Result<(), LockError>;

    /// Acquire exclusive access, blocking until every holder has released.
    fn lock_exclusive(&self) -> Result<(), LockError>;

    /// Try to acquire exclusive access without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock_exclusive(&self) -> Result<bool, LockError>;

    /// Release shared access.
    fn unlock_shared(&self) -> Result<(), LockError>;

    /// Release exclusive access.
    fn unlock_exclusive(&self) -> Result<(), LockError>;
}

/// Shared access, released on drop.
pub struct SharedGuard<'a, L: CollectionLock + ?Sized> {
    lock: &'a L,
}

impl<'a, L: CollectionLock + ?Sized> SharedGuard<'a, L> {
    pub fn acquire(lock: &'a L) -> Result<Self, LockError> {
        lock.lock_shared()?;
        Ok(SharedGuard { lock })
    }
}

impl<L: CollectionLock + ?Sized> Drop for SharedGuard<'_, L> {
    fn drop(&mut self) {
        if let Err(e) = self.lock.unlock_shared() {
            tracing::warn!(error = %e, "failed to release shared collection lock");
        }
    }
}

/// Exclusive access, released on drop.
pub struct ExclusiveGuard<'a, L: CollectionLock + ?Sized> {
    lock: &'a L,
}

impl<'a, L: CollectionLock + ?Sized> ExclusiveGuard<'a, L> {
    pub fn acquire(lock: &'a L) -> Result<Self, LockError> {
        lock.lock_exclusive()?;
        Ok(ExclusiveGuard { lock })
    }
}

impl<L: CollectionLock + ?Sized> Drop for ExclusiveGuard<'_, L> {
    fn drop(&mut self) {
        if let Err(e) = self.lock.unlock_exclusive() {
            tracing::warn!(error = %e, "failed to release exclusive collection lock");
        }
    }
}
