use std::sync::{Condvar, Mutex};

use super::{CollectionLock, LockError};

#[derive(Debug, Default)]
struct LockState {
    readers: usize,
    writer: bool,
    waiting_writers: usize,
}

/// In-memory reader/writer lock backed by `Mutex<LockState>` + `Condvar`.
///
/// Waiting writers block new readers, so a steady stream of reads cannot
/// starve a write.
pub struct InMemoryCollectionLock {
    state: Mutex<LockState>,
    wake: Condvar,
}

impl InMemoryCollectionLock {
    pub fn new() -> Self {
        InMemoryCollectionLock {
            state: Mutex::new(LockState::default()),
            wake: Condvar::new(),
        }
    }
}

impl Default for InMemoryCollectionLock {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionLock for InMemoryCollectionLock {
    fn lock_shared(&self) -> Result<(), LockError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        while state.writer || state.waiting_writers > 0 {
            state = self
                .wake
                .wait(state)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
        }
        state.readers += 1;
        Ok(())
    }

    fn lock_exclusive(&self) -> Result<(), LockError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        state.waiting_writers += 1;
        while state.writer || state.readers > 0 {
            state = match self.wake.wait(state) {
                Ok(state) => state,
                Err(e) => return Err(LockError::Poisoned(e.to_string())),
            };
        }
        state.waiting_writers -= 1;
        state.writer = true;
        Ok(())
    }

    fn try_lock_exclusive(&self) -> Result<bool, LockError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if state.writer || state.readers > 0 {
            Ok(false)
        } else {
            state.writer = true;
            Ok(true)
        }
    }

    fn unlock_shared(&self) -> Result<(), LockError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if state.readers == 0 {
            return Err(LockError::ReleaseFailed("no shared holder".into()));
        }
        state.readers -= 1;
        if state.readers == 0 {
            self.wake.notify_all();
        }
        Ok(())
    }

    fn unlock_exclusive(&self) -> Result<(), LockError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if state.writer {
            state.writer = false;
            self.wake.notify_all();
        }
        Ok(())
    }
}
