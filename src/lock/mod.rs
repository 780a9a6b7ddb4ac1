mod error;
mod in_memory;
#[allow(clippy::module_inception)]
mod lock;

pub use error::LockError;
pub use in_memory::InMemoryCollectionLock;
pub use lock::{CollectionLock, ExclusiveGuard, SharedGuard};
