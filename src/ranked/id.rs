use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// How many fresh identifiers an insert tries before giving up.
pub const MAX_ID_ATTEMPTS: usize = 5;

/// Source of candidate identifiers. Candidates may collide; callers check them
/// against the collection and ask again.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> i64;
}

/// Unix milliseconds plus a random offset below 1000.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockIdSource;

impl IdSource for ClockIdSource {
    fn next_id(&self) -> i64 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        millis + rand::thread_rng().gen_range(0..1000)
    }
}

/// Draw identifiers from `source` until one is not `taken`.
///
/// Returns `Err(attempts)` when every attempt collided.
pub fn fresh_id(source: &dyn IdSource, taken: impl Fn(i64) -> bool) -> Result<i64, usize> {
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let candidate = source.next_id();
        if !taken(candidate) {
            return Ok(candidate);
        }
        tracing::warn!(candidate, attempt, "generated identifier already in use");
    }
    Err(MAX_ID_ATTEMPTS)
}
