//! Time sources for store-assigned timestamps.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// With a step configured, every reading advances the clock by that step,
/// which gives consecutive inserts distinct, increasing timestamps.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

#[derive(Debug)]
struct ManualState {
    current: DateTime<Utc>,
    step: Duration,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, Duration::zero())
    }

    pub fn with_step(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                current: start,
                step,
            })),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.lock().current = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut state = self.lock();
        state.current += by;
    }

    /// Current reading without advancing.
    pub fn peek(&self) -> DateTime<Utc> {
        self.lock().current
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut state = self.lock();
        let now = state.current;
        let step = state.step;
        state.current = now + step;
        now
    }
}
