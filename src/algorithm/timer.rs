//! Clock port and solve stopwatch
//!
//! Elapsed time is always recomputed from the monotonic start reading, never
//! accumulated from periodic ticks.

use chrono::{DateTime, TimeDelta, Utc};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic and wall-clock time
pub trait Clock {
    /// Monotonic reading, measured from an arbitrary fixed origin
    fn monotonic(&self) -> Duration;

    /// Current wall-clock time
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose monotonic origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock; clones share the same reading
#[derive(Clone, Debug)]
pub struct ManualClock {
    offset: Rc<Cell<Duration>>,
    epoch: DateTime<Utc>,
}

impl ManualClock {
    /// Create a clock reading zero, with wall time starting at `epoch`
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            offset: Rc::new(Cell::new(Duration::ZERO)),
            epoch,
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get().saturating_add(by));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn monotonic(&self) -> Duration {
        self.offset.get()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        TimeDelta::from_std(self.offset.get())
            .ok()
            .and_then(|delta| self.epoch.checked_add_signed(delta))
            .unwrap_or(self.epoch)
    }
}

/// Solve timer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stopwatch {
    /// Not started since the last reset
    #[default]
    Idle,
    /// Running since a monotonic reading
    Running {
        /// Monotonic reading at start
        started_at: Duration,
    },
    /// Stopped with a final reading
    Stopped {
        /// Time between start and stop
        elapsed: Duration,
    },
}

impl Stopwatch {
    /// Start from zero unless already running
    pub fn start(&mut self, now: Duration) {
        if !self.is_running() {
            *self = Self::Running { started_at: now };
        }
    }

    /// Freeze the current reading; no-op unless running
    pub fn stop(&mut self, now: Duration) {
        if let Self::Running { started_at } = *self {
            *self = Self::Stopped {
                elapsed: now.saturating_sub(started_at),
            };
        }
    }

    /// Return to idle with zero elapsed time
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Test whether the stopwatch is running
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Elapsed time as of the monotonic reading `now`
    pub const fn elapsed(&self, now: Duration) -> Duration {
        match self {
            Self::Idle => Duration::ZERO,
            Self::Running { started_at } => now.saturating_sub(*started_at),
            Self::Stopped { elapsed } => *elapsed,
        }
    }
}

/// Whole milliseconds of a duration, saturating
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Render a duration as `mm:ss`, or `h:mm:ss` from one hour up
pub fn format_elapsed(duration: Duration) -> String {
    let seconds = duration.as_secs();
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let remainder = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{remainder:02}")
    } else {
        format!("{minutes:02}:{remainder:02}")
    }
}
