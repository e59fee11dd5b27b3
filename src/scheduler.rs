use std::time::{Duration, Instant};

use log::trace;

use crate::input::Action;

/// State the tick timer captures when it is armed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TimerDeps {
    pub current: Action,
    pub next: Action,
    pub speed: u32,
    pub last_tick: Instant,
}

/// Drift-corrected repeating tick timer.
///
/// The deadline is `last_tick + base_interval / speed`. Whenever the captured
/// [`TimerDeps`] change the timer is torn down and re-armed against the new
/// values, so a speed-up takes effect on the very next fire.
#[derive(Debug, Clone)]
pub struct TickTimer {
    base_interval: Duration,
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    deps: TimerDeps,
    deadline: Instant,
}

impl TickTimer {
    #[must_use]
    pub fn new(base_interval: Duration) -> Self {
        Self {
            base_interval,
            armed: None,
        }
    }

    /// Interval between ticks at `speed`.
    #[must_use]
    pub fn interval(&self, speed: u32) -> Duration {
        self.base_interval / speed.max(1)
    }

    /// Re-arms the timer if `deps` differ from the armed set.
    ///
    /// Returns true when a re-arm happened.
    pub fn sync(&mut self, deps: TimerDeps) -> bool {
        if self.armed.is_some_and(|armed| armed.deps == deps) {
            return false;
        }

        let deadline = deps.last_tick + self.interval(deps.speed);
        trace!("tick timer armed for speed {}", deps.speed);
        self.armed = Some(Armed { deps, deadline });
        true
    }

    /// Time left until the next fire, clamped at zero. `None` while disarmed.
    #[must_use]
    pub fn delay(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|armed| armed.deadline.saturating_duration_since(now))
    }

    /// True once the armed deadline has passed.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.armed.is_some_and(|armed| now >= armed.deadline)
    }

    /// Tears the timer down; nothing fires until the next [`TickTimer::sync`].
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
