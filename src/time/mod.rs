//! Time module for the shared dashboard clock
//!
//! A single [`TimeEngine`] owns the current instant. A host timer calls
//! [`TimeEngine::tick`] once per second; every per-city display formats that
//! one instant, so all visible clocks agree to the second. Independent
//! per-card timers would drift apart and are not offered.
//!
//! The 12/24-hour preference lives here too and is persisted through the
//! injected key/value store.

use crate::constants::{TICK_INTERVAL_MS, TIME_FORMAT_KEY};
use crate::observer::{Observers, SubscriptionId};
use crate::storage::{load_json_or, store_json, SharedStore};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use log::debug;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("Invalid timezone identifier: {0}")]
    InvalidTimezone(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Resolve an IANA timezone identifier
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| TimeError::InvalidTimezone(timezone.to_string()))
}

/// Source of wall-clock instants
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to; clones share the same instant
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            instant: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.instant.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}

/// Hour display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCycle {
    /// 12-hour clock with AM/PM
    H12,
    /// 24-hour clock
    H24,
}

impl HourCycle {
    pub fn is_12_hour(&self) -> bool {
        matches!(self, HourCycle::H12)
    }

    /// The other cycle
    pub fn toggled(&self) -> Self {
        match self {
            HourCycle::H12 => HourCycle::H24,
            HourCycle::H24 => HourCycle::H12,
        }
    }

    fn from_is_12_hour(is_12_hour: bool) -> Self {
        if is_12_hour {
            HourCycle::H12
        } else {
            HourCycle::H24
        }
    }

    fn time_pattern(&self) -> &'static str {
        match self {
            HourCycle::H12 => "%I:%M:%S %p",
            HourCycle::H24 => "%H:%M:%S",
        }
    }
}

impl fmt::Display for HourCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourCycle::H12 => write!(f, "12-hour"),
            HourCycle::H24 => write!(f, "24-hour"),
        }
    }
}

/// Owner of the shared instant and the hour-cycle preference
pub struct TimeEngine {
    clock: Box<dyn Clock>,
    store: SharedStore,
    current: DateTime<Utc>,
    hour_cycle: HourCycle,
    tick_observers: Observers<DateTime<Utc>>,
    format_observers: Observers<HourCycle>,
}

impl TimeEngine {
    /// Create an engine reading the persisted hour-cycle preference
    ///
    /// A missing or unparsable preference falls back to 24-hour.
    pub fn new(clock: Box<dyn Clock>, store: SharedStore) -> Self {
        let is_12_hour: bool = load_json_or(store.as_ref(), TIME_FORMAT_KEY, || false);
        let current = clock.now();
        Self {
            clock,
            store,
            current,
            hour_cycle: HourCycle::from_is_12_hour(is_12_hour),
            tick_observers: Observers::new(),
            format_observers: Observers::new(),
        }
    }

    /// Advance the shared instant to the clock's current time
    pub fn tick(&mut self) -> DateTime<Utc> {
        self.current = self.clock.now();
        let current = self.current;
        self.tick_observers.notify(&current);
        current
    }

    /// The shared instant as of the last tick
    pub fn utc(&self) -> DateTime<Utc> {
        self.current
    }

    /// The shared instant in the given zone
    pub fn city_time(&self, timezone: &str) -> Result<DateTime<Tz>> {
        let tz = parse_timezone(timezone)?;
        Ok(self.current.with_timezone(&tz))
    }

    /// Hour, minute and second in the given zone, honoring the hour cycle
    ///
    /// `"14:05:09"` in 24-hour mode, `"02:05:09 PM"` in 12-hour mode.
    pub fn formatted_time(&self, timezone: &str) -> Result<String> {
        let local = self.city_time(timezone)?;
        Ok(local.format(self.hour_cycle.time_pattern()).to_string())
    }

    /// Weekday, month, day and year in the given zone, e.g. `"Mon, Oct 19, 2026"`
    pub fn formatted_date(&self, timezone: &str) -> Result<String> {
        let local = self.city_time(timezone)?;
        Ok(local.format("%a, %b %-d, %Y").to_string())
    }

    pub fn hour_cycle(&self) -> HourCycle {
        self.hour_cycle
    }

    pub fn is_12_hour(&self) -> bool {
        self.hour_cycle.is_12_hour()
    }

    /// Flip between 12- and 24-hour display and persist the new preference
    pub fn toggle_format(&mut self) -> HourCycle {
        self.hour_cycle = self.hour_cycle.toggled();
        debug!("Time format switched to {}", self.hour_cycle);
        store_json(
            self.store.as_ref(),
            TIME_FORMAT_KEY,
            &self.hour_cycle.is_12_hour(),
        );
        let cycle = self.hour_cycle;
        self.format_observers.notify(&cycle);
        cycle
    }

    /// Call `callback` with the new instant after every tick
    pub fn on_tick<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&DateTime<Utc>) + 'static,
    {
        self.tick_observers.subscribe(callback)
    }

    /// Call `callback` with the new hour cycle after every toggle
    pub fn on_format_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&HourCycle) + 'static,
    {
        self.format_observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.tick_observers.unsubscribe(id) || self.format_observers.unsubscribe(id)
    }
}

impl fmt::Debug for TimeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeEngine")
            .field("current", &self.current)
            .field("hour_cycle", &self.hour_cycle)
            .finish()
    }
}

/// Decides when the 1 Hz tick is due inside a faster frame loop
///
/// The frame loop asks on every frame; the schedule answers from a monotonic
/// clock, so tick cadence does not depend on frame rate.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval: std::time::Duration,
    next_due: Option<Instant>,
}

impl TickSchedule {
    pub fn new(interval: std::time::Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Whether a tick is due at `now`. The first call is always due.
    ///
    /// After a stall the schedule realigns to `now` instead of firing a burst
    /// of catch-up ticks.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(next) if now < next => false,
            Some(next) => {
                let mut following = next + self.interval;
                if following <= now {
                    following = now + self.interval;
                }
                self.next_due = Some(following);
                true
            }
            None => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new(std::time::Duration::from_millis(TICK_INTERVAL_MS))
    }
}
