//! Date-gated unlock evaluation.
//!
//! `evaluate` is a pure function from `(schedule, now)` to an [`UnlockState`].
//! Nothing is carried between calls: every tick rebuilds the state from
//! scratch, which keeps monotonicity a direct consequence of comparing against
//! fixed instants.
//!
//! ## Unlock instant
//!
//! A milestone dated `2026-02-07` unlocks at 00:00:00 on that day in the
//! observer's zone. The instant is built from calendar components, so an
//! observer at UTC+5:30 unlocks five and a half hours before one at UTC.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Duration, LocalResult, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::milestone::{CalendarDate, Schedule};

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Remaining time until a locked milestone opens.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    /// Decompose a remaining duration with the days/hours/minutes/seconds
    /// remainder chain. Sub-second remainders are dropped.
    pub fn from_millis(ms: u64) -> Self {
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms / MS_PER_HOUR) % 24,
            minutes: (ms / MS_PER_MINUTE) % 60,
            seconds: (ms / MS_PER_SECOND) % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Output of one evaluation.
///
/// Every milestone id is in exactly one of `unlocked` or `countdowns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockState {
    pub unlocked: BTreeSet<u32>,
    pub countdowns: BTreeMap<u32, Countdown>,
}

impl UnlockState {
    pub fn is_unlocked(&self, id: u32) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn countdown(&self, id: u32) -> Option<&Countdown> {
        self.countdowns.get(&id)
    }

    pub fn all_unlocked(&self) -> bool {
        self.countdowns.is_empty()
    }

    /// The locked milestone that opens soonest.
    pub fn next_locked(&self) -> Option<(u32, &Countdown)> {
        self.countdowns
            .iter()
            .min_by_key(|(id, c)| (**c, **id))
            .map(|(id, c)| (*id, c))
    }
}

/// Local midnight of `date` in `tz`.
///
/// An ambiguous midnight (clocks falling back across 00:00) resolves to the
/// earlier instant. A midnight skipped by a DST jump moves forward to the
/// first local minute that exists, matching how calendar-component
/// constructors normalise nonexistent wall times.
pub fn local_midnight<Tz: TimeZone>(date: CalendarDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.naive().and_time(NaiveTime::default());
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => (1..=24 * 60)
            .find_map(|m| {
                tz.from_local_datetime(&(midnight + Duration::minutes(m)))
                    .earliest()
            })
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight)),
    }
}

/// Partition `schedule` into unlocked ids and countdowns as seen at `now`.
///
/// The observer's zone is taken from `now`; pass a `DateTime<Local>` for the
/// machine's wall clock.
pub fn evaluate<Tz: TimeZone>(schedule: &Schedule, now: &DateTime<Tz>) -> UnlockState {
    let tz = now.timezone();
    let now_ms = now.timestamp_millis();
    let mut state = UnlockState::default();

    for milestone in schedule {
        let unlock_ms = local_midnight(milestone.date, &tz).timestamp_millis();
        let remaining = unlock_ms - now_ms;
        if remaining <= 0 {
            state.unlocked.insert(milestone.id);
        } else {
            state
                .countdowns
                .insert(milestone.id, Countdown::from_millis(remaining as u64));
        }
    }

    state
}
