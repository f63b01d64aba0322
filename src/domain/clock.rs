//! Logical-day boundary rules.
//!
//! Goals are tracked against periods that roll over at a fixed cutoff hour
//! rather than midnight, so a late-evening session and the small hours that
//! follow it count as one day. The clock is pure: both operations are
//! deterministic functions of their arguments.

use chrono::{Duration, NaiveTime};

use super::foundation::{Timestamp, ValidationError};

/// Cutoff hour used when none is configured.
pub const DEFAULT_CUTOFF_HOUR: u32 = 4;

/// Computes period boundaries from a fixed cutoff time-of-day.
///
/// # Invariants
///
/// - `period_start(now) <= now < period_start(now) + 24h`
/// - `period_start` is idempotent: the start of a period is inside that
///   period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodClock {
    cutoff: NaiveTime,
}

impl PeriodClock {
    /// Creates a clock with the given cutoff hour.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `cutoff_hour` is not a valid hour (0-23)
    pub fn new(cutoff_hour: u32) -> Result<Self, ValidationError> {
        let cutoff = NaiveTime::from_hms_opt(cutoff_hour, 0, 0).ok_or_else(|| {
            ValidationError::out_of_range("cutoff_hour", 0, 23, i64::from(cutoff_hour))
        })?;
        Ok(Self { cutoff })
    }

    /// Returns the start of the period containing `now`.
    ///
    /// If `now`'s time-of-day is before the cutoff, the period started at
    /// the cutoff on the previous calendar day; otherwise it started at the
    /// cutoff today.
    pub fn period_start(&self, now: Timestamp) -> Timestamp {
        let dt = *now.as_datetime();
        let cutoff_today = dt.date_naive().and_time(self.cutoff).and_utc();
        if dt < cutoff_today {
            Timestamp::from_datetime(cutoff_today - Duration::days(1))
        } else {
            Timestamp::from_datetime(cutoff_today)
        }
    }

    /// Whether an event dated `event_time` may still be logged at `now`.
    ///
    /// An event belongs to the period containing it; logging is rejected
    /// once `now` is more than one full day past that period's start, i.e.
    /// once the following cutoff has passed.
    pub fn is_within_grace(&self, now: Timestamp, event_time: Timestamp) -> bool {
        let start = self.period_start(event_time);
        now.duration_since(&start) <= Duration::hours(24)
    }
}

impl Default for PeriodClock {
    fn default() -> Self {
        Self {
            cutoff: NaiveTime::from_hms_opt(DEFAULT_CUTOFF_HOUR, 0, 0)
                .unwrap_or(NaiveTime::MIN),
        }
    }
}
