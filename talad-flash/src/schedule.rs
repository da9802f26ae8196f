//! Campaign time window
//!
//! Start/end timestamps with the editing rules the campaign form enforces:
//! moving the start past the end carries the end forward so the window stays
//! open-ended ("rollover"), the end can never be set at or before the start,
//! and clock spinners cannot schedule into the past for today's date.

use chrono::{Duration, NaiveDateTime, Timelike};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// End must be strictly after start; the edit was dropped.
    #[error("End time must be after start time")]
    EndNotAfterStart,

    /// The adjustment would land earlier than the current wall clock on
    /// today's date; the edit was dropped.
    #[error("Cannot schedule into the past")]
    InPastForToday,
}

/// Which timestamp a clock adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

/// Which clock unit a spinner adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockUnit {
    Hour,
    Minute,
}

/// Spinner direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Derived duration summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSummary {
    /// `end <= start`; the window is invalid or zero-length.
    Invalid,
    Breakdown { days: i64, hours: i64, minutes: i64 },
}

impl std::fmt::Display for DurationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationSummary::Invalid => write!(f, "-"),
            DurationSummary::Breakdown {
                days,
                hours,
                minutes,
            } => {
                if *days > 0 {
                    write!(f, "{}d {}h {}m", days, hours, minutes)
                } else if *hours > 0 {
                    write!(f, "{}h {}m", hours, minutes)
                } else {
                    write!(f, "{}m", minutes)
                }
            }
        }
    }
}

/// Campaign start/end window, `end > start` maintained by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Schedule {
    /// Default window for a fresh draft: starts now, runs 24 hours.
    pub fn starting_now(now: NaiveDateTime) -> Self {
        Self {
            start: now,
            end: now + Duration::hours(24),
        }
    }

    /// Restore a window from an existing record.
    pub fn from_range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Move the start. If the new start reaches or passes the current end,
    /// the end is carried forward by the window's previous length so that
    /// `end > start` keeps holding.
    pub fn set_start(&mut self, start: NaiveDateTime) {
        if start >= self.end {
            let span = self.end - self.start;
            let span = if span > Duration::zero() {
                span
            } else {
                Duration::hours(24)
            };
            self.end = start + span;
            tracing::debug!(end = %self.end, "End rolled forward past new start");
        }
        self.start = start;
    }

    /// Set the end directly. Values at or before the start are rejected and
    /// the end is left unchanged.
    pub fn set_end(&mut self, end: NaiveDateTime) -> Result<(), ScheduleError> {
        if end <= self.start {
            return Err(ScheduleError::EndNotAfterStart);
        }
        self.end = end;
        Ok(())
    }

    /// Adjust the hour or minute of one field by one unit, wrapping within
    /// the day. Rejected when the field's date is today and the result would
    /// fall before `now`; future dates are unrestricted.
    pub fn adjust_clock(
        &mut self,
        field: TimeField,
        unit: ClockUnit,
        direction: Direction,
        now: NaiveDateTime,
    ) -> Result<(), ScheduleError> {
        let current = match field {
            TimeField::Start => self.start,
            TimeField::End => self.end,
        };

        let step: i32 = match direction {
            Direction::Up => 1,
            Direction::Down => -1,
        };

        let time = current.time();
        let adjusted = match unit {
            ClockUnit::Hour => {
                let hour = (time.hour() as i32 + step).rem_euclid(24) as u32;
                time.with_hour(hour)
            }
            ClockUnit::Minute => {
                let minute = (time.minute() as i32 + step).rem_euclid(60) as u32;
                time.with_minute(minute)
            }
        };
        // with_hour/with_minute stay in range by construction.
        let Some(adjusted) = adjusted else {
            return Ok(());
        };
        let candidate = current.date().and_time(adjusted);

        if candidate.date() == now.date() && candidate < now {
            return Err(ScheduleError::InPastForToday);
        }

        match field {
            TimeField::Start => self.start = candidate,
            TimeField::End => self.end = candidate,
        }
        Ok(())
    }

    /// Window length as a days/hours/minutes breakdown, or the invalid state
    /// when the window is non-positive.
    pub fn duration(&self) -> DurationSummary {
        let span = self.end - self.start;
        if span <= Duration::zero() {
            return DurationSummary::Invalid;
        }
        let total_minutes = span.num_minutes();
        DurationSummary::Breakdown {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        }
    }
}
