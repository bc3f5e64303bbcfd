//! # Sliding Windows
//!
//! Two-pointer scans over time-ordered events. The right pointer walks
//! every event; the left pointer advances while the span between them
//! exceeds the window. Both boundaries are inclusive: two events exactly
//! one window apart fall in the same window.
//!
//! Inputs must already be sorted ascending by timestamp.

use std::collections::BTreeMap;

use chrono::Duration;
use kyc_core::{Timestamp, ValidationError};

/// Longest accepted window: one hundred years of seconds.
pub const MAX_WINDOW_SECONDS: i64 = 100 * 365 * 86_400;

/// A strictly positive window duration of at most [`MAX_WINDOW_SECONDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Window {
    seconds: i64,
}

impl Window {
    /// Build a window from a duration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveWindow`] for a zero or
    /// negative duration and [`ValidationError::WindowTooLong`] above
    /// [`MAX_WINDOW_SECONDS`].
    pub fn new(duration: Duration) -> Result<Self, ValidationError> {
        Self::seconds(duration.num_seconds())
    }

    /// Build a window of `seconds` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveWindow`] when `seconds <= 0`
    /// and [`ValidationError::WindowTooLong`] when it exceeds
    /// [`MAX_WINDOW_SECONDS`].
    pub fn seconds(seconds: i64) -> Result<Self, ValidationError> {
        if seconds <= 0 {
            return Err(ValidationError::NonPositiveWindow { seconds });
        }
        if seconds > MAX_WINDOW_SECONDS {
            return Err(ValidationError::WindowTooLong {
                seconds,
                max: MAX_WINDOW_SECONDS,
            });
        }
        Ok(Self { seconds })
    }

    /// Build a window of `hours` hours.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveWindow`] when `hours <= 0`
    /// and [`ValidationError::WindowTooLong`] when the window exceeds
    /// [`MAX_WINDOW_SECONDS`].
    pub fn hours(hours: i64) -> Result<Self, ValidationError> {
        match hours.checked_mul(3600) {
            Some(seconds) => Self::seconds(seconds),
            None if hours < 0 => Err(ValidationError::NonPositiveWindow { seconds: i64::MIN }),
            None => Err(ValidationError::WindowTooLong {
                seconds: i64::MAX,
                max: MAX_WINDOW_SECONDS,
            }),
        }
    }

    /// Window for a compile-time literal. Callers pass positive constants.
    pub(crate) const fn from_hours_literal(hours: i64) -> Self {
        Self {
            seconds: hours * 3600,
        }
    }

    /// Window length.
    pub fn duration(&self) -> Duration {
        Duration::seconds(self.seconds)
    }

    /// Window length in seconds.
    pub fn as_secs(&self) -> i64 {
        self.seconds
    }

    fn spans(&self, earlier: &Timestamp, later: &Timestamp) -> bool {
        later.duration_since(earlier) <= self.duration()
    }
}

/// Largest number of events inside any window.
pub fn max_count_in_window(times: &[Timestamp], window: Window) -> usize {
    let mut left = 0;
    let mut best = 0;
    for right in 0..times.len() {
        while !window.spans(&times[left], &times[right]) {
            left += 1;
        }
        best = best.max(right - left + 1);
    }
    best
}

/// Largest number of distinct keys active inside any window.
///
/// Active keys are reference-counted: a key leaves the active set only
/// when its last occurrence exits the window.
pub fn max_distinct_in_window<K: Ord + Clone>(events: &[(Timestamp, K)], window: Window) -> usize {
    let mut active: BTreeMap<K, usize> = BTreeMap::new();
    let mut left = 0;
    let mut best = 0;
    for (right_ts, key) in events {
        *active.entry(key.clone()).or_insert(0) += 1;
        while !window.spans(&events[left].0, right_ts) {
            let evicted = &events[left].1;
            if let Some(count) = active.get_mut(evicted) {
                *count -= 1;
                if *count == 0 {
                    active.remove(evicted);
                }
            }
            left += 1;
        }
        best = best.max(active.len());
    }
    best
}
