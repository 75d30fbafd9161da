// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Calendar window computation for the contribution pipeline.
///
/// Every other component operates on the fixed trailing-year window computed
/// here once per session. The window is immutable after construction.
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Inclusive calendar window bounded by two ISO dates.
///
/// Invariant: `start <= end`. Day enumeration is inclusive on both ends, so
/// a trailing-year window spanning a leap day yields 366 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,)]
pub struct CalendarRange
{
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end:   NaiveDate,
}

impl CalendarRange
{
    /// Creates a range after validating the ordering invariant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `start` is later than `end`.
    pub fn new(start: NaiveDate, end: NaiveDate,) -> Result<Self, Error,>
    {
        if start > end {
            return Err(Error::validation(format!(
                "range start {start} must not be later than end {end}"
            ),),);
        }

        Ok(Self {
            start,
            end,
        },)
    }

    /// Computes the trailing one-year window ending at `today`.
    ///
    /// The start date keeps the month and day of `today` with the year
    /// decremented. When the shifted day does not exist in the target month
    /// (Feb 29 outside leap years) the date rolls forward to Mar 1, matching
    /// the calendar normalization applied by the original dashboard.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use contribcal::CalendarRange;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 8, 29,).unwrap();
    /// let range = CalendarRange::trailing_year(today,);
    /// assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 8, 29,).unwrap());
    /// assert_eq!(range.end, today);
    /// ```
    pub fn trailing_year(today: NaiveDate,) -> Self
    {
        Self {
            start: shift_back_one_year(today,), end: today,
        }
    }

    /// Number of days enumerated by the window, inclusive on both ends.
    pub fn day_count(&self,) -> u64
    {
        (self.end - self.start).num_days() as u64 + 1
    }

    /// Iterates every calendar day in ascending order, inclusive.
    pub fn days(&self,) -> impl Iterator<Item = NaiveDate,>
    {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end,)
    }
}

impl std::fmt::Display for CalendarRange
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Decrements the year while preserving month and day where possible.
fn shift_back_one_year(date: NaiveDate,) -> NaiveDate
{
    let target_year = date.year() - 1;

    NaiveDate::from_ymd_opt(target_year, date.month(), date.day(),).unwrap_or_else(|| {
        // Feb 29 has no counterpart in a common year; roll forward to Mar 1.
        NaiveDate::from_ymd_opt(target_year, 3, 1,).expect("Mar 1 exists in every year",)
    },)
}
