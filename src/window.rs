// File: ./src/window.rs
//! Calendar windowing: which days a view shows, independent of any event data.
//!
//! Month grids are always whole weeks. The leading and trailing days from the
//! adjacent months are part of the grid; renderers rely on the 7-column shape
//! and use [`MonthGrid::in_month`] to dim the padding days. The only exception
//! is the first and last month chrono can represent, where padding is cut at
//! `NaiveDate::MIN`/`NaiveDate::MAX`.
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

/// A month laid out as whole weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<NaiveDate>,
}

impl MonthGrid {
    pub fn rows(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(7)
    }

    pub fn in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarWindow {
    Day(NaiveDate),
    Week(Vec<NaiveDate>),
    Month(MonthGrid),
    Year(Vec<MonthGrid>),
}

impl CalendarWindow {
    /// Every cell date, ascending and without duplicates.
    /// Year windows overlap at month boundaries, so padding days appear once.
    pub fn dates(&self) -> Vec<NaiveDate> {
        match self {
            Self::Day(d) => vec![*d],
            Self::Week(days) => days.clone(),
            Self::Month(grid) => grid.days.clone(),
            Self::Year(grids) => {
                let mut all: Vec<NaiveDate> =
                    grids.iter().flat_map(|g| g.days.iter().copied()).collect();
                all.sort();
                all.dedup();
                all
            }
        }
    }
}

pub fn window(reference: NaiveDate, granularity: Granularity, week_start: Weekday) -> CalendarWindow {
    match granularity {
        Granularity::Day => CalendarWindow::Day(reference),
        Granularity::Week => CalendarWindow::Week(week_of(reference, week_start)),
        Granularity::Month => {
            let first = reference.with_day(1).unwrap_or(reference);
            CalendarWindow::Month(grid_from_first(first, week_start))
        }
        Granularity::Year => CalendarWindow::Year(
            (1..=12)
                .filter_map(|m| NaiveDate::from_ymd_opt(reference.year(), m, 1))
                .map(|first| grid_from_first(first, week_start))
                .collect(),
        ),
    }
}

/// Inclusive run of days from `from` to `to`. Yields `NaiveDate::MAX` when it is in range.
pub fn days_inclusive(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(from), |d| d.succ_opt()).take_while(move |d| *d <= to)
}

/// Days between the configured week start and `date`'s weekday (0..=6).
fn offset_in_week(date: NaiveDate, week_start: Weekday) -> u64 {
    let day = date.weekday().num_days_from_monday();
    let start = week_start.num_days_from_monday();
    ((day + 7 - start) % 7) as u64
}

/// Clamped to `NaiveDate::MIN` for the first partial week of the calendar.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    date.checked_sub_days(Days::new(offset_in_week(date, week_start)))
        .unwrap_or(NaiveDate::MIN)
}

/// Clamped to `NaiveDate::MAX` for the last partial week of the calendar.
pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    date.checked_add_days(Days::new(6 - offset_in_week(date, week_start)))
        .unwrap_or(NaiveDate::MAX)
}

/// The days of the week containing `date`. Always seven, except at the ends
/// of the representable range.
pub fn week_of(date: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    days_inclusive(
        start_of_week(date, week_start),
        end_of_week(date, week_start),
    )
    .collect()
}

/// Whole-week grid covering the given month, or None for an invalid month.
pub fn month_grid(year: i32, month: u32, week_start: Weekday) -> Option<MonthGrid> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| grid_from_first(first, week_start))
}

fn grid_from_first(first: NaiveDate, week_start: Weekday) -> MonthGrid {
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    let days = days_inclusive(
        start_of_week(first, week_start),
        end_of_week(last, week_start),
    )
    .collect();

    MonthGrid {
        year: first.year(),
        month: first.month(),
        days,
    }
}

/// Moves the reference date by `steps` units of the granularity (negative = back).
///
/// Month and year steps clamp the day of month (Jan 31 + 1 month = Feb 28/29).
pub fn shift(reference: NaiveDate, granularity: Granularity, steps: i32) -> NaiveDate {
    let magnitude = steps.unsigned_abs();
    let forward = steps >= 0;

    let shifted = match granularity {
        Granularity::Day | Granularity::Week => {
            let per_step = if granularity == Granularity::Week { 7 } else { 1 };
            let days = Days::new(u64::from(magnitude) * per_step);
            if forward {
                reference.checked_add_days(days)
            } else {
                reference.checked_sub_days(days)
            }
        }
        Granularity::Month | Granularity::Year => {
            let per_step = if granularity == Granularity::Year { 12 } else { 1 };
            let months = Months::new(magnitude.saturating_mul(per_step));
            if forward {
                reference.checked_add_months(months)
            } else {
                reference.checked_sub_months(months)
            }
        }
    };

    shifted.unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_offset_in_week() {
        // 2025-06-10 is a Tuesday
        assert_eq!(offset_in_week(d(2025, 6, 10), Weekday::Sun), 2);
        assert_eq!(offset_in_week(d(2025, 6, 10), Weekday::Mon), 1);
        assert_eq!(offset_in_week(d(2025, 6, 10), Weekday::Tue), 0);
        assert_eq!(offset_in_week(d(2025, 6, 10), Weekday::Wed), 6);
    }

    #[test]
    fn test_month_grid_exact_fit() {
        // February 2015 starts on a Sunday and has 28 days
        let grid = month_grid(2015, 2, Weekday::Sun).unwrap();
        assert_eq!(grid.days.len(), 28);
        assert_eq!(grid.days[0], d(2015, 2, 1));
        assert!(grid.days.iter().all(|day| grid.in_month(*day)));
    }

    #[test]
    fn test_shift_clamps_month_end() {
        assert_eq!(shift(d(2025, 1, 31), Granularity::Month, 1), d(2025, 2, 28));
        assert_eq!(shift(d(2024, 2, 29), Granularity::Year, 1), d(2025, 2, 28));
        assert_eq!(shift(d(2025, 3, 31), Granularity::Month, -1), d(2025, 2, 28));
    }

    #[test]
    fn test_invalid_month_has_no_grid() {
        assert!(month_grid(2025, 0, Weekday::Sun).is_none());
        assert!(month_grid(2025, 13, Weekday::Sun).is_none());
    }

    #[test]
    fn test_days_inclusive_reaches_max() {
        let before = NaiveDate::MAX.pred_opt().unwrap();
        let days: Vec<_> = days_inclusive(before, NaiveDate::MAX).collect();
        assert_eq!(days, vec![before, NaiveDate::MAX]);
    }
}
