// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Month-at-a-time calendar math for the booking screen.
//!
//! The grid is Monday-first: day 1 is pushed right by one blank cell per
//! weekday between Monday and the month's first day. Navigation is pure
//! date arithmetic with no clock or network access.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

/// Column headers for the grid, Monday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// One displayed month. Cheap to copy, so navigation just produces a
/// new grid instead of mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    first: NaiveDate,
}

impl MonthGrid {
    /// Grid for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date
            .checked_sub_days(Days::new(u64::from(date.day0())))
            .unwrap_or(date);
        Self { first }
    }

    /// Grid for the previous month. Saturates at the calendar's edge.
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(*self, |first| Self { first })
    }

    /// Grid for the next month. Saturates at the calendar's edge.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(*self, |first| Self { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// The date of `day` within this month, if the month has that day.
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// Number of blank cells before day 1 in a Monday-first week row.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_monday()
    }

    /// Number of days in this month (28 to 31).
    pub fn day_count(&self) -> u32 {
        self.first
            .iter_days()
            .take_while(|d| d.month() == self.first.month())
            .count() as u32
    }

    /// Header line, e.g. `March 2025`.
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Week rows of day numbers; `None` cells pad the first and last weeks.
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut column = self.leading_blanks() as usize;
        for day in 1..=self.day_count() {
            week[column] = Some(day);
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }
        weeks
    }
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label())?;
        write!(f, "{}", WEEKDAY_HEADERS.join(" "))?;
        for week in self.weeks() {
            let cells: Vec<String> = week
                .iter()
                .map(|cell| match cell {
                    Some(day) => format!("{day:>3}"),
                    None => "   ".to_string(),
                })
                .collect();
            write!(f, "\n{}", cells.join(" ").trim_end())?;
        }
        Ok(())
    }
}

/// Portal-conventional short date, day first without zero padding,
/// e.g. `1-3-2025`.
pub fn day_month_year(date: NaiveDate) -> String {
    date.format("%-d-%-m-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(year: i32, month: u32) -> MonthGrid {
        MonthGrid::containing(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
    }

    #[test]
    fn march_2025_starts_on_saturday() {
        let grid = grid(2025, 3);
        assert_eq!(grid.leading_blanks(), 5);
        assert_eq!(grid.day_count(), 31);
        insta::assert_snapshot!(grid.to_string(), @r"
        March 2025
        MON TUE WED THU FRI SAT SUN
                              1   2
          3   4   5   6   7   8   9
         10  11  12  13  14  15  16
         17  18  19  20  21  22  23
         24  25  26  27  28  29  30
         31
        ");
    }

    #[test]
    fn february_2021_fills_a_perfect_rectangle() {
        let grid = grid(2021, 2);
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.day_count(), 28);
        assert_eq!(grid.weeks().len(), 4);
    }

    #[test]
    fn leap_february_has_twenty_nine_days() {
        assert_eq!(grid(2024, 2).day_count(), 29);
        assert_eq!(grid(2023, 2).day_count(), 28);
    }

    #[test]
    fn containing_lands_on_the_first_from_any_day() {
        let grid = MonthGrid::containing(NaiveDate::from_ymd_opt(2025, 3, 19).unwrap());
        assert_eq!(grid.date_of(1), NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(grid.label(), "March 2025");
    }

    #[test]
    fn navigation_crosses_year_boundaries() {
        let december = grid(2025, 12);
        assert_eq!(december.next().label(), "January 2026");
        assert_eq!(grid(2026, 1).previous().label(), "December 2025");
    }

    #[test]
    fn date_of_rejects_days_outside_the_month() {
        let feb = grid(2021, 2);
        assert_eq!(feb.date_of(29), None);
        assert_eq!(feb.date_of(0), None);
        assert!(feb.date_of(28).is_some());
    }

    #[test]
    fn short_date_is_day_first_without_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(day_month_year(date), "1-3-2025");
        let padded = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        assert_eq!(day_month_year(padded), "30-11-2025");
    }

    proptest! {
        /// Day 1 always lands under its weekday column, Monday first.
        #[test]
        fn prop_day_one_aligns_with_its_weekday(year in 2000i32..=2100, month in 1u32..=12) {
            let grid = grid(year, month);
            prop_assert_eq!(
                grid.leading_blanks(),
                grid.date_of(1).unwrap().weekday().num_days_from_monday()
            );
        }

        /// Every month renders 28 to 31 day cells, in order, with no gaps
        /// after the leading blanks.
        #[test]
        fn prop_weeks_hold_every_day_in_order(year in 2000i32..=2100, month in 1u32..=12) {
            let grid = grid(year, month);
            let cells: Vec<Option<u32>> = grid.weeks().concat();
            let blanks = grid.leading_blanks() as usize;
            let days = grid.day_count();
            prop_assert!((28..=31).contains(&days));
            prop_assert!(cells[..blanks].iter().all(Option::is_none));
            let rendered: Vec<u32> = cells[blanks..].iter().flatten().copied().collect();
            let expected: Vec<u32> = (1..=days).collect();
            prop_assert_eq!(rendered, expected);
            prop_assert!(cells[blanks + days as usize..].iter().all(Option::is_none));
        }

        /// A day's grid column matches its weekday for every day, not just day 1.
        #[test]
        fn prop_every_day_sits_in_its_weekday_column(
            year in 2000i32..=2100,
            month in 1u32..=12,
            day in 1u32..=28,
        ) {
            let grid = grid(year, month);
            let date = grid.date_of(day).unwrap();
            let column = (grid.leading_blanks() + day - 1) % 7;
            prop_assert_eq!(column, date.weekday().num_days_from_monday());
        }

        /// Month navigation round-trips.
        #[test]
        fn prop_navigation_round_trips(year in 2000i32..=2100, month in 1u32..=12) {
            let grid = grid(year, month);
            prop_assert_eq!(grid.next().previous(), grid);
            prop_assert_eq!(grid.previous().next(), grid);
        }
    }
}
