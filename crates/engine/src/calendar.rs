//! Calendar arithmetic for the weekly planning view.
//!
//! Weeks always start on Monday. Dates are exchanged as `YYYY-MM-DD`.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, Weekday};

use crate::{EngineError, ResultEngine};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DAYS_IN_WEEK: usize = 7;

pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(format!("expected YYYY-MM-DD, got '{value}'")))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns the Monday-to-Sunday week containing `anchor`, ascending.
pub fn week_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    let monday = anchor.week(Weekday::Mon).first_day();
    monday.iter_days().take(DAYS_IN_WEEK).collect()
}

/// Moves `anchor` by a whole number of weeks (negative goes back).
pub fn shift_weeks(anchor: NaiveDate, weeks: i64) -> ResultEngine<NaiveDate> {
    anchor
        .checked_add_signed(Duration::weeks(weeks))
        .ok_or_else(|| EngineError::InvalidDate(format!("{anchor} shifted by {weeks} weeks")))
}

/// Union of the generated week and the dates found in fetched plannings,
/// deduplicated and ascending.
pub fn resolve_axis<I>(week: &[NaiveDate], planning_dates: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut axis: BTreeSet<NaiveDate> = week.iter().copied().collect();
    axis.extend(planning_dates);
    axis.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn date(value: &str) -> NaiveDate {
        parse_date(value).unwrap()
    }

    fn formatted(dates: &[NaiveDate]) -> Vec<String> {
        dates.iter().copied().map(format_date).collect()
    }

    #[test]
    fn sunday_anchor_belongs_to_preceding_monday() {
        let week = week_dates(date("2025-06-29"));
        assert_eq!(
            formatted(&week),
            vec![
                "2025-06-23",
                "2025-06-24",
                "2025-06-25",
                "2025-06-26",
                "2025-06-27",
                "2025-06-28",
                "2025-06-29",
            ]
        );
    }

    #[test]
    fn week_is_seven_consecutive_days_starting_monday() {
        let mut anchor = date("2024-12-20");
        for _ in 0..30 {
            let week = week_dates(anchor);
            assert_eq!(week.len(), DAYS_IN_WEEK);
            assert_eq!(week[0].weekday(), Weekday::Mon);
            assert!(week.contains(&anchor));
            for pair in week.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
            anchor = anchor.succ_opt().unwrap();
        }
    }

    #[test]
    fn week_crosses_year_boundary() {
        let week = week_dates(date("2025-01-01"));
        assert_eq!(format_date(week[0]), "2024-12-30");
        assert_eq!(format_date(week[6]), "2025-01-05");
    }

    #[test]
    fn axis_is_sorted_union_without_duplicates() {
        let week = week_dates(date("2025-06-29"));
        let axis = resolve_axis(&week, [date("2025-06-20"), date("2025-06-24"), date("2025-06-24")]);
        assert_eq!(
            formatted(&axis),
            vec![
                "2025-06-20",
                "2025-06-23",
                "2025-06-24",
                "2025-06-25",
                "2025-06-26",
                "2025-06-27",
                "2025-06-28",
                "2025-06-29",
            ]
        );
        assert_eq!(axis, resolve_axis(&week, axis.clone()));
    }

    #[test]
    fn axis_without_plannings_is_the_week() {
        let week = week_dates(date("2025-03-12"));
        assert_eq!(resolve_axis(&week, std::iter::empty()), week);
    }

    #[test]
    fn shifting_navigates_whole_weeks() {
        let anchor = date("2025-06-29");
        assert_eq!(shift_weeks(anchor, -1).unwrap(), date("2025-06-22"));
        assert_eq!(shift_weeks(anchor, 1).unwrap(), date("2025-07-06"));
        assert!(shift_weeks(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn parse_rejects_other_formats() {
        assert!(parse_date("29/06/2025").is_err());
        assert_eq!(format_date(date(" 2025-06-29 ")), "2025-06-29");
    }
}
