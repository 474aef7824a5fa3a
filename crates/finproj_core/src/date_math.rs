//! Month timeline helpers.
//!
//! Point dates are always computed as an offset from the start date rather
//! than by repeatedly adding one month, so a start on the 31st stays on the
//! last day of short months instead of drifting to the 28th for good.

use jiff::ToSpan;
use jiff::civil::Date;

/// Dates of months `0..=months` after `start`
pub fn month_dates(start: Date, months: usize) -> Vec<Date> {
    (0..=months)
        .map(|k| start.saturating_add((k as i64).months()))
        .collect()
}

/// Step whose window contains `date`.
///
/// Step `k >= 1` covers `[dates[k-1], dates[k])`; the final step also
/// includes the last date. Dates before the first or after the last point
/// belong to no step.
pub fn window_step(dates: &[Date], date: Date) -> Option<usize> {
    let (&first, &last) = (dates.first()?, dates.last()?);
    if dates.len() < 2 || date < first || date > last {
        return None;
    }

    let after = dates.partition_point(|d| *d <= date);
    Some(after.min(dates.len() - 1))
}
