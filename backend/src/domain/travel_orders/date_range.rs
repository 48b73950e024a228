//! Inclusive calendar date ranges.

use chrono::NaiveDate;

/// Raised when a range would end before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// `end` precedes `start`.
    #[error("range end {end} precedes start {start}")]
    InvalidRange {
        /// First day of the rejected range.
        start: NaiveDate,
        /// Last day of the rejected range.
        end: NaiveDate,
    },
}

/// A trip's span of days, inclusive of both endpoints.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use travel_orders::domain::DateRange;
///
/// let day = |d| NaiveDate::from_ymd_opt(2022, 1, d).unwrap();
/// let first = DateRange::new(day(1), day(5)).unwrap();
/// let second = DateRange::new(day(5), day(9)).unwrap();
/// assert!(first.overlaps(&second));
/// assert_eq!(first.days(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if end < start {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the two ranges share at least one day.
    ///
    /// Ranges touching on a single boundary day overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Whether `date` falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both endpoints.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, d).expect("valid date")
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(day(start), day(end)).expect("valid range")
    }

    #[rstest]
    fn rejects_end_before_start() {
        assert_eq!(
            DateRange::new(day(5), day(4)),
            Err(DateRangeError::InvalidRange {
                start: day(5),
                end: day(4)
            })
        );
    }

    #[rstest]
    fn single_day_range_is_valid() {
        let single = range(3, 3);
        assert_eq!(single.days(), 1);
        assert!(single.contains(day(3)));
    }

    #[rstest]
    #[case(range(1, 10), range(5, 6), true)]
    #[case(range(1, 5), range(5, 9), true)]
    #[case(range(1, 4), range(5, 9), false)]
    #[case(range(10, 12), range(1, 9), false)]
    #[case(range(1, 31), range(2, 3), true)]
    fn overlap_is_inclusive_and_symmetric(
        #[case] a: DateRange,
        #[case] b: DateRange,
        #[case] expected: bool,
    ) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[rstest]
    #[case(range(1, 1))]
    #[case(range(4, 20))]
    fn range_overlaps_itself(#[case] a: DateRange) {
        assert!(a.overlaps(&a));
    }

    #[rstest]
    fn contains_is_inclusive() {
        let trip = range(2, 4);
        assert!(!trip.contains(day(1)));
        assert!(trip.contains(day(2)));
        assert!(trip.contains(day(4)));
        assert!(!trip.contains(day(5)));
    }
}
