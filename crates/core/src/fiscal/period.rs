//! Inclusive reporting periods.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// Granularity accepted by [`Period::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeriodType {
    /// A whole calendar year, written `"2025"`.
    Year,
    /// A single calendar month, written `"2025-03"`.
    Month,
}

impl std::str::FromStr for PeriodType {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YEAR" => Ok(Self::Year),
            "MONTH" => Ok(Self::Month),
            _ => Err(PeriodError::UnknownPeriodType(s.to_string())),
        }
    }
}

/// An inclusive date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRepr")]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct PeriodRepr {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<PeriodRepr> for Period {
    type Error = PeriodError;

    fn try_from(repr: PeriodRepr) -> Result<Self, Self::Error> {
        Self::new(repr.start, repr.end)
    }
}

impl Period {
    /// Creates a period, rejecting inverted ranges.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// January 1st through December 31st of `year`.
    pub fn of_year(year: i32) -> Result<Self, PeriodError> {
        Self::new(ymd(year, 1, 1)?, ymd(year, 12, 31)?)
    }

    /// The whole calendar month.
    pub fn of_month(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        let start = ymd(year, month, 1)?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or(PeriodError::DateOutOfRange(year))?;
        Self::new(start, end)
    }

    /// January 1st through June 30th.
    pub fn of_first_half(year: i32) -> Result<Self, PeriodError> {
        Self::new(ymd(year, 1, 1)?, ymd(year, 6, 30)?)
    }

    /// July 1st through December 31st.
    pub fn of_second_half(year: i32) -> Result<Self, PeriodError> {
        Self::new(ymd(year, 7, 1)?, ymd(year, 12, 31)?)
    }

    /// Parses `"2025"` (with [`PeriodType::Year`]) or `"2025-03"` (with
    /// [`PeriodType::Month`]).
    pub fn parse(text: &str, period_type: PeriodType) -> Result<Self, PeriodError> {
        let text = text.trim();
        let invalid = || PeriodError::InvalidFormat(text.to_string());

        match period_type {
            PeriodType::Year => {
                let year = text.parse::<i32>().map_err(|_| invalid())?;
                Self::of_year(year)
            }
            PeriodType::Month => {
                let (year, month) = text.split_once('-').ok_or_else(invalid)?;
                let year = year.parse::<i32>().map_err(|_| invalid())?;
                let month = month.parse::<u32>().map_err(|_| invalid())?;
                Self::of_month(year, month)
            }
        }
    }

    /// First day of the period.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the period (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `start <= date <= end`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Calendar year of the start date.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Number of days covered, both ends included.
    #[must_use]
    pub fn days_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the period is exactly one calendar year.
    #[must_use]
    pub fn is_full_year(&self) -> bool {
        self.start.year() == self.end.year()
            && self.start.ordinal() == 1
            && self.end.month() == 12
            && self.end.day() == 31
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, PeriodError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(PeriodError::DateOutOfRange(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let err = Period::new(date(2025, 2, 1), date(2025, 1, 31)).unwrap_err();
        assert_eq!(
            err,
            PeriodError::InvalidRange {
                start: date(2025, 2, 1),
                end: date(2025, 1, 31),
            }
        );
        assert_eq!(err.error_code(), "INVALID_PERIOD_RANGE");
    }

    #[test]
    fn test_single_day_period_is_valid() {
        let day = date(2025, 5, 5);
        let period = Period::new(day, day).unwrap();
        assert!(period.contains(day));
        assert_eq!(period.days_count(), 1);
    }

    #[test]
    fn test_of_year() {
        let period = Period::of_year(2025).unwrap();
        assert_eq!(period.start(), date(2025, 1, 1));
        assert_eq!(period.end(), date(2025, 12, 31));
        assert_eq!(period.year(), 2025);
        assert_eq!(period.days_count(), 365);
        assert!(period.is_full_year());
    }

    #[rstest]
    #[case(2025, 1, 31)]
    #[case(2024, 2, 29)]
    #[case(2025, 2, 28)]
    #[case(2025, 4, 30)]
    #[case(2025, 12, 31)]
    fn test_of_month_last_day(#[case] year: i32, #[case] month: u32, #[case] last_day: u32) {
        let period = Period::of_month(year, month).unwrap();
        assert_eq!(period.start(), date(year, month, 1));
        assert_eq!(period.end(), date(year, month, last_day));
        assert!(!period.is_full_year());
    }

    #[test]
    fn test_of_month_rejects_bad_month() {
        assert_eq!(Period::of_month(2025, 0), Err(PeriodError::InvalidMonth(0)));
        assert_eq!(Period::of_month(2025, 13), Err(PeriodError::InvalidMonth(13)));
    }

    #[test]
    fn test_halves() {
        let first = Period::of_first_half(2025).unwrap();
        let second = Period::of_second_half(2025).unwrap();
        assert_eq!(first.end(), date(2025, 6, 30));
        assert_eq!(second.start(), date(2025, 7, 1));
        assert_eq!(first.days_count() + second.days_count(), 365);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let period = Period::of_month(2025, 3).unwrap();
        assert!(period.contains(date(2025, 3, 1)));
        assert!(period.contains(date(2025, 3, 31)));
        assert!(!period.contains(date(2025, 2, 28)));
        assert!(!period.contains(date(2025, 4, 1)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Period::parse("2024", PeriodType::Year).unwrap(),
            Period::of_year(2024).unwrap()
        );
        assert_eq!(
            Period::parse("2024-02", PeriodType::Month).unwrap(),
            Period::of_month(2024, 2).unwrap()
        );
        assert!(matches!(
            Period::parse("2024-02", PeriodType::Year),
            Err(PeriodError::InvalidFormat(_))
        ));
        assert!(matches!(
            Period::parse("2024", PeriodType::Month),
            Err(PeriodError::InvalidFormat(_))
        ));
        assert_eq!(
            Period::parse("2024-14", PeriodType::Month),
            Err(PeriodError::InvalidMonth(14))
        );
    }

    #[test]
    fn test_period_type_from_str() {
        assert_eq!("YEAR".parse::<PeriodType>().unwrap(), PeriodType::Year);
        assert_eq!("month".parse::<PeriodType>().unwrap(), PeriodType::Month);
        assert!(matches!(
            "WEEK".parse::<PeriodType>(),
            Err(PeriodError::UnknownPeriodType(_))
        ));
    }

    #[test]
    fn test_serde_validates_range() {
        let period = Period::of_month(2025, 1).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#"{"start":"2025-01-01","end":"2025-01-31"}"#);

        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);

        let inverted = r#"{"start":"2025-02-01","end":"2025-01-01"}"#;
        assert!(serde_json::from_str::<Period>(inverted).is_err());
    }

    #[test]
    fn test_display() {
        let period = Period::of_month(2025, 6).unwrap();
        assert_eq!(period.to_string(), "2025-06-01..=2025-06-30");
    }
}
