//! Time types and Day Count Conventions for financial calculations.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `Tenor`: Relative period such as `1D`, `2W`, `3M`, `1Y`
//! - `DayCountConvention`: Year fraction conventions used by curves and vols
//! - `BusinessDayConvention`: Rolling rules for non-business days
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention, Tenor};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = start.advance("6M".parse::<Tenor>().unwrap()).unwrap();
//!
//! // Calculate year fraction using ACT/360
//! let yf = DayCountConvention::Actual360.year_fraction(start, end);
//! assert!((yf - 182.0 / 360.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
/// let later = date.add_days(10).unwrap();
/// assert_eq!(later - date, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Parses a compact trade-ticket date such as `10Sep2023`.
    ///
    /// The token must be exactly nine characters: two-digit day,
    /// three-letter month abbreviation (any case), four-digit year.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse_ddmonyyyy("10Sep2023").unwrap();
    /// assert_eq!(date, Date::from_ymd(2023, 9, 10).unwrap());
    ///
    /// assert!(Date::parse_ddmonyyyy("10Sept2023").is_err());
    /// assert!(Date::parse_ddmonyyyy("31Feb2023").is_err());
    /// ```
    pub fn parse_ddmonyyyy(s: &str) -> Result<Self, DateError> {
        if s.len() != 9 || !s.is_ascii() {
            return Err(DateError::ParseError(format!(
                "expected DDMonYYYY, got '{}'",
                s
            )));
        }
        let (day, rest) = s.split_at(2);
        let (_, year) = rest.split_at(3);
        if !day.bytes().all(|b| b.is_ascii_digit()) || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::ParseError(format!(
                "expected DDMonYYYY, got '{}'",
                s
            )));
        }
        NaiveDate::parse_from_str(s, "%d%b%Y")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Parses a US-style `MM/DD/YYYY` date.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse_mmddyyyy("09/10/2023").unwrap();
    /// assert_eq!(date, Date::from_ymd(2023, 9, 10).unwrap());
    /// ```
    pub fn parse_mmddyyyy(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%m/%d/%Y")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the zero-based day of the year.
    pub fn ordinal0(&self) -> u32 {
        self.0.ordinal0()
    }

    /// Returns `true` for Saturdays and Sundays.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Shifts the date by a signed number of calendar days.
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} + {} days", self, days)))
    }

    /// Adds calendar months, clamping to the last day of the target month.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let jan31 = Date::from_ymd(2024, 1, 31).unwrap();
    /// assert_eq!(jan31.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// ```
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} + {} months", self, months)))
    }

    /// Advances the date by a tenor.
    ///
    /// Days and weeks are calendar days; months and years roll the month
    /// and clamp to the month end.
    pub fn advance(self, tenor: Tenor) -> Result<Self, DateError> {
        match tenor.unit() {
            TimeUnit::Days => self.add_days(i64::from(tenor.count())),
            TimeUnit::Weeks => self.add_days(7 * i64::from(tenor.count())),
            TimeUnit::Months => self.add_months(tenor.count()),
            TimeUnit::Years => {
                let months = tenor.count().checked_mul(12).ok_or_else(|| {
                    DateError::OutOfRange(format!("{} + {}", self, tenor))
                })?;
                self.add_months(months)
            }
        }
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

/// Returns `true` when `year` has 366 days.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[inline]
fn days_in_year(year: i32) -> f64 {
    if is_leap_year(year) {
        366.0
    } else {
        365.0
    }
}

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Calendar days
    Days,
    /// Calendar weeks (7 days)
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years (12 months)
    Years,
}

impl TimeUnit {
    /// Maps a tenor suffix (`D`, `W`, `M`, `Y`, any case) to a unit.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'D' => Some(TimeUnit::Days),
            'W' => Some(TimeUnit::Weeks),
            'M' => Some(TimeUnit::Months),
            'Y' => Some(TimeUnit::Years),
            _ => None,
        }
    }

    /// Returns the single-letter suffix.
    pub fn code(&self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }
}

/// A relative period: positive count plus unit.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::{Tenor, TimeUnit};
///
/// let tenor: Tenor = "18M".parse().unwrap();
/// assert_eq!(tenor.count(), 18);
/// assert_eq!(tenor.unit(), TimeUnit::Months);
///
/// assert!("0D".parse::<Tenor>().is_err());
/// assert!("1Q".parse::<Tenor>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tenor {
    count: u32,
    unit: TimeUnit,
}

impl Tenor {
    /// Creates a tenor; the count must be positive.
    pub fn new(count: u32, unit: TimeUnit) -> Result<Self, DateError> {
        if count == 0 {
            return Err(DateError::InvalidTenor(format!("0{}", unit.code())));
        }
        Ok(Self { count, unit })
    }

    /// Number of units.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Unit of the period.
    #[inline]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }
}

impl FromStr for Tenor {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        let invalid = || DateError::InvalidTenor(s.to_string());
        let token = s.trim();
        let mut chars = token.chars();
        let unit = chars
            .next_back()
            .and_then(TimeUnit::from_code)
            .ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let count: u32 = digits.parse().map_err(|_| invalid())?;
        Tenor::new(count, unit).map_err(|_| invalid())
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.code())
    }
}

/// Day Count Convention (year fraction convention).
///
/// # Variants
/// - `Actual360`: Actual days / 360 (money market, rate curves)
/// - `Actual365Fixed`: Actual days / 365
/// - `ActualActualIsda`: Days in each calendar year over that year's length (vol curves)
/// - `Thirty360`: Each month treated as 30 days, year as 360 days
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/360: actual_days / 360.0
    Actual360,

    /// Actual/365 Fixed: actual_days / 365.0
    Actual365Fixed,

    /// Actual/Actual (ISDA)
    ///
    /// Splits the period at year boundaries; days falling in a leap year
    /// are divided by 366, the others by 365.
    ActualActualIsda,

    /// 30/360 US Bond Basis
    Thirty360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::Actual360.name(), "ACT/360");
    /// assert_eq!(DayCountConvention::ActualActualIsda.name(), "ACT/ACT ISDA");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual360 => "ACT/360",
            DayCountConvention::Actual365Fixed => "ACT/365F",
            DayCountConvention::ActualActualIsda => "ACT/ACT ISDA",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Returns a negative value when `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2023, 7, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    ///
    /// // 184 days of 2023 over 365, 182 days of 2024 over 366
    /// let yf = DayCountConvention::ActualActualIsda.year_fraction(start, end);
    /// assert!((yf - (184.0 / 365.0 + 182.0 / 366.0)).abs() < 1e-12);
    ///
    /// let yf_neg = DayCountConvention::Actual360.year_fraction(end, start);
    /// assert!((yf_neg + 366.0 / 360.0).abs() < 1e-12);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start > end {
            return -self.year_fraction(end, start);
        }
        let days = end - start;

        match self {
            DayCountConvention::Actual360 => days as f64 / 360.0,
            DayCountConvention::Actual365Fixed => days as f64 / 365.0,
            DayCountConvention::ActualActualIsda => {
                let (y1, y2) = (start.year(), end.year());
                if y1 == y2 {
                    return days as f64 / days_in_year(y1);
                }
                let first = (days_in_year(y1) - f64::from(start.ordinal0())) / days_in_year(y1);
                let whole = f64::from(y2 - y1 - 1);
                let last = f64::from(end.ordinal0()) / days_in_year(y2);
                first + whole + last
            }
            DayCountConvention::Thirty360 => {
                let d1 = if start.day() == 31 { 30 } else { start.day() };
                let d2 = if end.day() == 31 && d1 == 30 {
                    30
                } else {
                    end.day()
                };

                let days_30_360 = 360 * (end.year() - start.year())
                    + 30 * (end.month() as i32 - start.month() as i32)
                    + (d2 as i32 - d1 as i32);
                days_30_360 as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// Accepts CamelCase names (`Actual360`, `Actual365Fixed`,
    /// `ActualActual`) as well as market shorthand (`ACT/360`, `A365F`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s
            .to_uppercase()
            .replace(['/', ' ', '(', ')', '_', '-'], "")
            .as_str()
        {
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::Actual360),
            "ACT365" | "ACT365F" | "ACTUAL365" | "ACTUAL365FIXED" | "A365" | "A365F" => {
                Ok(DayCountConvention::Actual365Fixed)
            }
            "ACTACT" | "ACTACTISDA" | "ACTUALACTUAL" | "ACTUALACTUALISDA" => {
                Ok(DayCountConvention::ActualActualIsda)
            }
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Business day convention for adjusting non-business days.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Move to the next business day.
    Following,

    /// Move to the next business day, unless it crosses a month boundary.
    ModifiedFollowing,

    /// Move to the previous business day.
    Preceding,

    /// Do not adjust the date.
    Unadjusted,
}

impl BusinessDayConvention {
    /// Returns the standard name for this convention.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "following" | "f" => Ok(BusinessDayConvention::Following),
            "modifiedfollowing" | "mf" => Ok(BusinessDayConvention::ModifiedFollowing),
            "preceding" | "p" => Ok(BusinessDayConvention::Preceding),
            "unadjusted" | "u" | "none" => Ok(BusinessDayConvention::Unadjusted),
            _ => Err(format!("Unknown business day convention: {}", s)),
        }
    }
}
