//! Holiday calendars for business-day adjustment.
//!
//! The rule sets are expressed directly on (month, day, weekday) so that no
//! intermediate date has to be constructed while testing a candidate.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{BusinessDayConvention, Calendar, Date};
//!
//! let cal = Calendar::UnitedStatesGovernmentBond;
//! let july4 = Date::from_ymd(2024, 7, 4).unwrap();
//! assert!(!cal.is_business_day(july4));
//!
//! let adjusted = cal.adjust(july4, BusinessDayConvention::Following).unwrap();
//! assert_eq!(adjusted, Date::from_ymd(2024, 7, 5).unwrap());
//! ```

use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

use super::error::DateError;
use super::time::{is_leap_year, BusinessDayConvention, Date};

/// Business-day calendar.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Calendar {
    /// Saturday/Sunday weekends with no holidays.
    WeekendsOnly,

    /// US government bond market (SIFMA recommended closes).
    #[default]
    UnitedStatesGovernmentBond,

    /// TARGET2 settlement calendar.
    Target,
}

impl Calendar {
    /// Returns the calendar name.
    pub fn name(&self) -> &'static str {
        match self {
            Calendar::WeekendsOnly => "WeekendsOnly",
            Calendar::UnitedStatesGovernmentBond => "UnitedStates(GovernmentBond)",
            Calendar::Target => "TARGET",
        }
    }

    /// Returns `true` if `date` is neither a weekend nor a holiday.
    pub fn is_business_day(&self, date: Date) -> bool {
        if date.is_weekend() {
            return false;
        }
        match self {
            Calendar::WeekendsOnly => true,
            Calendar::UnitedStatesGovernmentBond => !is_us_government_bond_holiday(date),
            Calendar::Target => !is_target_holiday(date),
        }
    }

    /// Returns `true` for weekends and holidays.
    #[inline]
    pub fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Rolls `date` onto a business day according to `convention`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::{BusinessDayConvention, Calendar, Date};
    ///
    /// let cal = Calendar::WeekendsOnly;
    /// let sat = Date::from_ymd(2024, 8, 31).unwrap();
    ///
    /// let mf = cal.adjust(sat, BusinessDayConvention::ModifiedFollowing).unwrap();
    /// assert_eq!(mf, Date::from_ymd(2024, 8, 30).unwrap());
    /// ```
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date, DateError> {
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => self.roll(date, 1),
            BusinessDayConvention::Preceding => self.roll(date, -1),
            BusinessDayConvention::ModifiedFollowing => {
                let following = self.roll(date, 1)?;
                if following.month() != date.month() {
                    self.roll(date, -1)
                } else {
                    Ok(following)
                }
            }
        }
    }

    /// Moves `days` business days from `date`; negative values move back.
    pub fn advance_business_days(&self, date: Date, days: i32) -> Result<Date, DateError> {
        let step = if days >= 0 { 1 } else { -1 };
        let mut current = date;
        for _ in 0..days.unsigned_abs() {
            current = self.roll(current.add_days(step)?, step)?;
        }
        Ok(current)
    }

    fn roll(&self, date: Date, step: i64) -> Result<Date, DateError> {
        let mut current = date;
        while !self.is_business_day(current) {
            current = current.add_days(step)?;
        }
        Ok(current)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Calendar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s
            .to_lowercase()
            .replace([' ', '_', '-', '(', ')'], "")
            .as_str()
        {
            "weekendsonly" | "none" => Ok(Calendar::WeekendsOnly),
            "unitedstatesgovernmentbond" | "usgovernmentbond" | "usgb" | "nyc" => {
                Ok(Calendar::UnitedStatesGovernmentBond)
            }
            "target" | "target2" => Ok(Calendar::Target),
            _ => Err(format!("Unknown calendar: {}", s)),
        }
    }
}

/// One-based day of year of Easter Sunday (Meeus/Jones/Butcher).
fn easter_sunday_ordinal(year: i32) -> u32 {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;
    let leap = u32::from(is_leap_year(year));
    // Easter falls in March or April
    let before_month = if month == 3 { 59 } else { 90 };
    before_month + leap + day as u32
}

fn is_us_government_bond_holiday(date: Date) -> bool {
    let (y, m, d, w) = (date.year(), date.month(), date.day(), date.weekday());
    let ordinal = date.ordinal0() + 1;
    let good_friday = easter_sunday_ordinal(y) - 2;

    // New Year's Day, Sunday moves to Monday
    ((d == 1 || (d == 2 && w == Weekday::Mon)) && m == 1)
        // Martin Luther King's birthday, third Monday in January
        || ((15..=21).contains(&d) && w == Weekday::Mon && m == 1 && y >= 1983)
        // Washington's birthday, third Monday in February
        || ((15..=21).contains(&d) && w == Weekday::Mon && m == 2)
        || ordinal == good_friday
        // Memorial Day, last Monday in May
        || (d >= 25 && w == Weekday::Mon && m == 5)
        // Juneteenth
        || ((d == 19 || (d == 20 && w == Weekday::Mon) || (d == 18 && w == Weekday::Fri))
            && m == 6
            && y >= 2022)
        // Independence Day
        || ((d == 4 || (d == 5 && w == Weekday::Mon) || (d == 3 && w == Weekday::Fri)) && m == 7)
        // Labor Day, first Monday in September
        || (d <= 7 && w == Weekday::Mon && m == 9)
        // Columbus Day, second Monday in October
        || ((8..=14).contains(&d) && w == Weekday::Mon && m == 10 && y >= 1971)
        // Veterans Day
        || ((d == 11 || (d == 12 && w == Weekday::Mon) || (d == 10 && w == Weekday::Fri))
            && m == 11)
        // Thanksgiving, fourth Thursday in November
        || ((22..=28).contains(&d) && w == Weekday::Thu && m == 11)
        // Christmas
        || ((d == 25 || (d == 26 && w == Weekday::Mon) || (d == 24 && w == Weekday::Fri))
            && m == 12)
}

fn is_target_holiday(date: Date) -> bool {
    let easter = easter_sunday_ordinal(date.year());
    let ordinal = date.ordinal0() + 1;
    matches!(
        (date.month(), date.day()),
        (1, 1) | (5, 1) | (12, 25) | (12, 26)
    ) || ordinal == easter - 2
        || ordinal == easter + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_us_fixed_holidays() {
        let cal = Calendar::UnitedStatesGovernmentBond;
        assert!(cal.is_holiday(d(2024, 1, 1)));
        assert!(cal.is_holiday(d(2024, 7, 4)));
        assert!(cal.is_holiday(d(2024, 12, 25)));
        assert!(cal.is_holiday(d(2024, 6, 19)));
        assert!(cal.is_holiday(d(2024, 11, 11)));
    }

    #[test]
    fn test_us_observed_holidays() {
        let cal = Calendar::UnitedStatesGovernmentBond;
        // July 4th 2026 is a Saturday
        assert!(cal.is_holiday(d(2026, 7, 3)));
        // Christmas 2022 was a Sunday
        assert!(cal.is_holiday(d(2022, 12, 26)));
    }

    #[test]
    fn test_us_floating_holidays() {
        let cal = Calendar::UnitedStatesGovernmentBond;
        assert!(cal.is_holiday(d(2024, 1, 15))); // MLK
        assert!(cal.is_holiday(d(2024, 2, 19))); // Presidents
        assert!(cal.is_holiday(d(2024, 5, 27))); // Memorial
        assert!(cal.is_holiday(d(2024, 9, 2))); // Labor
        assert!(cal.is_holiday(d(2024, 10, 14))); // Columbus
        assert!(cal.is_holiday(d(2024, 11, 28))); // Thanksgiving
    }

    #[test]
    fn test_good_friday() {
        let cal = Calendar::UnitedStatesGovernmentBond;
        assert!(cal.is_holiday(d(2024, 3, 29)));
        assert!(cal.is_holiday(d(2025, 4, 18)));
        assert!(cal.is_business_day(d(2025, 4, 21)));
        assert!(Calendar::Target.is_holiday(d(2025, 4, 21)));
    }

    #[test]
    fn test_juneteenth_not_before_2022() {
        assert!(Calendar::UnitedStatesGovernmentBond.is_business_day(d(2021, 6, 18)));
    }

    #[test]
    fn test_ordinary_day_is_business_day() {
        for cal in [
            Calendar::WeekendsOnly,
            Calendar::UnitedStatesGovernmentBond,
            Calendar::Target,
        ] {
            assert!(cal.is_business_day(d(2024, 3, 12)));
            assert!(cal.is_holiday(d(2024, 3, 16)));
        }
    }

    #[test]
    fn test_adjust_conventions() {
        let cal = Calendar::UnitedStatesGovernmentBond;
        let sat = d(2024, 3, 30);
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::Following).unwrap(),
            d(2024, 4, 1)
        );
        // Preceding skips Good Friday as well
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::Preceding).unwrap(),
            d(2024, 3, 28)
        );
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::ModifiedFollowing)
                .unwrap(),
            d(2024, 3, 28)
        );
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::Unadjusted).unwrap(),
            sat
        );
    }

    #[test]
    fn test_advance_business_days() {
        let cal = Calendar::WeekendsOnly;
        let fri = d(2024, 3, 15);
        assert_eq!(cal.advance_business_days(fri, 2).unwrap(), d(2024, 3, 19));
        assert_eq!(cal.advance_business_days(fri, -5).unwrap(), d(2024, 3, 8));
        assert_eq!(cal.advance_business_days(fri, 0).unwrap(), fri);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "UnitedStates(GovernmentBond)".parse::<Calendar>().unwrap(),
            Calendar::UnitedStatesGovernmentBond
        );
        assert_eq!("target".parse::<Calendar>().unwrap(), Calendar::Target);
        assert!("mars".parse::<Calendar>().is_err());
    }
}
