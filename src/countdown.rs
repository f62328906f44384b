//! Age and next-birthday arithmetic.
//!
//! Every function takes the reference date `now` explicitly; nothing here
//! reads a clock. Dates are compared as raw `(year, month, day)` triples so a
//! countdown that rolls past `MAX_YEAR` still has a length.

use std::cmp::Ordering;

use crate::consts::{APPROX_DAYS_PER_MONTH, FEBRUARY, FEBRUARY_DAYS_COMMON, MARCH, MIN_DAY};
use crate::types::{day_number, days_in_month, is_leap_year};
use crate::{AgePolicy, CivilDate, EngineConfig, LeapDayPolicy, MonthDay};

type RawDate = (u16, u8, u8);

/// Calendar-aware distance to a birthday: whole months, then leftover days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Countdown {
    months: u32,
    days:   u32,
}

impl Countdown {
    pub const fn new(months: u32, days: u32) -> Self {
        Self { months, days }
    }

    pub const fn months(&self) -> u32 {
        self.months
    }

    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Length with every month counted as 30 days
    pub const fn approx_total_days(&self) -> u32 {
        self.months * APPROX_DAYS_PER_MONTH + self.days
    }

    pub const fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.months, self.days) {
            (0, days) => write!(f, "{days} {}", plural(days, "day")),
            (months, 0) => write!(f, "{months} {}", plural(months, "month")),
            (months, days) => write!(
                f,
                "{months} {}, {days} {}",
                plural(months, "month"),
                plural(days, "day")
            ),
        }
    }
}

/// Rounded headline for "time until": days when under a month, otherwise
/// whole 30-day months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUntil {
    Days(u32),
    Months(u32),
}

impl From<Countdown> for TimeUntil {
    fn from(countdown: Countdown) -> Self {
        let total = countdown.approx_total_days();
        let rounded = total / APPROX_DAYS_PER_MONTH;
        if rounded < 1 {
            Self::Days(total)
        } else {
            Self::Months(rounded)
        }
    }
}

impl std::fmt::Display for TimeUntil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Days(n) => write!(f, "{n} {}", plural(n, "day")),
            Self::Months(n) => write!(f, "{n} {}", plural(n, "month")),
        }
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 { unit.to_owned() } else { format!("{unit}s") }
}

/// Year difference only, ignoring whether the birthday has come yet.
///
/// Someone born on December 31 is counted a year older on January 1.
pub fn age_naive(birth: &CivilDate, now: &CivilDate) -> i32 {
    i32::from(now.year()) - i32::from(birth.year())
}

/// Completed years of life as of `now`.
pub fn age(birth: &CivilDate, now: &CivilDate) -> i32 {
    age_with(birth, now, &EngineConfig::default())
}

/// Age according to `config`. Under the adjusted policy the count goes up on
/// the observed birthday, so a Feb 29 birthday follows the leap-day policy.
pub fn age_with(birth: &CivilDate, now: &CivilDate, config: &EngineConfig) -> i32 {
    let naive = age_naive(birth, now);
    match config.age_policy() {
        AgePolicy::Naive => naive,
        AgePolicy::Adjusted => {
            let this_year = observed(birth.month_day(), now.year(), config.leap_day_policy());
            if now.to_columns() < this_year {
                naive - 1
            } else {
                naive
            }
        },
    }
}

/// The date the birthday is next celebrated on or after `now`.
///
/// Returns `None` only when that date would fall after `MAX_YEAR`.
pub fn next_birthday_date(birth: &CivilDate, now: &CivilDate) -> Option<CivilDate> {
    next_birthday_date_with(birth, now, LeapDayPolicy::default())
}

pub fn next_birthday_date_with(birth: &CivilDate, now: &CivilDate, policy: LeapDayPolicy) -> Option<CivilDate> {
    let (year, month, day) = next_occurrence(birth.month_day(), now, policy);
    CivilDate::new(year, month, day).ok()
}

/// Whole days until the next birthday; 0 when it is today.
pub fn days_until_next_birthday(birth: &CivilDate, now: &CivilDate) -> u32 {
    days_until_next_birthday_with(birth, now, LeapDayPolicy::default())
}

pub fn days_until_next_birthday_with(birth: &CivilDate, now: &CivilDate, policy: LeapDayPolicy) -> u32 {
    let (year, month, day) = next_occurrence(birth.month_day(), now, policy);
    let days = day_number(year, month, day) - now.day_number();
    u32::try_from(days).unwrap_or_default()
}

pub fn is_birthday_today(birth: &CivilDate, now: &CivilDate) -> bool {
    is_birthday_today_with(birth, now, LeapDayPolicy::default())
}

pub fn is_birthday_today_with(birth: &CivilDate, now: &CivilDate, policy: LeapDayPolicy) -> bool {
    observed(birth.month_day(), now.year(), policy) == now.to_columns()
}

/// Months and days until the next birthday.
///
/// `months` is the largest count for which `now` moved forward that many
/// months (day clamped to the month's length) is not past the birthday;
/// `days` is what remains.
pub fn months_and_days_until_birthday(birth: &CivilDate, now: &CivilDate) -> Countdown {
    months_and_days_until_birthday_with(birth, now, LeapDayPolicy::default())
}

pub fn months_and_days_until_birthday_with(birth: &CivilDate, now: &CivilDate, policy: LeapDayPolicy) -> Countdown {
    let target = next_occurrence(birth.month_day(), now, policy);
    let start = now.to_columns();

    let mut months = month_index(target) - month_index(start);
    let mut shifted = add_months_clamped(start, months);
    if shifted > target {
        months -= 1;
        shifted = add_months_clamped(start, months);
    }

    let days = day_number(target.0, target.1, target.2) - day_number(shifted.0, shifted.1, shifted.2);
    Countdown::new(
        u32::try_from(months).unwrap_or_default(),
        u32::try_from(days).unwrap_or_default(),
    )
}

/// Rounded "time until" headline; see [`TimeUntil`].
pub fn months_until_birthday_simplified(birth: &CivilDate, now: &CivilDate) -> TimeUntil {
    months_until_birthday_simplified_with(birth, now, LeapDayPolicy::default())
}

pub fn months_until_birthday_simplified_with(birth: &CivilDate, now: &CivilDate, policy: LeapDayPolicy) -> TimeUntil {
    months_and_days_until_birthday_with(birth, now, policy).into()
}

/// Orders two birthdays by how soon they come, today first.
pub(crate) fn compare_days_until(a: u32, b: u32) -> Ordering {
    match (a == 0, b == 0) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(&b),
    }
}

/// The date `md` is celebrated in `year`.
fn observed(md: MonthDay, year: u16, policy: LeapDayPolicy) -> RawDate {
    if md.is_leap_day() && !is_leap_year(year) {
        match policy {
            LeapDayPolicy::Feb28 => (year, FEBRUARY, FEBRUARY_DAYS_COMMON),
            LeapDayPolicy::Mar1 => (year, MARCH, MIN_DAY),
        }
    } else {
        (year, md.month(), md.day())
    }
}

/// This year's celebration unless it has already passed; today counts as not passed.
fn next_occurrence(md: MonthDay, now: &CivilDate, policy: LeapDayPolicy) -> RawDate {
    let candidate = observed(md, now.year(), policy);
    if candidate < now.to_columns() {
        observed(md, now.year() + 1, policy)
    } else {
        candidate
    }
}

fn month_index((year, month, _): RawDate) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

fn add_months_clamped(start: RawDate, months: i64) -> RawDate {
    let index = month_index(start) + months;
    let year = u16::try_from(index.div_euclid(12)).unwrap_or(u16::MAX);
    let month = u8::try_from(index.rem_euclid(12) + 1).unwrap_or(1);
    let day = start.2.min(days_in_month(year, month));
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_reference_example() {
        let birth = date(1990, 6, 15);
        let now = date(2024, 1, 1);

        assert_eq!(age_naive(&birth, &now), 34);
        assert_eq!(age(&birth, &now), 33);
        assert_eq!(next_birthday_date(&birth, &now), Some(date(2024, 6, 15)));
        assert_eq!(days_until_next_birthday(&birth, &now), 166);
        assert_eq!(months_and_days_until_birthday(&birth, &now), Countdown::new(5, 14));
        assert_eq!(months_until_birthday_simplified(&birth, &now), TimeUntil::Months(5));
    }

    #[test]
    fn test_naive_age_counts_new_year() {
        let birth = date(1990, 12, 31);
        let now = date(1991, 1, 1);
        assert_eq!(age_naive(&birth, &now), 1);
        assert_eq!(age(&birth, &now), 0);
        let naive = EngineConfig::new().with_age_policy(AgePolicy::Naive);
        assert_eq!(age_with(&birth, &now, &naive), 1);
    }

    #[test]
    fn test_adjusted_age_on_birthday() {
        let birth = date(1990, 6, 15);
        assert_eq!(age(&birth, &date(2024, 6, 14)), 33);
        assert_eq!(age(&birth, &date(2024, 6, 15)), 34);
        assert_eq!(age(&birth, &date(2024, 12, 31)), 34);
    }

    #[test]
    fn test_birthday_today_is_zero() {
        let birth = date(1985, 3, 9);
        let now = date(2024, 3, 9);
        assert_eq!(days_until_next_birthday(&birth, &now), 0);
        assert!(is_birthday_today(&birth, &now));
        assert_eq!(next_birthday_date(&birth, &now), Some(now));
        assert!(months_and_days_until_birthday(&birth, &now).is_zero());
        assert_eq!(months_until_birthday_simplified(&birth, &now), TimeUntil::Days(0));
    }

    #[test]
    fn test_rollover_after_birthday_passed() {
        let birth = date(1985, 3, 9);
        let now = date(2023, 3, 10);
        assert_eq!(next_birthday_date(&birth, &now), Some(date(2024, 3, 9)));
        assert_eq!(days_until_next_birthday(&birth, &now), 365);
        assert_eq!(months_and_days_until_birthday(&birth, &now), Countdown::new(11, 28));
    }

    #[test]
    fn test_month_decomposition_clamps_day() {
        // Jan 31 + 1 month lands on Feb 29 in 2024, one day short of Mar 1.
        let birth = date(1970, 3, 1);
        let now = date(2024, 1, 31);
        assert_eq!(months_and_days_until_birthday(&birth, &now), Countdown::new(1, 1));
        assert_eq!(days_until_next_birthday(&birth, &now), 30);
    }

    #[test]
    fn test_simplified_rounding_cases() {
        struct TestCase {
            birth:    CivilDate,
            now:      CivilDate,
            expected: TimeUntil,
        }

        let cases = [
            TestCase {
                birth:    date(2000, 1, 30),
                now:      date(2024, 1, 1),
                expected: TimeUntil::Days(29),
            },
            TestCase {
                birth:    date(2000, 2, 1),
                now:      date(2024, 1, 1),
                expected: TimeUntil::Months(1),
            },
            TestCase {
                birth:    date(2000, 3, 31),
                now:      date(2024, 1, 1),
                expected: TimeUntil::Months(3),
            },
            TestCase {
                birth:    date(2000, 12, 31),
                now:      date(2024, 1, 1),
                expected: TimeUntil::Months(12),
            },
        ];

        for case in &cases {
            assert_eq!(
                months_until_birthday_simplified(&case.birth, &case.now),
                case.expected,
                "birth {} now {}",
                case.birth,
                case.now
            );
        }
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Countdown::new(5, 14).to_string(), "5 months, 14 days");
        assert_eq!(Countdown::new(1, 1).to_string(), "1 month, 1 day");
        assert_eq!(Countdown::new(2, 0).to_string(), "2 months");
        assert_eq!(Countdown::new(0, 3).to_string(), "3 days");
        assert_eq!(TimeUntil::Days(1).to_string(), "1 day");
        assert_eq!(TimeUntil::Months(4).to_string(), "4 months");
    }

    #[test]
    fn test_leap_day_birthday_feb28_policy() {
        let birth = date(2000, 2, 29);
        let now = date(2023, 2, 1);
        assert_eq!(next_birthday_date(&birth, &now), Some(date(2023, 2, 28)));
        assert_eq!(days_until_next_birthday(&birth, &now), 27);
        assert!(is_birthday_today(&birth, &date(2023, 2, 28)));
        assert_eq!(age(&birth, &date(2023, 2, 28)), 23);
        assert_eq!(age(&birth, &date(2023, 2, 27)), 22);
    }

    #[test]
    fn test_leap_day_birthday_mar1_policy() {
        let birth = date(2000, 2, 29);
        let now = date(2023, 2, 28);
        let policy = LeapDayPolicy::Mar1;
        assert_eq!(next_birthday_date_with(&birth, &now, policy), Some(date(2023, 3, 1)));
        assert_eq!(days_until_next_birthday_with(&birth, &now, policy), 1);
        assert!(!is_birthday_today_with(&birth, &now, policy));

        let config = EngineConfig::new().with_leap_day_policy(policy);
        assert_eq!(age_with(&birth, &now, &config), 22);
        assert_eq!(age_with(&birth, &date(2023, 3, 1), &config), 23);
    }

    #[test]
    fn test_leap_day_birthday_in_leap_year() {
        let birth = date(2000, 2, 29);
        let now = date(2024, 2, 28);
        assert_eq!(next_birthday_date(&birth, &now), Some(date(2024, 2, 29)));
        assert_eq!(days_until_next_birthday(&birth, &now), 1);
    }

    #[test]
    fn test_next_birthday_past_max_year() {
        let birth = date(1990, 1, 1);
        let now = date(9999, 6, 1);
        assert_eq!(next_birthday_date(&birth, &now), None);
        assert_eq!(days_until_next_birthday(&birth, &now), 214);
    }

    #[test]
    fn test_countdown_properties_over_a_year() {
        let now = date(2023, 7, 4);
        for month in 1..=12u8 {
            for day in 1..=days_in_month(2023, month) {
                let birth = date(1980, month, day);
                let days = days_until_next_birthday(&birth, &now);
                let next = next_birthday_date(&birth, &now).expect("within MAX_YEAR");

                assert!(days < 366, "{birth}: {days} days");
                assert_eq!(days == 0, (month, day) == (7, 4), "{birth}");
                assert!(next.year() == now.year() || next.year() == now.year() + 1, "{birth}");
                assert_eq!(i64::from(days), now.days_until(&next), "{birth}");
            }
        }
    }

    #[test]
    fn test_compare_days_until_pins_today() {
        assert_eq!(compare_days_until(0, 1), Ordering::Less);
        assert_eq!(compare_days_until(5, 0), Ordering::Greater);
        assert_eq!(compare_days_until(3, 7), Ordering::Less);
        assert_eq!(compare_days_until(0, 0), Ordering::Equal);
    }
}
