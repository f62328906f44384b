use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DATE_SEPARATOR, ParseError, RANGE_SEPARATOR, prelude::*, types::{Day, Month}};

/// A month and day with no year, such as a birthday without the birth year.
/// February 29 is a valid `MonthDay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}-{:02}", "month.get()", "day.get()")]
pub struct MonthDay {
    month: Month,
    day:   Day,
}

impl MonthDay {
    /// Creates a month-day, accepting any day that exists in some year.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidMonthDay`.
    pub fn new(month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            month: Month::new(month)?,
            day:   Day::in_any_year(day, month)?,
        })
    }

    pub(crate) const fn from_parts(month: Month, day: Day) -> Self {
        Self { month, day }
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// True for February 29
    pub const fn is_leap_day(&self) -> bool {
        self.month.get() == crate::FEBRUARY && self.day.get() == crate::FEBRUARY_DAYS_LEAP
    }

    /// Short form used in list rows: "Jun 15"
    pub fn short_format(&self) -> String {
        let name = self.month.name();
        format!("{} {}", name.get(..3).unwrap_or(name), self.day)
    }
}

impl FromStr for MonthDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let (month, day) = trimmed
            .split_once(DATE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(format!("Expected MM{DATE_SEPARATOR}DD: {s}")))?;
        let month = month
            .trim()
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(month.to_owned()))?;
        let day = day
            .trim()
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(day.to_owned()))?;
        Self::new(month, day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An inclusive span of month-days.
/// When `start` is after `end` the span wraps across December 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct MonthDayRange {
    start: MonthDay,
    end:   MonthDay,
}

/// Error type for month-day range parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Error parsing one of the endpoints.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl MonthDayRange {
    pub const fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    /// Returns the first day of the range
    pub const fn start(&self) -> MonthDay {
        self.start
    }

    /// Returns the last day of the range
    pub const fn end(&self) -> MonthDay {
        self.end
    }

    /// True when the range runs from late in the year into early the next
    pub fn wraps_year_end(&self) -> bool {
        self.start > self.end
    }

    /// Checks if the range contains a given month-day (bounds inclusive)
    pub fn contains(&self, md: MonthDay) -> bool {
        if self.wraps_year_end() {
            md >= self.start || md <= self.end
        } else {
            self.start <= md && md <= self.end
        }
    }
}

impl FromStr for MonthDayRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start, end) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                Ok(Self::new(start.parse()?, end.parse()?))
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for MonthDayRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDayRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
