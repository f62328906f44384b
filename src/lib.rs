//! Calendar facts about the people in a family contact list.
//!
//! The core is a set of pure functions over [`CivilDate`] values: age,
//! countdown to the next birthday, Western zodiac sign, lunar zodiac animal
//! and a school-grade estimate. Around it sit the contact-list model and the
//! traits the host application implements for storage, photos, the device
//! address book and the device calendar.

mod almanac;
mod book;
mod collab;
mod config;
mod consts;
mod contact;
mod countdown;
mod grade;
mod lunar;
mod prelude;
mod profile;
mod range;
mod types;
mod western;

#[cfg(test)]
mod test_utils;

pub use almanac::{Almanac, AlmanacError, StaticAlmanac};
pub use book::{BookError, ContactBook, ImportReport};
pub use collab::{
    AnnualEvent, BlobStore, CalendarService, ContactDirectory, DirectoryBirthday, DirectoryEntry,
    MemoryBlobs, MemoryCalendar, MemoryDirectory, MemorySettings, SettingsStore, StoreError,
};
pub use config::{AgePolicy, EngineConfig, LeapDayPolicy};
pub use consts::*;
pub use contact::{Contact, ContactList, SortDirection, SortOption};
pub use countdown::{
    Countdown, TimeUntil, age, age_naive, age_with, days_until_next_birthday,
    days_until_next_birthday_with, is_birthday_today, is_birthday_today_with,
    months_and_days_until_birthday, months_and_days_until_birthday_with,
    months_until_birthday_simplified, months_until_birthday_simplified_with, next_birthday_date,
    next_birthday_date_with,
};
pub use grade::{Grade, estimate_grade};
pub use lunar::{LunarAnimal, LunarNewYearTable, LunarSign, Polarity, TableError, ThresholdCheck, lunar_sign};
pub use profile::BirthdayProfile;
pub use range::{MonthDay, MonthDayRange, RangeError};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};
pub use western::{Element, Modality, ZodiacSign};

use crate::prelude::*;
use std::str::FromStr;
use types::day_number;

/// A calendar date with no time of day and no time zone.
///
/// Construction validates every component, so the engine functions can treat
/// any `CivilDate` as well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CivilDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid day {day} for month {month:02}")]
    InvalidMonthDay { month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CivilDate {
    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns a `ParseError` naming the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    /// Creates a date from components that are already validated on their own.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that month of that year.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        Self::new(year.get(), month.get(), day.get())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// The year-less part of the date
    pub const fn month_day(&self) -> MonthDay {
        MonthDay::from_parts(self.month, self.day)
    }

    /// Long form used on birthday cards: "June 15, 1990"
    pub fn long_format(&self) -> String {
        format!("{} {}, {}", self.month.name(), self.day, self.year)
    }

    /// Days since 1970-01-01 (negative before)
    pub const fn day_number(&self) -> i64 {
        day_number(self.year(), self.month(), self.day())
    }

    /// Number of days from `self` to `other` (negative when `other` is earlier)
    pub const fn days_until(&self, other: &Self) -> i64 {
        other.day_number() - self.day_number()
    }

    /// Converts to storage columns: (year, month, day)
    pub const fn to_columns(&self) -> (u16, u8, u8) {
        (self.year(), self.month(), self.day())
    }

    /// Creates from storage columns: (year, month, day)
    ///
    /// # Errors
    /// Returns a `ParseError` if any component is invalid.
    pub fn from_columns(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Self::new(year, month, day)
    }
}

impl FromStr for CivilDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Strictly enforce delimiters: DATE_SEPARATOR for ISO, MONTH_FIRST_SEPARATOR for month-first
        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        if has_hyphen && has_slash {
            return Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
            )));
        }

        if has_hyphen {
            // ISO format: YYYY-MM-DD
            let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
            match parts.as_slice() {
                [year, month, day] => {
                    Self::new(Self::parse_u16(year)?, Self::parse_u8(month)?, Self::parse_u8(day)?)
                },
                _ => Err(ParseError::InvalidFormat(format!(
                    "Expected 2 {DATE_SEPARATOR} separators, found {}: {s}",
                    parts.len() - 1
                ))),
            }
        } else if has_slash {
            // Month-first format: MM/DD/YYYY
            let parts: Vec<&str> = trimmed.split(MONTH_FIRST_SEPARATOR).map(str::trim).collect();
            match parts.as_slice() {
                [month, day, year] => {
                    Self::new(Self::parse_u16(year)?, Self::parse_u8(month)?, Self::parse_u8(day)?)
                },
                _ => Err(ParseError::InvalidFormat(format!(
                    "Expected 2 {MONTH_FIRST_SEPARATOR} separators, found {}: {s}",
                    parts.len() - 1
                ))),
            }
        } else {
            Err(ParseError::InvalidFormat(format!("No date separator found: {s}")))
        }
    }
}

impl CivilDate {
    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<(u16, u8, u8)> for CivilDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_columns(value.0, value.1, value.2)
    }
}

impl serde::Serialize for CivilDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CivilDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
