//! Lunar (Chinese) zodiac.
//!
//! The animal follows the lunar year, which begins on Lunar New Year rather
//! than January 1. A [`LunarNewYearTable`] supplies that date per Gregorian
//! year; births earlier in the year belong to the previous animal. Years the
//! table does not cover fall back to the plain 12-year cycle and say so in
//! [`LunarSign::threshold`].

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{LUNAR_BASE_YEAR, LUNAR_CYCLE_LEN};
use crate::prelude::*;
use crate::types::days_in_month;
use crate::{CivilDate, MonthDay, ParseError};

/// The twelve animals in cycle order; `Rat` is index 0 (1900).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum LunarAnimal {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Polarity {
    Yin,
    Yang,
}

impl LunarAnimal {
    pub const ALL: [Self; 12] = [
        Self::Rat,
        Self::Ox,
        Self::Tiger,
        Self::Rabbit,
        Self::Dragon,
        Self::Snake,
        Self::Horse,
        Self::Goat,
        Self::Monkey,
        Self::Rooster,
        Self::Dog,
        Self::Pig,
    ];

    /// Animal of a lunar year, by position in the cycle. Works for any year,
    /// including those before 1900.
    pub fn for_year(effective_year: i32) -> Self {
        let index = (effective_year - LUNAR_BASE_YEAR).rem_euclid(LUNAR_CYCLE_LEN);
        Self::ALL[usize::try_from(index).unwrap_or_default()]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Rat => "🐀",
            Self::Ox => "🐂",
            Self::Tiger => "🐅",
            Self::Rabbit => "🐇",
            Self::Dragon => "🐉",
            Self::Snake => "🐍",
            Self::Horse => "🐎",
            Self::Goat => "🐐",
            Self::Monkey => "🐒",
            Self::Rooster => "🐓",
            Self::Dog => "🐕",
            Self::Pig => "🐖",
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Rat | Self::Tiger | Self::Dragon | Self::Horse | Self::Monkey | Self::Dog => Polarity::Yang,
            Self::Ox | Self::Rabbit | Self::Snake | Self::Goat | Self::Rooster | Self::Pig => Polarity::Yin,
        }
    }

    pub const fn lucky_numbers(self) -> &'static [u8] {
        match self {
            Self::Rat | Self::Goat => &[2, 3],
            Self::Ox => &[1, 4],
            Self::Tiger => &[1, 3, 4],
            Self::Rabbit => &[3, 4, 6],
            Self::Dragon => &[1, 6, 7],
            Self::Snake => &[2, 8, 9],
            Self::Horse => &[2, 3, 7],
            Self::Monkey => &[4, 9],
            Self::Rooster => &[5, 7, 8],
            Self::Dog => &[3, 4, 9],
            Self::Pig => &[2, 5, 8],
        }
    }

    /// Traditionally most compatible animals, strongest match first
    pub const fn best_matches(self) -> [Self; 3] {
        match self {
            Self::Rat => [Self::Dragon, Self::Monkey, Self::Ox],
            Self::Ox => [Self::Rat, Self::Snake, Self::Rooster],
            Self::Tiger => [Self::Horse, Self::Dog, Self::Pig],
            Self::Rabbit => [Self::Goat, Self::Pig, Self::Dog],
            Self::Dragon => [Self::Rat, Self::Monkey, Self::Rooster],
            Self::Snake => [Self::Ox, Self::Rooster, Self::Dragon],
            Self::Horse => [Self::Tiger, Self::Goat, Self::Dog],
            Self::Goat => [Self::Rabbit, Self::Horse, Self::Pig],
            Self::Monkey => [Self::Rat, Self::Dragon, Self::Snake],
            Self::Rooster => [Self::Ox, Self::Snake, Self::Dragon],
            Self::Dog => [Self::Tiger, Self::Horse, Self::Rabbit],
            Self::Pig => [Self::Rabbit, Self::Goat, Self::Tiger],
        }
    }
}

/// How the birth date compared with its year's Lunar New Year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdCheck {
    /// Born before Lunar New Year: counted in the previous lunar year.
    BeforeNewYear,
    /// Born on or after Lunar New Year.
    OnOrAfterNewYear,
    /// The table has no entry for the birth year; the Gregorian year was used as is.
    NotCovered,
}

/// Result of classifying a birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarSign {
    animal:         LunarAnimal,
    effective_year: i32,
    threshold:      ThresholdCheck,
}

impl LunarSign {
    pub const fn animal(&self) -> LunarAnimal {
        self.animal
    }

    /// Gregorian year in which the birth's lunar year started
    pub const fn effective_year(&self) -> i32 {
        self.effective_year
    }

    pub const fn threshold(&self) -> ThresholdCheck {
        self.threshold
    }

    /// False when the result comes from the bare 12-year cycle because the
    /// table did not cover the birth year.
    pub const fn is_corrected(&self) -> bool {
        !matches!(self.threshold, ThresholdCheck::NotCovered)
    }
}

/// Classifies `birth` using the Lunar New Year dates in `table`.
pub fn lunar_sign(birth: &CivilDate, table: &LunarNewYearTable) -> LunarSign {
    let year = i32::from(birth.year());
    let (effective_year, threshold) = match table.get(birth.year()) {
        Some(new_year) if birth.month_day() < new_year => (year - 1, ThresholdCheck::BeforeNewYear),
        Some(_) => (year, ThresholdCheck::OnOrAfterNewYear),
        None => (year, ThresholdCheck::NotCovered),
    };
    LunarSign {
        animal: LunarAnimal::for_year(effective_year),
        effective_year,
        threshold,
    }
}

/// Error type for building a Lunar New Year table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// An entry does not name a real day of its year (e.g. 02-29 in 2023).
    #[error("Invalid Lunar New Year {year}-{month_day}: {source}")]
    InvalidEntry {
        year:      u16,
        month_day: MonthDay,
        source:    ParseError,
    },

    /// The JSON payload could not be read.
    #[error("Invalid Lunar New Year table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Gregorian year → month-day of that year's Lunar New Year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LunarNewYearTable {
    entries: BTreeMap<u16, MonthDay>,
}

impl LunarNewYearTable {
    /// A table with no entries; every lookup falls back to the plain cycle.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lunar New Year dates for 1900 through 2043.
    pub fn builtin() -> Self {
        let entries = BUILTIN_NEW_YEARS
            .iter()
            .zip(BUILTIN_FIRST_YEAR..)
            .filter_map(|(&(month, day), year)| MonthDay::new(month, day).ok().map(|md| (year, md)))
            .collect();
        Self { entries }
    }

    /// Adds or replaces the entry for `year`, returning the previous one.
    ///
    /// # Errors
    /// Returns `TableError::InvalidEntry` if `month_day` does not exist in `year`.
    pub fn insert(&mut self, year: u16, month_day: MonthDay) -> Result<Option<MonthDay>, TableError> {
        if month_day.day() > days_in_month(year, month_day.month()) {
            return Err(TableError::InvalidEntry {
                year,
                month_day,
                source: ParseError::InvalidDay {
                    month: month_day.month(),
                    day: month_day.day(),
                    year,
                },
            });
        }
        Ok(self.entries.insert(year, month_day))
    }

    /// Merges entries from a JSON object such as `{"2044": "01-30"}`.
    /// Later entries replace existing ones. Returns how many entries were read.
    ///
    /// # Errors
    /// Returns `TableError` if the JSON is malformed or an entry is invalid;
    /// the table is left unchanged in that case.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, TableError> {
        let incoming: Self = serde_json::from_str(json)?;
        let mut merged = self.clone();
        for (&year, &month_day) in &incoming.entries {
            merged.insert(year, month_day)?;
        }
        *self = merged;
        debug!(entries = incoming.entries.len(), span = ?self.span(), "extended Lunar New Year table");
        Ok(incoming.entries.len())
    }

    pub fn get(&self, year: u16) -> Option<MonthDay> {
        self.entries.get(&year).copied()
    }

    pub fn covers(&self, year: u16) -> bool {
        self.entries.contains_key(&year)
    }

    /// First and last covered years (there may be gaps in between)
    pub fn span(&self) -> Option<RangeInclusive<u16>> {
        let first = *self.entries.keys().next()?;
        let last = *self.entries.keys().next_back()?;
        Some(first..=last)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const BUILTIN_FIRST_YEAR: u16 = 1900;

/// (month, day) of Lunar New Year, one entry per year from `BUILTIN_FIRST_YEAR`.
const BUILTIN_NEW_YEARS: [(u8, u8); 144] = [
    (1, 30), (2, 19), (2, 8), (1, 29), (2, 16), (2, 4), (1, 25), (2, 13), (2, 2), (1, 22), // 1900
    (2, 10), (1, 30), (2, 18), (2, 6), (1, 26), (2, 14), (2, 3), (1, 23), (2, 11), (2, 1), // 1910
    (2, 20), (2, 8), (1, 28), (2, 16), (2, 5), (1, 25), (2, 13), (2, 2), (1, 23), (2, 10), // 1920
    (1, 30), (2, 17), (2, 6), (1, 26), (2, 14), (2, 4), (1, 24), (2, 11), (1, 31), (2, 19), // 1930
    (2, 8), (1, 27), (2, 15), (2, 5), (1, 25), (2, 13), (2, 2), (1, 22), (2, 10), (1, 29), // 1940
    (2, 17), (2, 6), (1, 27), (2, 14), (2, 3), (1, 24), (2, 12), (1, 31), (2, 18), (2, 8), // 1950
    (1, 28), (2, 15), (2, 5), (1, 25), (2, 13), (2, 2), (1, 21), (2, 9), (1, 30), (2, 17), // 1960
    (2, 6), (1, 27), (2, 15), (2, 3), (1, 23), (2, 11), (1, 31), (2, 18), (2, 7), (1, 28), // 1970
    (2, 16), (2, 5), (1, 25), (2, 13), (2, 2), (1, 21), (2, 9), (1, 29), (2, 17), (2, 6), // 1980
    (1, 27), (2, 15), (2, 4), (1, 23), (2, 10), (1, 31), (2, 19), (2, 7), (1, 28), (2, 16), // 1990
    (2, 5), (1, 24), (2, 12), (2, 1), (1, 22), (2, 9), (1, 29), (2, 18), (2, 7), (1, 26), // 2000
    (2, 14), (2, 3), (1, 23), (2, 10), (1, 31), (2, 19), (2, 8), (1, 28), (2, 16), (2, 5), // 2010
    (1, 25), (2, 12), (2, 1), (1, 22), (2, 10), (1, 29), (2, 17), (2, 6), (1, 26), (2, 13), // 2020
    (2, 3), (1, 23), (2, 11), (1, 31), (2, 19), (2, 8), (1, 28), (2, 15), (2, 4), (1, 24), // 2030
    (2, 12), (2, 1), (1, 22), (2, 10), // 2040
];
