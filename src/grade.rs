//! School grade estimate for children, assuming a September 1 cutoff.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::MonthDay;
use crate::consts::{KINDERGARTEN_AGE, MAX_GRADE, MAX_SCHOOL_AGE, SCHOOL_CUTOFF_DAY, SCHOOL_CUTOFF_MONTH};

/// A K-12 grade; 0 is kindergarten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    pub const KINDERGARTEN: Self = Self(0);

    /// Returns `None` above twelfth grade.
    pub const fn new(level: u8) -> Option<Self> {
        if level > MAX_GRADE { None } else { Some(Self(level)) }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    pub const fn is_kindergarten(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.0 {
            0 => return write!(f, "Kindergarten"),
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        write!(f, "{}{suffix} Grade", self.0)
    }
}

/// Estimates the grade of a child who is `age` years old.
///
/// Children born after the cutoff start school a year later. Returns `None`
/// for ages outside 5..=18.
pub fn estimate_grade(age: i32, birth: MonthDay) -> Option<Grade> {
    if !(KINDERGARTEN_AGE..=MAX_SCHOOL_AGE).contains(&age) {
        return None;
    }
    let after_cutoff = birth.month() > SCHOOL_CUTOFF_MONTH
        || (birth.month() == SCHOOL_CUTOFF_MONTH && birth.day() > SCHOOL_CUTOFF_DAY);
    let mut level = age - KINDERGARTEN_AGE;
    if after_cutoff {
        level -= 1;
    }
    let level = level.clamp(0, i32::from(MAX_GRADE));
    u8::try_from(level).ok().and_then(Grade::new)
}
