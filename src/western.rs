//! Western (sun-sign) zodiac.

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::{MonthDay, MonthDayRange};

/// One of the twelve sun signs, in calendar order starting at the year end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum ZodiacSign {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

/// Classical element of a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Classical modality ("quality") of a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

/// Inclusive (start month, start day, end month, end day) per sign, same order as `ZodiacSign::ALL`.
const BOUNDARIES: [(u8, u8, u8, u8); 12] = [
    (12, 22, 1, 19),
    (1, 20, 2, 18),
    (2, 19, 3, 20),
    (3, 21, 4, 19),
    (4, 20, 5, 20),
    (5, 21, 6, 20),
    (6, 21, 7, 22),
    (7, 23, 8, 22),
    (8, 23, 9, 22),
    (9, 23, 10, 22),
    (10, 23, 11, 21),
    (11, 22, 12, 21),
];

impl ZodiacSign {
    pub const ALL: [Self; 12] = [
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
    ];

    /// The sign whose range contains `md`, or `None` if the boundary table has a gap.
    pub fn try_from_month_day(md: MonthDay) -> Option<Self> {
        Self::ALL.into_iter().find(|sign| sign.range().contains(md))
    }

    /// The sign for a birthday. Every valid month-day has one; Capricorn is
    /// returned if the table ever fails to match.
    pub fn from_month_day(md: MonthDay) -> Self {
        Self::try_from_month_day(md).unwrap_or(Self::Capricorn)
    }

    /// Inclusive span of the year this sign covers
    pub fn range(self) -> MonthDayRange {
        let (sm, sd, em, ed) = BOUNDARIES[self as usize];
        MonthDayRange::new(boundary(sm, sd), boundary(em, ed))
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Capricorn => '♑',
            Self::Aquarius => '♒',
            Self::Pisces => '♓',
            Self::Aries => '♈',
            Self::Taurus => '♉',
            Self::Gemini => '♊',
            Self::Cancer => '♋',
            Self::Leo => '♌',
            Self::Virgo => '♍',
            Self::Libra => '♎',
            Self::Scorpio => '♏',
            Self::Sagittarius => '♐',
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => Element::Water,
        }
    }

    pub const fn modality(self) -> Modality {
        match self {
            Self::Aries | Self::Cancer | Self::Libra | Self::Capricorn => Modality::Cardinal,
            Self::Taurus | Self::Leo | Self::Scorpio | Self::Aquarius => Modality::Fixed,
            Self::Gemini | Self::Virgo | Self::Sagittarius | Self::Pisces => Modality::Mutable,
        }
    }
}

impl From<MonthDay> for ZodiacSign {
    fn from(md: MonthDay) -> Self {
        Self::from_month_day(md)
    }
}

// Table entries are all real calendar days.
fn boundary(month: u8, day: u8) -> MonthDay {
    MonthDay::new(month, day).unwrap_or_else(|_| unreachable!("zodiac boundary {month:02}-{day:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::md;
    use crate::types::max_days_in_month;

    #[test]
    fn test_every_day_has_exactly_one_sign() {
        let mut counts = [0u32; 12];
        for month in 1..=12u8 {
            for day in 1..=max_days_in_month(month) {
                let day_md = md(month, day);
                let matches: Vec<ZodiacSign> = ZodiacSign::ALL
                    .into_iter()
                    .filter(|sign| sign.range().contains(day_md))
                    .collect();
                assert_eq!(matches.len(), 1, "{day_md} matched {matches:?}");
                assert_eq!(ZodiacSign::try_from_month_day(day_md), matches.first().copied());
                counts[matches[0] as usize] += 1;
            }
        }
        assert_eq!(counts.iter().sum::<u32>(), 366);
    }

    #[test]
    fn test_boundaries() {
        struct TestCase {
            month:    u8,
            day:      u8,
            expected: ZodiacSign,
        }

        let cases = [
            TestCase { month: 12, day: 22, expected: ZodiacSign::Capricorn },
            TestCase { month: 12, day: 25, expected: ZodiacSign::Capricorn },
            TestCase { month: 1, day: 19, expected: ZodiacSign::Capricorn },
            TestCase { month: 1, day: 20, expected: ZodiacSign::Aquarius },
            TestCase { month: 2, day: 18, expected: ZodiacSign::Aquarius },
            TestCase { month: 2, day: 29, expected: ZodiacSign::Pisces },
            TestCase { month: 3, day: 20, expected: ZodiacSign::Pisces },
            TestCase { month: 3, day: 21, expected: ZodiacSign::Aries },
            TestCase { month: 4, day: 20, expected: ZodiacSign::Taurus },
            TestCase { month: 6, day: 20, expected: ZodiacSign::Gemini },
            TestCase { month: 7, day: 22, expected: ZodiacSign::Cancer },
            TestCase { month: 7, day: 23, expected: ZodiacSign::Leo },
            TestCase { month: 9, day: 22, expected: ZodiacSign::Virgo },
            TestCase { month: 10, day: 22, expected: ZodiacSign::Libra },
            TestCase { month: 11, day: 21, expected: ZodiacSign::Scorpio },
            TestCase { month: 11, day: 22, expected: ZodiacSign::Sagittarius },
            TestCase { month: 12, day: 21, expected: ZodiacSign::Sagittarius },
        ];

        for case in &cases {
            assert_eq!(
                ZodiacSign::from_month_day(md(case.month, case.day)),
                case.expected,
                "{:02}-{:02}",
                case.month,
                case.day
            );
        }
    }

    #[test]
    fn test_element_and_modality_groups() {
        for element in [Element::Fire, Element::Earth, Element::Air, Element::Water] {
            let count = ZodiacSign::ALL.iter().filter(|s| s.element() == element).count();
            assert_eq!(count, 3, "{element}");
        }
        for modality in [Modality::Cardinal, Modality::Fixed, Modality::Mutable] {
            let count = ZodiacSign::ALL.iter().filter(|s| s.modality() == modality).count();
            assert_eq!(count, 4, "{modality}");
        }
        assert_eq!(ZodiacSign::Leo.element(), Element::Fire);
        assert_eq!(ZodiacSign::Leo.modality(), Modality::Fixed);
    }

    #[test]
    fn test_display_and_symbol() {
        assert_eq!(ZodiacSign::Sagittarius.to_string(), "Sagittarius");
        assert_eq!(ZodiacSign::Capricorn.symbol(), '♑');
        assert_eq!(ZodiacSign::Capricorn.range().to_string(), "12-22/01-19");
    }
}
