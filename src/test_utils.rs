//! Shorthand constructors for tests.

use crate::{CivilDate, Contact, MonthDay};

pub fn date(year: u16, month: u8, day: u8) -> CivilDate {
    CivilDate::new(year, month, day).expect("test date must be valid")
}

pub fn md(month: u8, day: u8) -> MonthDay {
    MonthDay::new(month, day).expect("test month-day must be valid")
}

pub fn contact(first_name: &str, birthday: CivilDate) -> Contact {
    Contact::new(format!("{first_name} Tester"), first_name, birthday)
}
