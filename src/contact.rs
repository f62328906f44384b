//! Contacts and the sorted lists they live in.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::countdown::{self, compare_days_until};
use crate::prelude::*;
use crate::{CivilDate, EngineConfig, ParseError};

/// A person in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name:       String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname:   Option<String>,
    pub birthday:   CivilDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone:      Option<String>,
    /// Key of the contact's photo in the blob store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_key:  Option<String>,
}

impl Contact {
    pub fn new(name: impl Into<String>, first_name: impl Into<String>, birthday: CivilDate) -> Self {
        Self {
            name: name.into().trim().to_owned(),
            first_name: first_name.into().trim().to_owned(),
            nickname: None,
            birthday,
            phone: None,
            photo_key: None,
        }
    }

    /// Blank nicknames are dropped.
    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = non_blank(nickname.into());
        self
    }

    /// Blank phone numbers are dropped.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = non_blank(phone.into());
        self
    }

    /// Nickname if there is one, otherwise the full name
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.name)
    }

    pub fn age(&self, now: &CivilDate, config: &EngineConfig) -> i32 {
        countdown::age_with(&self.birthday, now, config)
    }

    pub fn days_until_birthday(&self, now: &CivilDate, config: &EngineConfig) -> u32 {
        countdown::days_until_next_birthday_with(&self.birthday, now, config.leap_day_policy())
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Field a list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum SortOption {
    #[default]
    #[display(fmt = "Name")]
    Name,
    #[display(fmt = "Age")]
    Age,
    #[display(fmt = "Birthday")]
    Birthday,
    #[display(fmt = "Days Until Birthday")]
    DaysUntilBirthday,
}

impl SortOption {
    pub const ALL: [Self; 4] = [Self::Name, Self::Age, Self::Birthday, Self::DaysUntilBirthday];
}

impl FromStr for SortOption {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.to_string() == s.trim())
            .ok_or_else(|| ParseError::InvalidFormat(format!("Unknown sort option: {s}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum SortDirection {
    #[default]
    #[display(fmt = "Ascending")]
    Ascending,
    #[display(fmt = "Descending")]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Ascending" => Ok(Self::Ascending),
            "Descending" => Ok(Self::Descending),
            other => Err(ParseError::InvalidFormat(format!("Unknown sort direction: {other}"))),
        }
    }
}

/// Serializes as the display text; unknown text loads as the default so an
/// older or newer save file never fails to open over a sort setting.
macro_rules! lenient_string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(s.parse().unwrap_or_else(|err| {
                    warn!(%err, "falling back to default {}", stringify!($ty));
                    Self::default()
                }))
            }
        }
    };
}

lenient_string_serde!(SortOption);
lenient_string_serde!(SortDirection);

/// A titled list of contacts with its own sort setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactList {
    pub title:                String,
    contacts:                 Vec<Contact>,
    #[serde(default)]
    pub selected_sort_option: SortOption,
    #[serde(default)]
    pub sort_direction:       SortDirection,
}

impl ContactList {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title:                title.into(),
            contacts:             Vec::new(),
            selected_sort_option: SortOption::default(),
            sort_direction:       SortDirection::default(),
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Adds a contact and re-sorts the list.
    pub fn add_contact(&mut self, contact: Contact, now: &CivilDate, config: &EngineConfig) {
        self.contacts.push(contact);
        self.sort_contacts(now, config);
    }

    /// Removes and returns the contact at `index`, if there is one.
    pub fn remove_contact(&mut self, index: usize) -> Option<Contact> {
        (index < self.contacts.len()).then(|| self.contacts.remove(index))
    }

    /// Replaces the contact at `index` and re-sorts. Returns the old contact.
    pub fn replace_contact(
        &mut self,
        index: usize,
        contact: Contact,
        now: &CivilDate,
        config: &EngineConfig,
    ) -> Option<Contact> {
        let slot = self.contacts.get_mut(index)?;
        let old = std::mem::replace(slot, contact);
        self.sort_contacts(now, config);
        Some(old)
    }

    pub(crate) fn contact_mut(&mut self, index: usize) -> Option<&mut Contact> {
        self.contacts.get_mut(index)
    }

    pub fn set_sort_option(&mut self, option: SortOption, now: &CivilDate, config: &EngineConfig) {
        self.selected_sort_option = option;
        self.sort_contacts(now, config);
    }

    pub fn toggle_sort_direction(&mut self, now: &CivilDate, config: &EngineConfig) {
        self.sort_direction = self.sort_direction.toggled();
        self.sort_contacts(now, config);
    }

    /// Orders the contacts by the list's sort option and direction.
    ///
    /// The sort is stable. Under `DaysUntilBirthday`, contacts whose birthday
    /// is today stay at the top in either direction.
    pub fn sort_contacts(&mut self, now: &CivilDate, config: &EngineConfig) {
        let option = self.selected_sort_option;
        let direction = self.sort_direction;
        debug!(title = %self.title, %option, %direction, count = self.contacts.len(), "sorting contact list");

        self.contacts.sort_by(|a, b| {
            let ordering = match option {
                SortOption::Name => a
                    .first_name
                    .to_lowercase()
                    .cmp(&b.first_name.to_lowercase()),
                SortOption::Age => a.age(now, config).cmp(&b.age(now, config)),
                SortOption::Birthday => a.birthday.month_day().cmp(&b.birthday.month_day()),
                SortOption::DaysUntilBirthday => {
                    let (da, db) = (a.days_until_birthday(now, config), b.days_until_birthday(now, config));
                    let ordering = compare_days_until(da, db);
                    // The today pin ignores the direction.
                    if (da == 0) != (db == 0) {
                        return ordering;
                    }
                    ordering
                },
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    /// Contacts celebrating on `now`
    pub fn birthdays_today<'a>(
        &'a self,
        now: &'a CivilDate,
        config: &'a EngineConfig,
    ) -> impl Iterator<Item = &'a Contact> + 'a {
        self.contacts
            .iter()
            .filter(move |c| countdown::is_birthday_today_with(&c.birthday, now, config.leap_day_policy()))
    }

    /// Contacts whose next birthday is at most `within_days` away, soonest first.
    pub fn upcoming(&self, now: &CivilDate, within_days: u32, config: &EngineConfig) -> Vec<(&Contact, u32)> {
        let mut upcoming: Vec<(&Contact, u32)> = self
            .contacts
            .iter()
            .map(|c| (c, c.days_until_birthday(now, config)))
            .filter(|&(_, days)| days <= within_days)
            .collect();
        upcoming.sort_by(|a, b| compare_days_until(a.1, b.1));
        upcoming
    }
}
