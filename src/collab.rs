//! Storage and platform services the contact book talks to.
//!
//! Each trait has an in-memory implementation used by tests and by callers
//! that keep state themselves.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{CivilDate, MonthDay, ParseError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Small keyed settings, e.g. the saved contact lists.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn set(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
}

/// Opaque binary blobs such as contact photos.
pub trait BlobStore {
    fn save(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    /// Deleting a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// The device address book.
pub trait ContactDirectory {
    fn fetch_entries(&self) -> Result<Vec<DirectoryEntry>, StoreError>;
    fn save_birthday(&mut self, id: &str, birthday: CivilDate) -> Result<(), StoreError>;
}

pub trait CalendarService {
    /// Events whose title matches exactly.
    fn find_events(&self, title: &str) -> Result<Vec<AnnualEvent>, StoreError>;
    fn create_annual_event(&mut self, event: AnnualEvent) -> Result<(), StoreError>;
}

/// Birthday as an address book stores it; the year is often missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryBirthday {
    pub month: u8,
    pub day:   u8,
    pub year:  Option<u16>,
}

impl DirectoryBirthday {
    pub const fn full(year: u16, month: u8, day: u8) -> Self {
        Self { month, day, year: Some(year) }
    }

    pub const fn without_year(month: u8, day: u8) -> Self {
        Self { month, day, year: None }
    }

    /// `Ok(None)` when the year is missing.
    ///
    /// # Errors
    /// Returns a `ParseError` if the stored parts do not form a real date.
    pub fn to_date(&self) -> Result<Option<CivilDate>, ParseError> {
        self.year.map(|year| CivilDate::new(year, self.month, self.day)).transpose()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id:          String,
    pub given_name:  String,
    pub family_name: String,
    pub nickname:    Option<String>,
    pub birthday:    Option<DirectoryBirthday>,
    pub phone:       Option<String>,
    pub photo:       Option<Vec<u8>>,
}

impl DirectoryEntry {
    /// "Given Family", skipping an empty part.
    pub fn full_name(&self) -> String {
        [self.given_name.trim(), self.family_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A yearly recurring all-day event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualEvent {
    pub title:            String,
    pub month_day:        MonthDay,
    pub first_occurrence: CivilDate,
}

impl AnnualEvent {
    pub fn new(title: impl Into<String>, first_occurrence: CivilDate) -> Self {
        Self {
            title: title.into(),
            month_day: first_occurrence.month_day(),
            first_occurrence,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, Vec<u8>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), bytes);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobs {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryBlobs {
    fn save(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.blobs.insert(key.to_owned(), bytes);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// Address book held in memory. Access can be revoked to mimic a denied
/// permission prompt.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    entries: Vec<DirectoryEntry>,
    denied:  bool,
}

impl MemoryDirectory {
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self { entries, denied: false }
    }

    #[must_use]
    pub fn denied(mut self) -> Self {
        self.denied = true;
        self
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    fn check_access(&self) -> Result<(), StoreError> {
        if self.denied { Err(StoreError::PermissionDenied) } else { Ok(()) }
    }
}

impl ContactDirectory for MemoryDirectory {
    fn fetch_entries(&self) -> Result<Vec<DirectoryEntry>, StoreError> {
        self.check_access()?;
        Ok(self.entries.clone())
    }

    fn save_birthday(&mut self, id: &str, birthday: CivilDate) -> Result<(), StoreError> {
        self.check_access()?;
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        entry.birthday = Some(DirectoryBirthday::full(birthday.year(), birthday.month(), birthday.day()));
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCalendar {
    events: Vec<AnnualEvent>,
}

impl MemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AnnualEvent] {
        &self.events
    }
}

impl CalendarService for MemoryCalendar {
    fn find_events(&self, title: &str) -> Result<Vec<AnnualEvent>, StoreError> {
        Ok(self.events.iter().filter(|event| event.title == title).cloned().collect())
    }

    fn create_annual_event(&mut self, event: AnnualEvent) -> Result<(), StoreError> {
        self.events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, md};

    fn entry(id: &str, birthday: Option<DirectoryBirthday>) -> DirectoryEntry {
        DirectoryEntry {
            id: id.to_owned(),
            given_name: "Ada".to_owned(),
            family_name: "Lovelace".to_owned(),
            birthday,
            ..DirectoryEntry::default()
        }
    }

    #[test]
    fn test_directory_birthday_to_date() {
        assert_eq!(DirectoryBirthday::full(1815, 12, 10).to_date(), Ok(Some(date(1815, 12, 10))));
        assert_eq!(DirectoryBirthday::without_year(12, 10).to_date(), Ok(None));
        assert!(DirectoryBirthday::full(2023, 2, 29).to_date().is_err());
    }

    #[test]
    fn test_full_name_skips_empty_parts() {
        let mut e = entry("1", None);
        assert_eq!(e.full_name(), "Ada Lovelace");
        e.family_name = "  ".to_owned();
        assert_eq!(e.full_name(), "Ada");
    }

    #[test]
    fn test_memory_directory_save_birthday() {
        let mut directory = MemoryDirectory::new(vec![entry("1", None)]);
        directory.save_birthday("1", date(1815, 12, 10)).expect("entry exists");
        assert_eq!(directory.entries()[0].birthday, Some(DirectoryBirthday::full(1815, 12, 10)));

        assert_eq!(
            directory.save_birthday("2", date(1815, 12, 10)),
            Err(StoreError::NotFound("2".to_owned()))
        );

        let denied = directory.denied();
        assert_eq!(denied.fetch_entries(), Err(StoreError::PermissionDenied));
    }

    #[test]
    fn test_memory_blobs_and_settings() {
        let mut blobs = MemoryBlobs::new();
        blobs.save("photo-1", vec![1, 2, 3]).expect("memory save");
        assert_eq!(blobs.load("photo-1"), Ok(Some(vec![1, 2, 3])));
        blobs.delete("photo-1").expect("memory delete");
        blobs.delete("photo-1").expect("deleting twice is fine");
        assert!(blobs.is_empty());

        let mut settings = MemorySettings::new();
        assert_eq!(settings.get("k"), Ok(None));
        settings.set("k", b"v".to_vec()).expect("memory set");
        assert_eq!(settings.get("k"), Ok(Some(b"v".to_vec())));
    }

    #[test]
    fn test_memory_calendar_find_by_title() {
        let mut calendar = MemoryCalendar::new();
        let event = AnnualEvent::new("Ada's Birthday", date(2024, 12, 10));
        assert_eq!(event.month_day, md(12, 10));
        calendar.create_annual_event(event.clone()).expect("memory create");

        assert_eq!(calendar.find_events("Ada's Birthday"), Ok(vec![event]));
        assert_eq!(calendar.find_events("Bob's Birthday"), Ok(vec![]));
    }
}
