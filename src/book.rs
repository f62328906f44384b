//! The user's contact lists, their persistence and platform sync.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::collab::{AnnualEvent, BlobStore, CalendarService, ContactDirectory, DirectoryEntry, StoreError};
use crate::consts::{CONTACT_LISTS_KEY, DEFAULT_LIST_TITLE};
use crate::countdown::next_birthday_date_with;
use crate::{CivilDate, Contact, ContactList, EngineConfig, SettingsStore};

#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("List title must not be empty")]
    EmptyTitle,

    #[error("No list at index {0}")]
    NoSuchList(usize),

    #[error("No contact at index {0}")]
    NoSuchContact(usize),

    #[error("The last list cannot be removed")]
    LastList,

    #[error("{0} is already in the list")]
    AlreadyAdded(String),

    #[error("Failed to encode or decode contact lists: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a directory import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported:         usize,
    /// Entries matching a contact already in the list
    pub already_added:    usize,
    /// Entries with no birthday or no birth year
    pub missing_birthday: usize,
    /// Entries whose birthday is not a real date
    pub invalid_birthday: usize,
}

/// Persisted shape of a [`ContactBook`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedBook {
    lists:         Vec<ContactList>,
    #[serde(default)]
    selected_list: usize,
    #[serde(default)]
    next_photo_id: u64,
}

/// Older saves stored only the array of lists.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedPayload {
    Book(SavedBook),
    Lists(Vec<ContactList>),
}

/// Every list the user keeps, which one is on screen, and the engine settings.
///
/// A book always holds at least one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactBook {
    lists:         Vec<ContactList>,
    selected:      usize,
    next_photo_id: u64,
    config:        EngineConfig,
}

impl Default for ContactBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactBook {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            lists: vec![ContactList::new(DEFAULT_LIST_TITLE)],
            selected: 0,
            next_photo_id: 0,
            config,
        }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swaps the engine settings and re-sorts every list under them.
    pub fn set_config(&mut self, config: EngineConfig, now: &CivilDate) {
        self.config = config;
        for list in &mut self.lists {
            list.sort_contacts(now, &self.config);
        }
    }

    pub fn lists(&self) -> &[ContactList] {
        &self.lists
    }

    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Appends a list and returns its index. The title is trimmed.
    ///
    /// # Errors
    /// Returns `BookError::EmptyTitle` if the title is blank.
    pub fn add_list(&mut self, title: &str) -> Result<usize, BookError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BookError::EmptyTitle);
        }
        self.lists.push(ContactList::new(title));
        debug!(title, "added contact list");
        Ok(self.lists.len() - 1)
    }

    /// Removes a list, keeping the selection on the same list where possible.
    ///
    /// # Errors
    /// Returns `BookError::NoSuchList` for a bad index and `BookError::LastList`
    /// if it is the only list.
    pub fn remove_list(&mut self, index: usize) -> Result<ContactList, BookError> {
        if index >= self.lists.len() {
            return Err(BookError::NoSuchList(index));
        }
        if self.lists.len() == 1 {
            return Err(BookError::LastList);
        }
        let removed = self.lists.remove(index);
        if index < self.selected || self.selected >= self.lists.len() {
            self.selected = self.selected.saturating_sub(1);
        }
        debug!(title = %removed.title, "removed contact list");
        Ok(removed)
    }

    /// # Errors
    /// Returns `BookError::EmptyTitle` if the title is blank or
    /// `BookError::NoSuchList` for a bad index.
    pub fn rename_list(&mut self, index: usize, title: &str) -> Result<(), BookError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BookError::EmptyTitle);
        }
        let list = self.lists.get_mut(index).ok_or(BookError::NoSuchList(index))?;
        title.clone_into(&mut list.title);
        Ok(())
    }

    /// # Errors
    /// Returns `BookError::NoSuchList` for a bad index.
    pub fn select_list(&mut self, index: usize) -> Result<(), BookError> {
        if index >= self.lists.len() {
            return Err(BookError::NoSuchList(index));
        }
        self.selected = index;
        Ok(())
    }

    pub fn selected_list(&self) -> &ContactList {
        &self.lists[self.selected]
    }

    pub fn selected_list_mut(&mut self) -> &mut ContactList {
        &mut self.lists[self.selected]
    }

    /// Adds a contact to the selected list under the book's settings.
    pub fn add_contact(&mut self, contact: Contact, now: &CivilDate) {
        let config = self.config;
        self.selected_list_mut().add_contact(contact, now, &config);
    }

    /// Removes a contact from the selected list along with its photo.
    ///
    /// # Errors
    /// Returns `BookError::NoSuchContact` for a bad index, or the blob store's
    /// error if the photo cannot be deleted.
    pub fn remove_contact(&mut self, blobs: &mut impl BlobStore, index: usize) -> Result<Contact, BookError> {
        let contact = self
            .selected_list_mut()
            .remove_contact(index)
            .ok_or(BookError::NoSuchContact(index))?;
        if let Some(key) = &contact.photo_key {
            blobs.delete(key)?;
        }
        Ok(contact)
    }

    /// Loads the book saved under [`CONTACT_LISTS_KEY`], or a fresh book if
    /// nothing was saved yet.
    ///
    /// # Errors
    /// Returns `BookError::Store` if the store fails and `BookError::Json` if
    /// the saved payload cannot be decoded.
    pub fn load(store: &impl SettingsStore, config: EngineConfig) -> Result<Self, BookError> {
        let Some(bytes) = store.get(CONTACT_LISTS_KEY)? else {
            info!("no saved contact lists, starting a new book");
            return Ok(Self::with_config(config));
        };

        let saved = match serde_json::from_slice(&bytes)? {
            SavedPayload::Book(saved) => saved,
            SavedPayload::Lists(lists) => SavedBook { lists, selected_list: 0, next_photo_id: 0 },
        };
        if saved.lists.is_empty() {
            warn!("saved book has no lists, starting a new book");
            return Ok(Self::with_config(config));
        }

        let selected = if saved.selected_list < saved.lists.len() {
            saved.selected_list
        } else {
            warn!(selected = saved.selected_list, lists = saved.lists.len(), "saved selection out of range");
            0
        };
        info!(lists = saved.lists.len(), selected, "loaded contact lists");
        Ok(Self { lists: saved.lists, selected, next_photo_id: saved.next_photo_id, config })
    }

    /// # Errors
    /// Returns `BookError::Json` if encoding fails or `BookError::Store` if the
    /// store rejects the write.
    pub fn save(&self, store: &mut impl SettingsStore) -> Result<(), BookError> {
        let saved = SavedBook {
            lists:         self.lists.clone(),
            selected_list: self.selected,
            next_photo_id: self.next_photo_id,
        };
        store.set(CONTACT_LISTS_KEY, serde_json::to_vec(&saved)?)?;
        debug!(lists = self.lists.len(), "saved contact lists");
        Ok(())
    }

    /// Stores a photo for a contact in the selected list and returns its key.
    /// A contact that already has a photo keeps its key.
    ///
    /// # Errors
    /// Returns `BookError::NoSuchContact` for a bad index or `BookError::Store`
    /// if the blob cannot be saved.
    pub fn attach_photo(
        &mut self,
        blobs: &mut impl BlobStore,
        index: usize,
        bytes: Vec<u8>,
    ) -> Result<String, BookError> {
        let existing = self
            .selected_list()
            .contacts()
            .get(index)
            .ok_or(BookError::NoSuchContact(index))?
            .photo_key
            .clone();
        let key = existing.unwrap_or_else(|| self.new_photo_key());
        blobs.save(&key, bytes)?;
        if let Some(contact) = self.selected_list_mut().contact_mut(index) {
            contact.photo_key = Some(key.clone());
        }
        Ok(key)
    }

    /// # Errors
    /// Returns `BookError::NoSuchContact` for a bad index or `BookError::Store`
    /// if the blob cannot be read.
    pub fn photo(&self, blobs: &impl BlobStore, index: usize) -> Result<Option<Vec<u8>>, BookError> {
        let contact = self
            .selected_list()
            .contacts()
            .get(index)
            .ok_or(BookError::NoSuchContact(index))?;
        match &contact.photo_key {
            Some(key) => Ok(blobs.load(key)?),
            None => Ok(None),
        }
    }

    /// # Errors
    /// Returns `BookError::NoSuchContact` for a bad index or `BookError::Store`
    /// if the blob cannot be deleted.
    pub fn detach_photo(&mut self, blobs: &mut impl BlobStore, index: usize) -> Result<(), BookError> {
        let contact = self
            .selected_list_mut()
            .contact_mut(index)
            .ok_or(BookError::NoSuchContact(index))?;
        if let Some(key) = contact.photo_key.take() {
            blobs.delete(&key)?;
        }
        Ok(())
    }

    fn new_photo_key(&mut self) -> String {
        self.next_photo_id += 1;
        format!("photo-{}", self.next_photo_id)
    }

    /// Whether the selected list already holds this entry: same full name,
    /// and the same nickname when the entry has one.
    fn holds_entry<'a>(mut contacts: impl Iterator<Item = &'a Contact>, entry: &DirectoryEntry) -> bool {
        let name = entry.full_name();
        let nickname = entry.nickname.as_deref().map(str::trim).filter(|n| !n.is_empty());
        contacts.any(|contact| {
            contact.name == name && nickname.is_none_or(|n| contact.nickname.as_deref() == Some(n))
        })
    }

    fn contact_from_entry(entry: &DirectoryEntry, birthday: CivilDate) -> Contact {
        let mut contact = Contact::new(entry.full_name(), entry.given_name.as_str(), birthday);
        if let Some(nickname) = &entry.nickname {
            contact = contact.with_nickname(nickname.as_str());
        }
        if let Some(phone) = &entry.phone {
            contact = contact.with_phone(phone.as_str());
        }
        contact
    }

    /// Saves each staged photo under a fresh key. On failure every blob saved
    /// so far is deleted and the photo counter is rewound.
    fn store_photos(
        &mut self,
        blobs: &mut impl BlobStore,
        staged: &mut [(Contact, Option<Vec<u8>>)],
    ) -> Result<(), BookError> {
        let first_id = self.next_photo_id;
        let mut saved: Vec<String> = Vec::new();
        for (contact, photo) in staged.iter_mut() {
            let Some(photo) = photo.take() else { continue };
            let key = self.new_photo_key();
            if let Err(err) = blobs.save(&key, photo) {
                for key in &saved {
                    if let Err(cleanup) = blobs.delete(key) {
                        warn!(%key, %cleanup, "failed to delete photo after aborted import");
                    }
                }
                self.next_photo_id = first_id;
                return Err(err.into());
            }
            contact.photo_key = Some(key.clone());
            saved.push(key);
        }
        Ok(())
    }

    /// Copies address-book entries that have a full birthday into the
    /// selected list, photos included. Entries already in the list are
    /// skipped.
    ///
    /// The import is all or nothing: if a photo cannot be stored, no contact
    /// is added and the photos stored so far are deleted.
    ///
    /// # Errors
    /// Returns `BookError::Store` if the directory cannot be read or a photo
    /// cannot be saved.
    pub fn import_from_directory(
        &mut self,
        directory: &impl ContactDirectory,
        blobs: &mut impl BlobStore,
        now: &CivilDate,
    ) -> Result<ImportReport, BookError> {
        let mut report = ImportReport::default();
        let mut staged: Vec<(Contact, Option<Vec<u8>>)> = Vec::new();
        for entry in directory.fetch_entries()? {
            let birthday = match entry.birthday.map(|b| b.to_date()) {
                Some(Ok(Some(date))) => date,
                None | Some(Ok(None)) => {
                    report.missing_birthday += 1;
                    continue;
                },
                Some(Err(err)) => {
                    warn!(id = %entry.id, %err, "skipping directory entry with unusable birthday");
                    report.invalid_birthday += 1;
                    continue;
                },
            };

            let known = self.selected_list().contacts().iter().chain(staged.iter().map(|(c, _)| c));
            if Self::holds_entry(known, &entry) {
                debug!(id = %entry.id, "directory entry already in the list");
                report.already_added += 1;
                continue;
            }
            staged.push((Self::contact_from_entry(&entry, birthday), entry.photo));
        }

        self.store_photos(blobs, &mut staged)?;
        report.imported = staged.len();
        for (contact, _) in staged {
            self.add_contact(contact, now);
        }
        info!(
            imported = report.imported,
            already_added = report.already_added,
            missing = report.missing_birthday,
            invalid = report.invalid_birthday,
            "imported directory entries"
        );
        Ok(report)
    }

    /// Writes a birthday the user supplied back to directory entry `id`, then
    /// adds that entry to the selected list.
    ///
    /// # Errors
    /// Returns `BookError::Store` if the entry cannot be found, the directory
    /// refuses access or the photo cannot be saved, and
    /// `BookError::AlreadyAdded` if the entry is already in the list.
    pub fn add_from_directory_with_birthday(
        &mut self,
        directory: &mut impl ContactDirectory,
        blobs: &mut impl BlobStore,
        id: &str,
        birthday: CivilDate,
        now: &CivilDate,
    ) -> Result<(), BookError> {
        let entry = directory
            .fetch_entries()?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        if Self::holds_entry(self.selected_list().contacts().iter(), &entry) {
            return Err(BookError::AlreadyAdded(entry.full_name()));
        }

        directory.save_birthday(id, birthday)?;
        let mut staged = [(Self::contact_from_entry(&entry, birthday), entry.photo)];
        self.store_photos(blobs, &mut staged)?;
        let [(contact, _)] = staged;
        info!(%id, name = %contact.name, "added directory entry with a new birthday");
        self.add_contact(contact, now);
        Ok(())
    }

    /// Creates a yearly calendar event for each contact in the selected list,
    /// starting on their next birthday. Titles that already have an event are
    /// skipped. Returns the number of events created.
    ///
    /// # Errors
    /// Returns `BookError::Store` if the calendar cannot be searched or
    /// written.
    pub fn sync_birthday_events(
        &self,
        calendar: &mut impl CalendarService,
        now: &CivilDate,
    ) -> Result<usize, BookError> {
        let policy = self.config.leap_day_policy();
        let mut created = 0;
        for contact in self.selected_list().contacts() {
            let title = format!("{}'s Birthday", contact.display_name());
            if !calendar.find_events(&title)?.is_empty() {
                debug!(%title, "birthday event already exists");
                continue;
            }
            let Some(first) = next_birthday_date_with(&contact.birthday, now, policy) else {
                warn!(%title, "next birthday is past the last supported year");
                continue;
            };
            calendar.create_annual_event(AnnualEvent::new(title, first))?;
            created += 1;
        }
        info!(created, "synced birthday events");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{DirectoryBirthday, DirectoryEntry, MemoryBlobs, MemoryCalendar, MemoryDirectory, MemorySettings};
    use crate::test_utils::{contact, date, md};
    use crate::{LeapDayPolicy, SortOption};

    fn entry(id: &str, given: &str, birthday: Option<DirectoryBirthday>) -> DirectoryEntry {
        DirectoryEntry {
            id: id.to_owned(),
            given_name: given.to_owned(),
            family_name: "Smith".to_owned(),
            birthday,
            ..DirectoryEntry::default()
        }
    }

    #[test]
    fn test_new_book_has_family_list() {
        let book = ContactBook::new();
        assert_eq!(book.lists().len(), 1);
        assert_eq!(book.selected_list().title, "Family");
        assert_eq!(book.selected_index(), 0);
    }

    #[test]
    fn test_list_management() {
        let mut book = ContactBook::new();
        assert!(matches!(book.add_list("   "), Err(BookError::EmptyTitle)));
        assert_eq!(book.add_list("  Friends ").expect("valid title"), 1);
        assert_eq!(book.add_list("Work").expect("valid title"), 2);
        assert_eq!(book.lists()[1].title, "Friends");

        book.select_list(2).expect("list exists");
        assert!(matches!(book.select_list(3), Err(BookError::NoSuchList(3))));

        // Removing an earlier list keeps "Work" selected.
        book.remove_list(0).expect("list exists");
        assert_eq!(book.selected_list().title, "Work");

        // Removing the selected last list moves the selection back.
        book.remove_list(1).expect("list exists");
        assert_eq!(book.selected_list().title, "Friends");

        assert!(matches!(book.remove_list(0), Err(BookError::LastList)));
        book.rename_list(0, " Pals ").expect("list exists");
        assert_eq!(book.selected_list().title, "Pals");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let now = date(2024, 3, 10);
        let mut book = ContactBook::new();
        book.add_contact(contact("Ann", date(1980, 4, 2)), &now);
        book.add_list("Friends").expect("valid title");
        book.select_list(1).expect("list exists");
        book.add_contact(contact("Ben", date(1992, 8, 9)), &now);
        let config = *book.config();
        book.selected_list_mut().set_sort_option(SortOption::Birthday, &now, &config);

        let mut store = MemorySettings::new();
        book.save(&mut store).expect("failed to save book");
        let loaded = ContactBook::load(&store, EngineConfig::default()).expect("failed to load book");
        assert_eq!(loaded, book);
        assert_eq!(loaded.selected_list().selected_sort_option, SortOption::Birthday);
    }

    #[test]
    fn test_load_missing_and_legacy_payloads() {
        let mut store = MemorySettings::new();
        let fresh = ContactBook::load(&store, EngineConfig::default()).expect("missing key is fine");
        assert_eq!(fresh, ContactBook::new());

        let legacy = r#"[{"title":"Kids","contacts":[{"name":"Cy Tester","firstName":"Cy","birthday":"2015-03-10"}],"selectedSortOption":"Age","sortDirection":"Descending"}]"#;
        store.set(CONTACT_LISTS_KEY, legacy.as_bytes().to_vec()).expect("memory set");
        let book = ContactBook::load(&store, EngineConfig::default()).expect("legacy payload loads");
        assert_eq!(book.selected_list().title, "Kids");
        assert_eq!(book.selected_list().contacts()[0].birthday, date(2015, 3, 10));

        store.set(CONTACT_LISTS_KEY, b"not json".to_vec()).expect("memory set");
        assert!(matches!(
            ContactBook::load(&store, EngineConfig::default()),
            Err(BookError::Json(_))
        ));
    }

    #[test]
    fn test_photos() {
        let now = date(2024, 3, 10);
        let mut book = ContactBook::new();
        let mut blobs = MemoryBlobs::new();
        book.add_contact(contact("Ann", date(1980, 4, 2)), &now);

        let key = book.attach_photo(&mut blobs, 0, vec![1, 2]).expect("contact exists");
        let again = book.attach_photo(&mut blobs, 0, vec![3]).expect("contact exists");
        assert_eq!(key, again);
        assert_eq!(blobs.len(), 1);
        assert_eq!(book.photo(&blobs, 0).expect("contact exists"), Some(vec![3]));

        book.detach_photo(&mut blobs, 0).expect("contact exists");
        assert_eq!(book.photo(&blobs, 0).expect("contact exists"), None);
        assert!(blobs.is_empty());
        assert!(matches!(book.attach_photo(&mut blobs, 5, vec![]), Err(BookError::NoSuchContact(5))));
    }

    #[test]
    fn test_remove_contact_deletes_photo() {
        let now = date(2024, 3, 10);
        let mut book = ContactBook::new();
        let mut blobs = MemoryBlobs::new();
        book.add_contact(contact("Ann", date(1980, 4, 2)), &now);
        book.attach_photo(&mut blobs, 0, vec![1]).expect("contact exists");

        let removed = book.remove_contact(&mut blobs, 0).expect("contact exists");
        assert_eq!(removed.first_name, "Ann");
        assert!(blobs.is_empty());
        assert!(book.selected_list().is_empty());
    }

    #[test]
    fn test_import_from_directory() {
        let now = date(2024, 3, 10);
        let mut with_photo = entry("1", "Ann", Some(DirectoryBirthday::full(1980, 4, 2)));
        with_photo.photo = Some(vec![9]);
        with_photo.nickname = Some("Annie".to_owned());
        let directory = MemoryDirectory::new(vec![
            with_photo,
            entry("2", "Ben", Some(DirectoryBirthday::without_year(8, 9))),
            entry("3", "Cy", None),
            entry("4", "Dee", Some(DirectoryBirthday::full(2023, 2, 29))),
            entry("5", "Eve", Some(DirectoryBirthday::full(2000, 2, 29))),
        ]);
        let mut book = ContactBook::new();
        let mut blobs = MemoryBlobs::new();

        let report = book.import_from_directory(&directory, &mut blobs, &now).expect("import succeeds");
        assert_eq!(
            report,
            ImportReport { imported: 2, already_added: 0, missing_birthday: 2, invalid_birthday: 1 }
        );

        let list = book.selected_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list.contacts()[0].name, "Ann Smith");
        assert_eq!(list.contacts()[0].display_name(), "Annie");
        assert_eq!(book.photo(&blobs, 0).expect("contact exists"), Some(vec![9]));

        let denied = MemoryDirectory::new(vec![]).denied();
        assert!(matches!(
            book.import_from_directory(&denied, &mut blobs, &now),
            Err(BookError::Store(StoreError::PermissionDenied))
        ));
    }

    #[test]
    fn test_import_twice_skips_existing_contacts() {
        let now = date(2024, 3, 10);
        let mut ann = entry("1", "Ann", Some(DirectoryBirthday::full(1980, 4, 2)));
        ann.photo = Some(vec![9]);
        let mut annie = ann.clone();
        annie.id = "2".to_owned();
        annie.nickname = Some("Annie".to_owned());
        let directory = MemoryDirectory::new(vec![ann, annie]);
        let mut book = ContactBook::new();
        let mut blobs = MemoryBlobs::new();

        // Same name with a different nickname is a different person.
        let first = book.import_from_directory(&directory, &mut blobs, &now).expect("import succeeds");
        assert_eq!(first.imported, 2);

        let second = book.import_from_directory(&directory, &mut blobs, &now).expect("import succeeds");
        assert_eq!(second, ImportReport { already_added: 2, ..ImportReport::default() });
        assert_eq!(book.selected_list().len(), 2);
        assert_eq!(blobs.len(), 2);
    }

    /// Accepts a fixed number of saves, then fails.
    struct FlakyBlobs {
        inner:      MemoryBlobs,
        saves_left: usize,
    }

    impl BlobStore for FlakyBlobs {
        fn save(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
            if self.saves_left == 0 {
                return Err(StoreError::Unavailable("disk full".to_owned()));
            }
            self.saves_left -= 1;
            self.inner.save(key, bytes)
        }

        fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.load(key)
        }

        fn delete(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.delete(key)
        }
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let now = date(2024, 3, 10);
        let mut ann = entry("1", "Ann", Some(DirectoryBirthday::full(1980, 4, 2)));
        ann.photo = Some(vec![1]);
        let mut ben = entry("2", "Ben", Some(DirectoryBirthday::full(1992, 8, 9)));
        ben.photo = Some(vec![2]);
        let directory = MemoryDirectory::new(vec![ann, ben]);
        let mut book = ContactBook::new();
        let mut blobs = FlakyBlobs { inner: MemoryBlobs::new(), saves_left: 1 };

        assert!(matches!(
            book.import_from_directory(&directory, &mut blobs, &now),
            Err(BookError::Store(StoreError::Unavailable(_)))
        ));
        assert!(book.selected_list().is_empty());
        assert!(blobs.inner.is_empty());
        assert_eq!(book, ContactBook::new());

        blobs.saves_left = 2;
        let report = book.import_from_directory(&directory, &mut blobs, &now).expect("import succeeds");
        assert_eq!(report.imported, 2);
        assert_eq!(book.selected_list().contacts()[0].photo_key.as_deref(), Some("photo-1"));
    }

    #[test]
    fn test_add_from_directory_with_birthday() {
        let now = date(2024, 3, 10);
        let mut directory = MemoryDirectory::new(vec![entry("2", "Ben", Some(DirectoryBirthday::without_year(8, 9)))]);
        let mut book = ContactBook::new();
        let mut blobs = MemoryBlobs::new();

        book.add_from_directory_with_birthday(&mut directory, &mut blobs, "2", date(1992, 8, 9), &now)
            .expect("entry exists");
        assert_eq!(directory.entries()[0].birthday, Some(DirectoryBirthday::full(1992, 8, 9)));
        assert_eq!(book.selected_list().contacts()[0].name, "Ben Smith");
        assert_eq!(book.selected_list().contacts()[0].birthday, date(1992, 8, 9));

        assert!(matches!(
            book.add_from_directory_with_birthday(&mut directory, &mut blobs, "2", date(1992, 8, 9), &now),
            Err(BookError::AlreadyAdded(name)) if name == "Ben Smith"
        ));
        assert!(matches!(
            book.add_from_directory_with_birthday(&mut directory, &mut blobs, "9", date(1992, 8, 9), &now),
            Err(BookError::Store(StoreError::NotFound(_)))
        ));
    }

    #[test]
    fn test_add_from_directory_with_birthday_denied() {
        let now = date(2024, 3, 10);
        let mut directory =
            MemoryDirectory::new(vec![entry("2", "Ben", Some(DirectoryBirthday::without_year(8, 9)))]).denied();
        let mut book = ContactBook::new();
        let mut blobs = MemoryBlobs::new();

        assert!(matches!(
            book.add_from_directory_with_birthday(&mut directory, &mut blobs, "2", date(1992, 8, 9), &now),
            Err(BookError::Store(StoreError::PermissionDenied))
        ));
        assert!(book.selected_list().is_empty());
    }

    #[test]
    fn test_sync_birthday_events() {
        let now = date(2023, 3, 10);
        let config = EngineConfig::new().with_leap_day_policy(LeapDayPolicy::Mar1);
        let mut book = ContactBook::with_config(config);
        book.add_contact(contact("Ann", date(1980, 4, 2)).with_nickname("Annie"), &now);
        book.add_contact(contact("Eve", date(2000, 2, 29)), &now);
        let mut calendar = MemoryCalendar::new();

        assert_eq!(book.sync_birthday_events(&mut calendar, &now).expect("sync succeeds"), 2);
        assert_eq!(book.sync_birthday_events(&mut calendar, &now).expect("sync succeeds"), 0);

        let titles: Vec<&str> = calendar.events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Annie's Birthday", "Eve Tester's Birthday"]);
        assert_eq!(calendar.events()[1].first_occurrence, date(2024, 2, 29));
        assert_eq!(calendar.events()[0].month_day, md(4, 2));
    }
}
