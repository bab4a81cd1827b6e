//! The repository interface over stored mood entries.

use super::{entries, Database};
use crate::errors::AppResult;
use crate::mood_core::{EntryId, EntryPatch, MoodEntry, NewMoodEntry, TimeRange};

/// Durable CRUD over the mood-entry collection.
///
/// Listings are newest first; entries sharing a timestamp come out highest
/// id first. Every mutating call is atomic and durable once it returns `Ok`.
pub trait MoodStore {
    /// Assigns an id, persists the entry and returns the stored record.
    fn create(&self, entry: NewMoodEntry) -> AppResult<MoodEntry>;

    /// Fails with `AppError::NotFound` if the id does not exist.
    fn get_by_id(&self, id: EntryId) -> AppResult<MoodEntry>;

    /// Entries with `range.start <= timestamp < range.end`.
    fn list_in_range(&self, range: &TimeRange) -> AppResult<Vec<MoodEntry>>;

    fn list_all(&self) -> AppResult<Vec<MoodEntry>>;

    /// Only notes change. Fails with `AppError::NotFound` if the id does not exist.
    fn update(&self, id: EntryId, patch: &EntryPatch) -> AppResult<MoodEntry>;

    /// Fails with `AppError::NotFound` if the id does not exist, including
    /// on a repeated delete.
    fn delete(&self, id: EntryId) -> AppResult<()>;

    /// Removes every entry and returns how many there were.
    fn delete_all(&self) -> AppResult<usize>;
}

impl MoodStore for Database {
    fn create(&self, entry: NewMoodEntry) -> AppResult<MoodEntry> {
        let conn = self.get_conn()?;
        entries::insert_entry(&conn, entry)
    }

    fn get_by_id(&self, id: EntryId) -> AppResult<MoodEntry> {
        let conn = self.get_conn()?;
        entries::get_entry(&conn, id)
    }

    fn list_in_range(&self, range: &TimeRange) -> AppResult<Vec<MoodEntry>> {
        let conn = self.get_conn()?;
        entries::list_entries_in_range(&conn, range)
    }

    fn list_all(&self) -> AppResult<Vec<MoodEntry>> {
        let conn = self.get_conn()?;
        entries::list_all_entries(&conn)
    }

    fn update(&self, id: EntryId, patch: &EntryPatch) -> AppResult<MoodEntry> {
        let conn = self.get_conn()?;
        entries::update_entry(&conn, id, patch)
    }

    fn delete(&self, id: EntryId) -> AppResult<()> {
        let conn = self.get_conn()?;
        entries::delete_entry(&conn, id)
    }

    fn delete_all(&self) -> AppResult<usize> {
        let conn = self.get_conn()?;
        entries::delete_all_entries(&conn)
    }
}

impl<S: MoodStore + ?Sized> MoodStore for &S {
    fn create(&self, entry: NewMoodEntry) -> AppResult<MoodEntry> {
        (**self).create(entry)
    }

    fn get_by_id(&self, id: EntryId) -> AppResult<MoodEntry> {
        (**self).get_by_id(id)
    }

    fn list_in_range(&self, range: &TimeRange) -> AppResult<Vec<MoodEntry>> {
        (**self).list_in_range(range)
    }

    fn list_all(&self) -> AppResult<Vec<MoodEntry>> {
        (**self).list_all()
    }

    fn update(&self, id: EntryId, patch: &EntryPatch) -> AppResult<MoodEntry> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: EntryId) -> AppResult<()> {
        (**self).delete(id)
    }

    fn delete_all(&self) -> AppResult<usize> {
        (**self).delete_all()
    }
}
