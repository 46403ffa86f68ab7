use tracing::warn;

use crate::error::{DiaryError, DiaryResult};
use crate::models::{LogEntry, Totals};
use crate::store::FileStore;

/// Storage key the serialized log lives under.
pub const LOG_KEY: &str = "food_log";

/// The day's ordered sequence of logged entries.
///
/// Order is insertion order and is meaningful for display; edits and
/// deletions address entries by positional index.
#[derive(Debug, Default)]
pub struct FoodLog {
    entries: Vec<LogEntry>,
}

impl FoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> DiaryResult<&LogEntry> {
        self.entries.get(index).ok_or(DiaryError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Overwrite the entry at `index`.
    ///
    /// The controller only ever passes an index it just edited, so an
    /// invalid one is an invariant violation: it is logged and the log is
    /// left untouched.
    pub fn replace(&mut self, index: usize, entry: LogEntry) -> DiaryResult<()> {
        match self.entries.get_mut(index) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => {
                warn!(index, len = self.entries.len(), "replace past end of log");
                Err(DiaryError::IndexOutOfRange {
                    index,
                    len: self.entries.len(),
                })
            }
        }
    }

    /// Delete the entry at `index`; subsequent entries shift down.
    pub fn remove(&mut self, index: usize) -> DiaryResult<LogEntry> {
        if index >= self.entries.len() {
            return Err(DiaryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Sum the scaled macros across all entries.
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for entry in &self.entries {
            totals.add(entry);
        }
        totals
    }

    /// Load the log from the store.
    ///
    /// Best-effort: a missing key or an unreadable value starts an empty
    /// log rather than failing.
    pub fn restore(store: &FileStore) -> Self {
        let raw = match store.get(LOG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("failed to read stored food log, starting empty: {e}");
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Self { entries },
            Err(e) => {
                warn!("stored food log is unreadable, starting empty: {e}");
                Self::default()
            }
        }
    }

    /// Write the full log to the store under [`LOG_KEY`].
    pub fn persist(&self, store: &FileStore) -> DiaryResult<()> {
        let raw = serde_json::to_string(&self.entries)?;
        store.set(LOG_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodRecord;
    use tempfile::tempdir;

    fn record(name: &str, calories: f64) -> FoodRecord {
        FoodRecord {
            id: 1,
            name: name.to_string(),
            calories,
            protein: 10.0,
            carbs: 20.0,
            fat: 5.0,
        }
    }

    #[test]
    fn append_then_totals_matches_single_entry() {
        let mut log = FoodLog::new();
        log.append(record("Egg", 143.0).scaled(50.0));

        let totals = log.totals();
        assert_eq!(totals.calories, 71.5);
        assert_eq!(totals.protein, 5.0);
        assert_eq!(totals.carbs, 10.0);
        assert_eq!(totals.fat, 2.5);
    }

    #[test]
    fn remove_shifts_subsequent_entries_down() {
        let mut log = FoodLog::new();
        log.append(record("A", 100.0).scaled(100.0));
        log.append(record("B", 200.0).scaled(100.0));
        log.append(record("C", 300.0).scaled(100.0));

        let removed = log.remove(1).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].name, "C");
        assert_eq!(log.totals().calories, 400.0);
    }

    #[test]
    fn remove_only_entry_leaves_zero_totals() {
        let mut log = FoodLog::new();
        log.append(record("A", 100.0).scaled(100.0));
        log.remove(0).unwrap();

        assert!(log.is_empty());
        assert_eq!(log.totals(), Totals::default());
    }

    #[test]
    fn replace_overwrites_in_place() {
        let mut log = FoodLog::new();
        log.append(record("A", 100.0).scaled(100.0));
        log.append(record("B", 200.0).scaled(100.0));

        log.replace(0, record("A", 100.0).scaled(50.0)).unwrap();
        assert_eq!(log.entries()[0].calories, 50.0);
        assert_eq!(log.entries()[0].serving_size, 50.0);
        assert_eq!(log.entries()[1].name, "B");
    }

    #[test]
    fn index_operations_reject_out_of_range() {
        let mut log = FoodLog::new();
        log.append(record("A", 100.0).scaled(100.0));

        assert!(matches!(
            log.get(1),
            Err(DiaryError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(matches!(
            log.remove(5),
            Err(DiaryError::IndexOutOfRange { index: 5, .. })
        ));
        assert!(log
            .replace(1, record("B", 1.0).scaled(100.0))
            .is_err());
        // The failed operations must not have mutated anything.
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].name, "A");
    }

    #[test]
    fn persist_then_restore_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let mut log = FoodLog::new();
        log.append(record("Egg", 143.0).scaled(50.0));
        log.append(record("Rice", 130.0).scaled(200.0));
        log.persist(&store).unwrap();

        let restored = FoodLog::restore(&store);
        assert_eq!(restored.entries(), log.entries());
        assert_eq!(restored.totals(), log.totals());
    }

    #[test]
    fn restore_with_nothing_stored_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(FoodLog::restore(&store).is_empty());
    }

    #[test]
    fn restore_with_corrupt_value_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set(LOG_KEY, "{not json").unwrap();
        assert!(FoodLog::restore(&store).is_empty());
    }
}
