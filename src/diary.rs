use tracing::warn;

use crate::client::FdcClient;
use crate::config::Config;
use crate::error::{DiaryError, DiaryResult};
use crate::log::FoodLog;
use crate::models::{FoodRecord, LogEntry, Totals};
use crate::overlay::{Overlay, OverlayState};
use crate::store::FileStore;

/// A diary session: the log, the overlay and the search client behind a
/// single owner, with one method per user intent.
///
/// All state lives here rather than in process-scoped globals; the renderer
/// calls intents and reads snapshots back.
pub struct Diary {
    client: FdcClient,
    store: FileStore,
    log: FoodLog,
    overlay: Overlay,
}

impl Diary {
    /// Open a session, restoring any previously persisted log.
    pub fn open(config: &Config) -> Self {
        let client = FdcClient::new(config.api_key.clone(), config.base_url.clone());
        let store = FileStore::new(&config.data_dir);
        let log = FoodLog::restore(&store);
        Self {
            client,
            store,
            log,
            overlay: Overlay::new(),
        }
    }

    pub fn log(&self) -> &FoodLog {
        &self.log
    }

    pub fn totals(&self) -> Totals {
        self.log.totals()
    }

    pub fn overlay(&self) -> &OverlayState {
        self.overlay.state()
    }

    /// Search intent: fetch and present results.
    ///
    /// An empty query fails locally without touching overlay state or the
    /// network; a fetch failure closes the overlay and surfaces the error.
    pub async fn search(&mut self, query: &str) -> DiaryResult<&[FoodRecord]> {
        if query.trim().is_empty() {
            return Err(DiaryError::EmptyQuery);
        }
        self.overlay.begin_search()?;
        match self.client.search(query).await {
            Ok(foods) => {
                self.overlay.show_results(foods);
                Ok(self.overlay.results().unwrap_or(&[]))
            }
            Err(e) => {
                self.overlay.cancel();
                Err(e)
            }
        }
    }

    /// Selection intent: pick a result (0-based) for a fresh add.
    pub fn select(&mut self, index: usize) -> DiaryResult<&FoodRecord> {
        self.overlay.select(index)
    }

    /// Commit intent: validate the serving input, scale the held record and
    /// write it to the log, appending for a fresh add and replacing in
    /// place when editing.
    ///
    /// On `InvalidServingSize` the overlay stays open and the log is
    /// untouched. Persistence is best-effort: a failed write is logged and
    /// the in-memory commit stands.
    pub fn commit(&mut self, serving_input: &str) -> DiaryResult<LogEntry> {
        let (entry, editing) = self.overlay.scale_selection(serving_input)?;
        let index = match editing {
            Some(index) => {
                self.log.replace(index, entry)?;
                index
            }
            None => {
                self.log.append(entry);
                self.log.len() - 1
            }
        };
        self.overlay.cancel();
        self.persist_best_effort();
        self.log.get(index).cloned()
    }

    /// Edit intent: re-open the overlay seeded from the entry at `index`.
    pub fn edit(&mut self, index: usize) -> DiaryResult<()> {
        let entry = self.log.get(index)?.clone();
        self.overlay.begin_edit(&entry, index);
        Ok(())
    }

    /// Delete intent: positional removal; subsequent entries shift down.
    pub fn delete(&mut self, index: usize) -> DiaryResult<LogEntry> {
        let removed = self.log.remove(index)?;
        self.persist_best_effort();
        Ok(removed)
    }

    /// Cancel intent: close the overlay, dropping any pending selection.
    pub fn cancel(&mut self) {
        self.overlay.cancel();
    }

    fn persist_best_effort(&self) {
        if let Err(e) = self.log.persist(&self.store) {
            warn!("failed to persist food log: {e}");
        }
    }
}
