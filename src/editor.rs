//! Article editor state
//!
//! Tracks a working copy of an article against the last persisted
//! snapshot. Dirtiness is derived by comparison, never by a flag that
//! could drift out of sync with the text. Saving sends only the fields
//! that actually differ and, on success, re-seeds the snapshot so the
//! editor reads clean again.

use crate::error::{Result, SeoForgeError};
use crate::session::FlightSlot;
use crate::store::{ArticleRecord, ArticleStore, ArticleUpdate};

/// The editable fields of an article
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    title: String,
    content: String,
    meta_description: String,
}

impl From<&ArticleRecord> for Snapshot {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            title: record.title.clone(),
            content: record.content.clone(),
            meta_description: record.meta_description.clone(),
        }
    }
}

/// Working state of one article being edited
pub struct EditorState {
    record: ArticleRecord,
    /// Last persisted values; the baseline for dirtiness
    saved: Snapshot,
    working: Snapshot,
    save_flight: FlightSlot,
}

impl EditorState {
    /// Open an editor over a loaded record
    pub fn new(record: ArticleRecord) -> Self {
        let saved = Snapshot::from(&record);
        Self {
            working: saved.clone(),
            saved,
            record,
            save_flight: FlightSlot::new("save"),
        }
    }

    /// The slug the article is persisted under (never editable)
    pub fn slug(&self) -> &str {
        &self.record.slug
    }

    pub fn title(&self) -> &str {
        &self.working.title
    }

    pub fn content(&self) -> &str {
        &self.working.content
    }

    pub fn meta_description(&self) -> &str {
        &self.working.meta_description
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.working.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.working.content = content.into();
    }

    pub fn set_meta_description(&mut self, meta_description: impl Into<String>) {
        self.working.meta_description = meta_description.into();
    }

    /// True when the working copy differs from the last saved snapshot
    ///
    /// Purely derived: editing a field back to its saved value makes
    /// the editor clean again.
    pub fn has_changes(&self) -> bool {
        self.working != self.saved
    }

    /// The fields that differ from the saved snapshot
    ///
    /// Empty (`ArticleUpdate::is_empty`) when nothing changed.
    pub fn diff(&self) -> ArticleUpdate {
        let field = |working: &String, saved: &String| {
            (working != saved).then(|| working.clone())
        };
        ArticleUpdate {
            title: field(&self.working.title, &self.saved.title),
            content: field(&self.working.content, &self.saved.content),
            meta_description: field(&self.working.meta_description, &self.saved.meta_description),
        }
    }

    /// Discard unsaved edits, restoring the saved snapshot
    pub fn revert(&mut self) {
        self.working = self.saved.clone();
    }

    /// Persist the changed fields
    ///
    /// A no-op returning Ok when nothing changed. On success the saved
    /// snapshot advances to the working copy; on failure it stays put,
    /// so the edits remain marked dirty and a retry sends them again.
    ///
    /// # Errors
    ///
    /// `Busy` while a save is already in flight; storage errors
    /// propagate from the adapter.
    pub async fn save(&mut self, store: &dyn ArticleStore) -> Result<()> {
        let update = self.diff();
        if update.is_empty() {
            tracing::debug!("Save requested with no changes for '{}'", self.record.slug);
            return Ok(());
        }

        let token = self.save_flight.try_acquire()?;
        let result = store.update(&self.record.slug, update).await;
        self.save_flight.finish(token);

        match result {
            Ok(()) => {
                self.saved = self.working.clone();
                tracing::info!("Saved changes to '{}'", self.record.slug);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Save failed for '{}': {}", self.record.slug, err);
                Err(err)
            }
        }
    }

    /// Reload the editor from a freshly fetched record
    ///
    /// # Errors
    ///
    /// `Validation` when the record is for a different slug.
    pub fn reload(&mut self, record: ArticleRecord) -> Result<()> {
        if record.slug != self.record.slug {
            return Err(SeoForgeError::Validation(format!(
                "cannot reload '{}' into an editor for '{}'",
                record.slug, self.record.slug
            ))
            .into());
        }
        self.saved = Snapshot::from(&record);
        self.working = self.saved.clone();
        self.record = record;
        Ok(())
    }
}
