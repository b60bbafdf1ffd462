//! The persistent document store.
//!
//! [`Store`] is the sole owner of the durable document: it seeds, loads,
//! migrates and saves it, and hands out mutation only through
//! [`Store::mutate`], which commits a working copy after persisting it.

pub mod migrations;
pub mod seed;
pub mod storage;

use tracing::{debug, info, warn};

use crate::{
    error::{AppError, AppResult},
    models::Document,
};

use self::{
    migrations::CURRENT_VERSION,
    seed::seed_document,
    storage::DurableStorage,
};

pub struct Store {
    storage: Box<dyn DurableStorage>,
    key: String,
    doc: Document,
}

fn persist(storage: &dyn DurableStorage, key: &str, doc: &Document) -> AppResult<()> {
    let raw = serde_json::to_string(doc)?;
    storage.write(key, &raw)?;
    Ok(())
}

impl Store {
    /// Opens the document stored under `key`, seeding or migrating as needed.
    pub fn open(storage: impl DurableStorage + 'static, key: impl Into<String>) -> AppResult<Self> {
        let mut store = Self {
            storage: Box::new(storage),
            key: key.into(),
            doc: Document::default(),
        };
        store.load()?;
        Ok(store)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Reads the durable key into memory.
    ///
    /// Anything that cannot be used as-is (missing, unreadable, malformed, or
    /// written by a newer schema) is replaced by a freshly seeded document.
    pub fn load(&mut self) -> AppResult<&Document> {
        match self.read_stored() {
            Some(doc) => {
                self.doc = doc;
                self.migrate()?;
            }
            None => {
                self.doc = seed_document();
                self.save()?;
                info!(key = %self.key, "seeded fresh document");
            }
        }
        Ok(&self.doc)
    }

    fn read_stored(&self) -> Option<Document> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "stored document unreadable, reseeding");
                return None;
            }
        };

        let doc: Document = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(error = %err, "stored document malformed, reseeding");
                return None;
            }
        };

        if doc.version > CURRENT_VERSION {
            warn!(
                stored = doc.version,
                supported = CURRENT_VERSION,
                "stored document is newer than this build, reseeding"
            );
            return None;
        }
        Some(doc)
    }

    pub fn save(&self) -> AppResult<()> {
        persist(self.storage.as_ref(), &self.key, &self.doc)
    }

    /// Applies pending schema steps, persisting after each. Returns how many
    /// steps ran; a current document is neither touched nor rewritten.
    pub fn migrate(&mut self) -> AppResult<usize> {
        let storage = self.storage.as_ref();
        let key = self.key.as_str();
        let applied = migrations::run(&mut self.doc, |doc, step| {
            persist(storage, key, doc)?;
            info!(
                from = step.from,
                to = step.to(),
                description = step.description,
                "applied migration"
            );
            Ok::<(), AppError>(())
        })?;
        if applied == 0 {
            debug!(version = self.doc.version, "document already current");
        }
        Ok(applied)
    }

    /// Drops the durable document and reseeds it.
    pub fn reset(&mut self) -> AppResult<&Document> {
        self.storage.remove(&self.key)?;
        self.doc = seed_document();
        self.save()?;
        info!(key = %self.key, "demo data reset");
        Ok(&self.doc)
    }

    /// Runs `change` against a working copy of the document.
    ///
    /// The copy replaces the live document only after it was persisted, so a
    /// rejected change or a failed write leaves memory and storage untouched.
    pub fn mutate<T>(&mut self, change: impl FnOnce(&mut Document) -> AppResult<T>) -> AppResult<T> {
        let mut working = self.doc.clone();
        let out = change(&mut working)?;
        persist(self.storage.as_ref(), &self.key, &working)?;
        self.doc = working;
        Ok(out)
    }
}

