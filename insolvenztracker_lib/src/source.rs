//! Boundaries to the systems that feed the matching engine.
//!
//! The portal scraper and the client database live outside this crate; they
//! plug in through [`AnnouncementSource`] and [`ClientRegistry`]. [`JsonFile`]
//! covers both for exported snapshots on disk.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::MatchConfig;
use crate::error::{InsolvencyError, Result};
use crate::matching::{MatchReport, Matcher};
use crate::records::{AnnouncementRecord, ClientRecord};

/// Supplies the client snapshot for one matching run.
pub trait ClientRegistry {
    fn fetch_clients(&self) -> Result<Vec<ClientRecord>>;
}

/// Supplies the announcements collected for one run.
pub trait AnnouncementSource {
    fn fetch_announcements(&self) -> Result<Vec<AnnouncementRecord>>;
}

/// A JSON array of records stored in a file.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows that do not fit `T` are skipped so one broken row cannot sink
    /// the batch. A file that is not a JSON array is still an error.
    fn read_array<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| InsolvencyError::Io {
            path: self.path.clone(),
            source,
        })?;
        let rows: Vec<serde_json::Value> = serde_json::from_str(&content)?;
        let total = rows.len();
        let mut records = Vec::with_capacity(total);
        for (index, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<T>(row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping row {} in {}: {}", index, self.path.display(), e)
                }
            }
        }
        tracing::debug!(
            "Loaded {} of {} records from {}",
            records.len(),
            total,
            self.path.display()
        );
        Ok(records)
    }
}

impl ClientRegistry for JsonFile {
    fn fetch_clients(&self) -> Result<Vec<ClientRecord>> {
        let clients: Vec<ClientRecord> = self.read_array()?;
        if clients.is_empty() {
            tracing::error!("No client records found in {}", self.path.display());
        } else {
            tracing::info!("Loaded client records ({} entries)", clients.len());
        }
        Ok(clients)
    }
}

impl AnnouncementSource for JsonFile {
    fn fetch_announcements(&self) -> Result<Vec<AnnouncementRecord>> {
        let announcements: Vec<AnnouncementRecord> = self.read_array()?;
        tracing::info!("Loaded {} insolvency announcements", announcements.len());
        Ok(announcements)
    }
}

/// Run one matching cycle: load clients, load announcements, match.
pub fn run_matching<R, S>(registry: &R, source: &S, config: MatchConfig) -> Result<MatchReport>
where
    R: ClientRegistry + ?Sized,
    S: AnnouncementSource + ?Sized,
{
    let clients = registry.fetch_clients()?;
    let announcements = source.fetch_announcements()?;
    let matcher = Matcher::new(clients, config);
    Ok(matcher.find_matches(&announcements))
}
