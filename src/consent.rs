use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const CONSENT_KEY: &str = "cookie-consent";
const COOKIE_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub analytics: bool,
    pub adsense: bool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ConsentRecord {
    pub fn new(analytics: bool, adsense: bool, at: DateTime<Utc>) -> Self {
        ConsentRecord {
            analytics,
            adsense,
            timestamp: at.timestamp_millis(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
            .map(|at| at + Duration::days(COOKIE_LIFETIME_DAYS))
    }

    /// `Set-Cookie` style rendering of the record.
    pub fn cookie_header(&self) -> Result<String> {
        let value = serde_json::to_string(self)
            .map_err(|e| Error::invalid(format!("Failed to encode consent: {}", e)))?;
        let expires = self
            .expires_at()
            .ok_or_else(|| Error::invalid("Consent timestamp out of range"))?;
        Ok(format!(
            "{}={}; expires={}; path=/",
            CONSENT_KEY,
            value,
            expires.format("%a, %d %b %Y %H:%M:%S GMT")
        ))
    }
}

/// Consent record kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct ConsentStore {
    path: PathBuf,
}

impl ConsentStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConsentStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store under the user's data directory, or the working directory when
    /// there is none.
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pdfcutter");
        Self::new(dir.join("consent.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved record, or `None` when the user has not decided yet.
    /// An unreadable record counts as undecided.
    pub fn load(&self) -> Option<ConsentRecord> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no consent record");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed consent record");
                None
            }
        }
    }

    pub fn save(&self, record: &ConsentRecord) -> Result<()> {
        let io_err = |source| Error::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string(record)
            .map_err(|e| Error::invalid(format!("Failed to encode consent: {}", e)))?;
        std::fs::write(&self.path, json).map_err(io_err)
    }

    pub fn accept_all(&self) -> Result<ConsentRecord> {
        let record = ConsentRecord::new(true, true, Utc::now());
        self.save(&record)?;
        Ok(record)
    }

    pub fn accept_necessary_only(&self) -> Result<ConsentRecord> {
        let record = ConsentRecord::new(false, false, Utc::now());
        self.save(&record)?;
        Ok(record)
    }

    /// Whether the third-party ad script may be loaded.
    pub fn ads_allowed(&self) -> bool {
        self.load().is_some_and(|record| record.adsense)
    }
}
