//! Holiday document cache keyed by file modification time.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tickstamp_core::Result;
use tracing::info;

use crate::holiday::HolidayCalendar;

#[derive(Debug)]
struct CachedCalendar {
    modified: SystemTime,
    calendar: Arc<HolidayCalendar>,
}

/// Re-reads the holiday document only when its modification time changes.
///
/// The file is stat'ed on every call, so a missing or unreadable document
/// still fails even when an older copy is cached.
#[derive(Debug)]
pub struct HolidayCache {
    path: PathBuf,
    cached: Mutex<Option<CachedCalendar>>,
    loads: AtomicU64,
}

impl HolidayCache {
    /// Create an empty cache for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
            loads: AtomicU64::new(0),
        }
    }

    /// Path of the cached document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current calendar, reloading it if the file changed.
    pub fn get(&self) -> Result<Arc<HolidayCalendar>> {
        let modified = std::fs::metadata(&self.path)?.modified()?;

        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = cached.as_ref() {
            if entry.modified == modified {
                return Ok(Arc::clone(&entry.calendar));
            }
        }

        let calendar = Arc::new(HolidayCalendar::load(&self.path)?);
        info!(
            path = %self.path.display(),
            holidays = calendar.len(),
            "holiday calendar (re)loaded"
        );
        *cached = Some(CachedCalendar {
            modified,
            calendar: Arc::clone(&calendar),
        });
        self.loads.fetch_add(1, Ordering::Relaxed);

        Ok(calendar)
    }

    /// Number of times the document was actually parsed.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    /// Drop the cached calendar.
    pub fn invalidate(&self) {
        *self.cached.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
