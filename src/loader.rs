//! Loads the schedule and overrides documents from disk.
//!
//! The schedule is required: without it there is nothing to render. The
//! overrides file is optional, and any failure to read or parse it only
//! costs the overrides.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rotaview_core::document::{OverridesDocument, ScheduleDocument};
use tracing::{debug, warn};

/// Document locations for one render cycle
#[derive(Debug, Clone)]
pub struct Sources {
    pub schedule: PathBuf,
    pub overrides: Option<PathBuf>,
}

/// Both documents, fully loaded
#[derive(Debug, Clone)]
pub struct Documents {
    pub schedule: ScheduleDocument,
    pub overrides: Option<OverridesDocument>,
}

impl Sources {
    pub async fn load(&self) -> Result<Documents> {
        let schedule = load_schedule(&self.schedule).await?;

        let overrides = match &self.overrides {
            Some(path) => load_overrides(path).await,
            None => None,
        };

        debug!(
            always_available = schedule.always_available.len(),
            weekday = schedule.weekday_rotation.schedule.len(),
            weekend = schedule.weekend_additions.schedule.len(),
            overrides = overrides.as_ref().map_or(0, |o| o.overrides.len()),
            "loaded documents"
        );

        Ok(Documents { schedule, overrides })
    }
}

async fn load_schedule(path: &Path) -> Result<ScheduleDocument> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to load schedule {}", path.display()))?;

    ScheduleDocument::from_json(&content)
        .with_context(|| format!("Failed to parse schedule {}", path.display()))
}

async fn load_overrides(path: &Path) -> Option<OverridesDocument> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no overrides file");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load overrides, using base schedule");
            return None;
        }
    };

    match OverridesDocument::from_json(&content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse overrides, using base schedule");
            None
        }
    }
}
