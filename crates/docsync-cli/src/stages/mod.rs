//! Pipeline stages
//!
//! Stages share nothing in memory: each reads the artifact the previous one
//! persisted under the output directory and writes its own.

mod analyze;
mod research;
mod update;
mod validate;

pub(crate) use analyze::analyze;
pub(crate) use research::research;
pub(crate) use update::update;
pub(crate) use validate::validate;

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Wall-clock readings taken once per stage
#[derive(Debug, Clone)]
pub(crate) struct Clock {
    pub(crate) timestamp: String,
    pub(crate) today: NaiveDate,
    pub(crate) now: DateTime<Utc>,
}

impl Clock {
    pub(crate) fn now() -> Self {
        let local = Local::now();
        Self {
            timestamp: local.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            today: local.date_naive(),
            now: local.with_timezone(&Utc),
        }
    }
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_text(path, &json)
}

pub(crate) fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Read an upstream artifact; `Ok(None)` when it has not been produced
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(value))
}

/// Like [`read_json`], but a malformed artifact is logged and treated as absent
pub(crate) fn read_json_or_none<T: DeserializeOwned>(path: &Path) -> Option<T> {
    read_json(path).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable artifact: {:#}", e);
        None
    })
}
