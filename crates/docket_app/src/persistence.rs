use std::fs;
use std::io::Write;
use std::path::Path;

use docket_core::{AppViewModel, FilterSet, DEFAULT_PAGE_SIZE};
use docket_logging::{docket_error, docket_info, docket_warn};
use serde::{Deserialize, Serialize};

const PREFS_FILENAME: &str = ".docket_prefs.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedFilters {
    #[serde(default)]
    client: String,
    #[serde(default)]
    number_start: String,
    #[serde(default)]
    number_end: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    area: String,
    #[serde(default)]
    service: String,
    #[serde(default)]
    reference: String,
}

/// UI preferences carried across runs: the page size and the last filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PersistedPrefs {
    pub page_size: usize,
    filters: PersistedFilters,
}

impl Default for PersistedPrefs {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            filters: PersistedFilters::default(),
        }
    }
}

impl PersistedPrefs {
    pub fn filters(&self) -> FilterSet {
        FilterSet {
            client: self.filters.client.clone(),
            number_start: self.filters.number_start.clone(),
            number_end: self.filters.number_end.clone(),
            year: self.filters.year.clone(),
            area: self.filters.area.clone(),
            service: self.filters.service.clone(),
            reference: self.filters.reference.clone(),
        }
    }
}

/// Loads preferences, falling back to defaults when the file is missing
/// or unparsable.
pub(crate) fn load_prefs(dir: &Path) -> PersistedPrefs {
    let path = dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return PersistedPrefs::default();
        }
        Err(err) => {
            docket_warn!("Failed to read preferences from {:?}: {}", path, err);
            return PersistedPrefs::default();
        }
    };

    match ron::from_str(&content) {
        Ok(prefs) => {
            docket_info!("Loaded preferences from {:?}", path);
            prefs
        }
        Err(err) => {
            docket_warn!("Failed to parse preferences from {:?}: {}", path, err);
            PersistedPrefs::default()
        }
    }
}

pub(crate) fn save_prefs(dir: &Path, view: &AppViewModel) {
    let prefs = PersistedPrefs {
        page_size: view.page_size,
        filters: PersistedFilters {
            client: view.filters.client.clone(),
            number_start: view.filters.number_start.clone(),
            number_end: view.filters.number_end.clone(),
            year: view.filters.year.clone(),
            area: view.filters.area.clone(),
            service: view.filters.service.clone(),
            reference: view.filters.reference.clone(),
        },
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&prefs, pretty) {
        Ok(text) => text,
        Err(err) => {
            docket_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomic(dir, PREFS_FILENAME, &content) {
        docket_error!("Failed to write preferences to {:?}: {}", dir, err);
    }
}

/// Write a temp file in `dir` and rename it over the target, so a crash
/// mid-write never leaves a half-parsed preferences file behind.
fn write_atomic(dir: &Path, filename: &str, content: &str) -> std::io::Result<()> {
    let target = dir.join(filename);
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|err| err.error)?;
    Ok(())
}
