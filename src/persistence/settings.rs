use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    get_data_file_path,
    load_json_or_default,
    save_json,
    RecentFiles,
};
use crate::{
    core::ArchitectError,
    parser::DEFAULT_EXPORT_PREFIX,
};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
    #[serde(default)]
    pub recent_files: RecentFiles,
}

fn default_export_prefix() -> String {
    DEFAULT_EXPORT_PREFIX.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self { export_prefix: default_export_prefix(), recent_files: RecentFiles::default() }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        get_data_file_path(SETTINGS_FILE)
    }

    /// Unreadable settings are replaced by defaults.
    pub fn load(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ArchitectError> {
        save_json(self, path)
    }
}
