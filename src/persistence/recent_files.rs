use std::{
    collections::VecDeque,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFileEntry {
    pub file_path: String,
    pub last_opened: chrono::DateTime<chrono::Utc>,
    pub record_count: Option<usize>,
}

impl RecentFileEntry {
    pub fn new(file_path: String, record_count: usize) -> Self {
        Self { file_path, last_opened: chrono::Utc::now(), record_count: Some(record_count) }
    }

    pub fn file_exists(&self) -> bool {
        Path::new(&self.file_path).exists()
    }

    pub fn format_last_opened(&self) -> String {
        let local_time = self.last_opened.with_timezone(&chrono::Local);
        local_time.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn format_record_count(&self) -> String {
        match self.record_count {
            Some(1) => "1 character".to_string(),
            Some(count) => format!("{} characters", count),
            None => "Unknown size".to_string(),
        }
    }

    pub fn get_filename(&self) -> String {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("Unknown")
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFiles {
    files: VecDeque<RecentFileEntry>,
    max_entries: usize,
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::new(10)
    }
}

impl RecentFiles {
    pub fn new(max_entries: usize) -> Self {
        Self { files: VecDeque::new(), max_entries }
    }

    /// Newest first; re-adding a path moves it to the front.
    pub fn add_file(&mut self, file_path: String, record_count: usize) {
        self.files.retain(|entry| entry.file_path != file_path);
        self.files.push_front(RecentFileEntry::new(file_path, record_count));

        while self.files.len() > self.max_entries {
            self.files.pop_back();
        }
    }

    pub fn get_files(&self) -> &VecDeque<RecentFileEntry> {
        &self.files
    }

    /// Drops entries whose file is gone. Returns how many were dropped.
    pub fn prune_missing(&mut self) -> usize {
        let missing: Vec<String> = self
            .files
            .iter()
            .filter(|entry| !entry.file_exists())
            .map(|entry| entry.file_path.clone())
            .collect();

        for file_path in &missing {
            self.remove_file(file_path);
        }
        missing.len()
    }

    pub fn remove_file(&mut self, file_path: &str) {
        self.files.retain(|entry| entry.file_path != file_path);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
