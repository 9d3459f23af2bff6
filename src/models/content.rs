//! Contents API DTOs.
//!
//! `ContentEntry` mirrors one record of a GitHub contents listing and is
//! kept exactly as fetched; within a repository + ref an entry is uniquely
//! identified by `path`. Only `dir` entries can have children.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: u64,
    pub url: String,
    pub html_url: Option<String>,
    pub git_url: Option<String>,
    pub download_url: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(rename = "_links")]
    pub links: ContentLinks,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Dir,
    File,
    /// Symlinks and submodules; rendered as plain entries, never expandable.
    #[serde(other)]
    Other,
}

impl EntryType {
    pub fn is_dir(self) -> bool {
        self == EntryType::Dir
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentLinks {
    #[serde(rename = "self")]
    pub self_url: String,
    pub git: Option<String>,
    pub html: Option<String>,
}
