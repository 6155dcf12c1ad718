//! Canonical file entries built from the node's stat answers.

use serde::{Deserialize, Serialize};

use crate::api::v0::files::{LsEntry, StatResponse};
use crate::path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::File => write!(f, "file"),
            EntryType::Dir => write!(f, "dir"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(format!("unknown visibility: {other}")),
        }
    }
}

/// Metadata of one file or directory, as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Logical path, as the caller spelled it
    pub path: String,
    /// Unix seconds
    pub timestamp: i64,
    pub size: u64,
    pub visibility: Visibility,
}

impl FileEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }
}

/// Normalize the stat answer for logical `path`.
pub fn normalize(path: &str, stat: &StatResponse) -> FileEntry {
    normalize_at(path, stat, chrono::Utc::now().timestamp())
}

/// As [`normalize`], with `now` used when the node reports no mtime.
pub fn normalize_at(path: &str, stat: &StatResponse, now: i64) -> FileEntry {
    let entry_type = if stat.is_dir() {
        EntryType::Dir
    } else {
        EntryType::File
    };

    // Directories report Size 0 and carry their real size cumulatively.
    let size = if stat.size == 0 && entry_type == EntryType::Dir {
        stat.cumulative_size
    } else {
        stat.size
    };

    let visibility = match stat.mode.as_ref().and_then(|mode| mode.bits()) {
        Some(bits) if bits & 0o7 != 0 => Visibility::Public,
        _ => Visibility::Private,
    };

    FileEntry {
        entry_type,
        path: path.to_string(),
        timestamp: stat.mtime.unwrap_or(now),
        size,
        visibility,
    }
}

/// Logical path to re-stat for a listing entry found in `dir`.
///
/// Listing entries are never normalized on their own: the node's listing
/// omits fields a stat carries, so each entry is resolved with a stat of
/// its own.
pub fn listing_target(dir: &str, entry: &LsEntry) -> String {
    path::join(dir, &entry.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v0::files::Mode;

    fn stat(file_type: &str, size: u64, cumulative_size: u64) -> StatResponse {
        StatResponse {
            hash: "QmTest".into(),
            size,
            cumulative_size,
            blocks: 1,
            file_type: file_type.into(),
            mode: None,
            mtime: None,
        }
    }

    #[test]
    fn test_empty_directory_size_uses_cumulative_size() {
        let entry = normalize_at("docs", &stat("directory", 0, 4096), 0);
        assert_eq!(entry.entry_type, EntryType::Dir);
        assert_eq!(entry.size, 4096);
    }

    #[test]
    fn test_zero_sized_file_stays_zero() {
        let entry = normalize_at("empty.txt", &stat("file", 0, 14), 0);
        assert_eq!(entry.entry_type, EntryType::File);
        assert_eq!(entry.size, 0);
    }

    #[test]
    fn test_file_size_is_reported_size() {
        let entry = normalize_at("a.txt", &stat("file", 12, 20), 0);
        assert_eq!(entry.size, 12);
    }

    #[test]
    fn test_timestamp_prefers_mtime() {
        let mut raw = stat("file", 1, 1);
        assert_eq!(normalize_at("a", &raw, 42).timestamp, 42);

        raw.mtime = Some(1_600_000_000);
        assert_eq!(normalize_at("a", &raw, 42).timestamp, 1_600_000_000);
    }

    #[test]
    fn test_visibility_from_low_octal_digit() {
        let mut raw = stat("file", 1, 1);
        assert_eq!(normalize_at("a", &raw, 0).visibility, Visibility::Private);

        raw.mode = Some(Mode::Octal("0644".into()));
        assert_eq!(normalize_at("a", &raw, 0).visibility, Visibility::Public);

        raw.mode = Some(Mode::Octal("0640".into()));
        assert_eq!(normalize_at("a", &raw, 0).visibility, Visibility::Private);

        raw.mode = Some(Mode::Bits(0o755));
        assert_eq!(normalize_at("a", &raw, 0).visibility, Visibility::Public);

        raw.mode = Some(Mode::Bits(0o700));
        assert_eq!(normalize_at("a", &raw, 0).visibility, Visibility::Private);
    }

    #[test]
    fn test_path_is_kept_verbatim() {
        let entry = normalize_at("/docs/a.md", &stat("file", 1, 1), 0);
        assert_eq!(entry.path, "/docs/a.md");
    }

    #[test]
    fn test_serialized_shape() {
        let entry = normalize_at("docs", &stat("directory", 0, 10), 7);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "dir",
                "path": "docs",
                "timestamp": 7,
                "size": 10,
                "visibility": "private"
            })
        );
    }

    #[test]
    fn test_listing_target() {
        let entry = LsEntry {
            name: "a.md".into(),
            ..Default::default()
        };
        assert_eq!(listing_target("/docs", &entry), "/docs/a.md");
        assert_eq!(listing_target("", &entry), "a.md");
    }
}
