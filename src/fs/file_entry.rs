//! src/fs/file_entry.rs
//! ============================================================================
//! # FileEntry: Classified Filesystem Entry Metadata
//!
//! Cross-platform, async-friendly record for a single file or directory
//! child, produced fresh on every enumeration call and owned transiently by
//! the caller. Carries the type-class taxonomy used by the filter pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use uuid::Uuid;

/// Taxonomy bucket assigned to a file for filtering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Folder,
    Image,
    Video,
    Document,
    Audio,
    Executable,
    Code,
    Other,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = match self {
            FileKind::Folder => "Folder",
            FileKind::Image => "Image",
            FileKind::Video => "Video",
            FileKind::Document => "Document",
            FileKind::Audio => "Audio",
            FileKind::Executable => "Executable",
            FileKind::Code => "Code",
            FileKind::Other => "Other",
        };
        write!(f, "{label}")
    }
}

impl FileKind {
    /// Extension-based taxonomy lookup. Directories always classify as
    /// `Folder` regardless of name.
    pub fn classify(extension: Option<&str>, is_dir: bool) -> FileKind {
        if is_dir {
            return FileKind::Folder;
        }
        let Some(ext) = extension else {
            return FileKind::Other;
        };
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tiff" | "heic" | "svg" | "ico" => {
                FileKind::Image
            }
            "mp4" | "mov" | "mkv" | "avi" | "webm" | "flv" | "m4v" | "wmv" => FileKind::Video,
            "txt" | "md" | "mdx" | "pdf" | "rtf" | "doc" | "docx" | "xls" | "xlsx" | "ppt"
            | "pptx" | "csv" => FileKind::Document,
            "mp3" | "wav" | "flac" | "aac" | "ogg" | "m4a" | "aiff" => FileKind::Audio,
            "exe" | "app" | "dmg" | "pkg" | "msi" | "deb" | "rpm" | "appimage" => {
                FileKind::Executable
            }
            "rs" | "c" | "h" | "cpp" | "hpp" | "py" | "js" | "jsx" | "ts" | "tsx" | "swift"
            | "java" | "kt" | "go" | "rb" | "php" | "html" | "css" | "json" | "toml" | "yaml"
            | "yml" | "sh" => FileKind::Code,
            _ => FileKind::Other,
        }
    }
}

/// Core metadata record for one directory child.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    pub id: Uuid,
    pub path: PathBuf,
    pub name: String,
    pub extension: Option<String>,
    pub kind: FileKind,
    pub is_dir: bool,
    pub is_hidden: bool,
    pub size: u64,
    pub items_count: usize, // Direct children for dirs, 0 for files
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
}

impl FileEntry {
    /// Build from path and standard metadata.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        use tokio::fs;

        let metadata: Metadata = fs::symlink_metadata(path).await?;
        let is_dir: bool = metadata.file_type().is_dir();

        let name: String = path
            .file_name()
            .map(|n: &OsStr| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from(""));

        let extension: Option<String> = path
            .extension()
            .map(|e: &OsStr| e.to_string_lossy().into_owned());

        let kind: FileKind = FileKind::classify(extension.as_deref(), is_dir);
        let is_hidden: bool = name.starts_with('.');
        let size: u64 = if is_dir { 0 } else { metadata.len() };

        // Timestamps degrade rather than fail: creation time falls back to
        // the modification time where the filesystem has no birth time, and
        // everything bottoms out at the epoch.
        let modified: DateTime<Utc> = timestamp_or_epoch(metadata.modified());
        let created: DateTime<Utc> = metadata
            .created()
            .map(DateTime::<Utc>::from)
            .unwrap_or(modified);
        let accessed: DateTime<Utc> = timestamp_or_epoch(metadata.accessed());

        Ok(Self {
            id: Uuid::new_v4(),
            path: path.to_path_buf(),
            name,
            extension,
            kind,
            is_dir,
            is_hidden,
            size,
            items_count: 0, // filled in by the background stats task
            created,
            modified,
            accessed,
        })
    }

    /// Human-friendly file size.
    pub fn size_human(&self) -> String {
        bytesize::ByteSize::b(self.size).to_string()
    }
}

fn timestamp_or_epoch(t: std::io::Result<SystemTime>) -> DateTime<Utc> {
    t.map(DateTime::<Utc>::from)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

// --- Default (empty entry, for error stubs/caching) ---
impl Default for FileEntry {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            path: PathBuf::new(),
            name: String::new(),
            extension: None,
            kind: FileKind::Other,
            is_dir: false,
            is_hidden: false,
            size: 0,
            items_count: 0,
            created: DateTime::<Utc>::UNIX_EPOCH,
            modified: DateTime::<Utc>::UNIX_EPOCH,
            accessed: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_taxonomy() {
        assert_eq!(FileKind::classify(Some("png"), false), FileKind::Image);
        assert_eq!(FileKind::classify(Some("JPG"), false), FileKind::Image);
        assert_eq!(FileKind::classify(Some("mov"), false), FileKind::Video);
        assert_eq!(FileKind::classify(Some("pdf"), false), FileKind::Document);
        assert_eq!(FileKind::classify(Some("flac"), false), FileKind::Audio);
        assert_eq!(FileKind::classify(Some("dmg"), false), FileKind::Executable);
        assert_eq!(FileKind::classify(Some("rs"), false), FileKind::Code);
        assert_eq!(FileKind::classify(Some("xyz"), false), FileKind::Other);
        assert_eq!(FileKind::classify(None, false), FileKind::Other);
        // A directory named photo.png is still a folder.
        assert_eq!(FileKind::classify(Some("png"), true), FileKind::Folder);
    }

    #[tokio::test]
    async fn from_path_classifies_and_flags_hidden() {
        let dir: tempfile::TempDir = tempfile::TempDir::new().unwrap();
        let file: PathBuf = dir.path().join(".secret.txt");
        std::fs::write(&file, b"x").unwrap();

        let entry: FileEntry = FileEntry::from_path(&file).await.unwrap();
        assert_eq!(entry.name, ".secret.txt");
        assert!(entry.is_hidden);
        assert!(!entry.is_dir);
        assert_eq!(entry.kind, FileKind::Document);
        assert_eq!(entry.size, 1);
    }

    #[tokio::test]
    async fn from_path_missing_is_error() {
        let res: std::io::Result<FileEntry> =
            FileEntry::from_path(Path::new("/no/such/entry")).await;
        assert!(res.is_err());
    }
}
