//! Note identifiers and their mapping onto files under the note root.
//!
//! A note ID is a root-relative path without the `.md` extension, e.g.
//! `work/standup`. Resolution is plain concatenation:
//!
//! ```text
//! <root>/<id>.md
//! ```
//!
//! The ID is never normalized. An ID that already ends in `.md` gets a
//! second suffix (`file.md` resolves to `file.md.md`), and listing strips
//! exactly one suffix back off, so the two directions stay inverse.

use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::NoteError;

/// File extension of every note file, including the leading dot.
pub const NOTE_EXTENSION: &str = ".md";

/// Separator used between folder segments of a note ID.
pub const ID_SEPARATOR: char = '/';

/// A user-facing note identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Build an ID from user input.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::InvalidId`] if the input is empty or only whitespace.
    pub fn parse(raw: impl Into<String>) -> Result<Self, NoteError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(NoteError::InvalidId("note id must not be empty".to_string()));
        }
        Ok(Self(raw))
    }

    /// Build an ID from positional command-line words, joined by single spaces.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::InvalidId`] if no words were given.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self, NoteError> {
        let joined = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self::parse(joined)
    }

    /// Derive the ID of a file found under the note root.
    ///
    /// `relative` is the file's path relative to the root. Returns `None`
    /// when the file name does not end with [`NOTE_EXTENSION`].
    pub fn from_relative_path(relative: &Path) -> Option<Self> {
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let (file_name, folders) = segments.split_last()?;
        let stem = file_name.strip_suffix(NOTE_EXTENSION)?;

        let mut id = String::new();
        for folder in folders {
            id.push_str(folder);
            id.push(ID_SEPARATOR);
        }
        id.push_str(stem);
        Some(Self(id))
    }

    /// Resolve the file path of this note under `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let mut path = OsString::from(root.as_os_str());
        path.push(ID_SEPARATOR.to_string());
        path.push(&self.0);
        path.push(NOTE_EXTENSION);
        PathBuf::from(path)
    }

    /// Last `/`-separated segment, used as the default note title.
    pub fn title(&self) -> &str {
        self.0.rsplit(ID_SEPARATOR).next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
