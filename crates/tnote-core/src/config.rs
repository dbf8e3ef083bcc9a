//! Store configuration.
//!
//! The note root and the editor are resolved once, at the edge of the
//! program, and handed to the store as a plain value. Nothing below the
//! CLI reads the process environment.

use std::path::{Path, PathBuf};

use crate::error::NoteError;

/// Editor used when none is configured.
pub const DEFAULT_EDITOR: &str = "vi";

/// Location of the note root relative to the user's home directory.
pub const DEFAULT_ROOT_SEGMENTS: &[&str] = &["Documents", "notes"];

/// Resolved configuration for a note store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory that holds every note.
    pub root: PathBuf,
    /// Editor command line, e.g. `vim` or `code --wait`.
    pub editor: String,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>, editor: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            editor: editor.into(),
        }
    }

    /// Resolve the configuration against the current user's home directory.
    ///
    /// An explicit `root` wins over `<home>/Documents/notes`. A missing or
    /// blank `editor` falls back to [`DEFAULT_EDITOR`].
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::NoHome`] if no root was given and the home
    /// directory cannot be determined.
    pub fn resolve(root: Option<PathBuf>, editor: Option<String>) -> Result<Self, NoteError> {
        Self::resolve_with_home(dirs::home_dir().as_deref(), root, editor)
    }

    /// Same as [`StoreConfig::resolve`] with an explicit home directory.
    pub fn resolve_with_home(
        home: Option<&Path>,
        root: Option<PathBuf>,
        editor: Option<String>,
    ) -> Result<Self, NoteError> {
        let root = match root {
            Some(root) => root,
            None => default_root(home.ok_or(NoteError::NoHome)?),
        };

        let editor = editor
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        Ok(Self { root, editor })
    }
}

/// `<home>/Documents/notes`.
pub fn default_root(home: &Path) -> PathBuf {
    DEFAULT_ROOT_SEGMENTS
        .iter()
        .fold(home.to_path_buf(), |path, segment| path.join(segment))
}
