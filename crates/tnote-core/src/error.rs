//! Error types for tnote.

use thiserror::Error;

use crate::note_id::NoteId;

/// Top-level result type for tnote operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Top-level error type for tnote.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid note id: {0}")]
    InvalidId(String),

    #[error("note \"{0}\" does not exist")]
    NotFound(NoteId),

    #[error("cannot create duplicate note \"{0}\"")]
    Duplicate(NoteId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot walk note directory: {0}")]
    Walk(String),

    #[error("editor '{editor}' failed: {reason}")]
    Editor { editor: String, reason: String },

    #[error("cannot determine the home directory; set TNOTE_ROOT or pass --root")]
    NoHome,
}

impl NoteError {
    /// Shorthand for an [`NoteError::Editor`] error.
    pub fn editor(editor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Editor {
            editor: editor.into(),
            reason: reason.into(),
        }
    }
}
