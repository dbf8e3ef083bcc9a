//! # tnote-core
//!
//! Core types shared by the tnote crates:
//! - [`NoteId`] — a note identifier and its mapping onto a file path
//! - [`StoreConfig`] — the resolved note root and editor
//! - Error hierarchy ([`NoteError`], [`Result`])

pub mod config;
pub mod error;
pub mod note_id;

pub use config::StoreConfig;
pub use error::{NoteError, Result};
pub use note_id::{NoteId, NOTE_EXTENSION};
