//! # tnote-store
//!
//! File system operations for the tnote note store.
//!
//! The note root is the only source of truth. Every note is a markdown
//! file below it, and every operation re-reads the file system; nothing
//! is cached between calls.

pub mod launcher;
pub mod store;

pub use launcher::{ExitState, Launcher, ProcessLauncher};
pub use store::NoteStore;
