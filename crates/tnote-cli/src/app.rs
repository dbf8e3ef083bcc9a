//! Command dispatch, independent of argument parsing and the terminal.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use tnote_core::NoteId;
use tnote_store::{Launcher, NoteStore};

use crate::prompt::Confirm;

/// A single request against the note store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List { json: bool },
    Edit(NoteId),
    Create(NoteId),
    Remove(NoteId),
    Path(Option<NoteId>),
}

/// Execute `action`, writing normal output to `out`.
///
/// Editing a missing note asks `confirm` whether to create it first, then
/// opens the editor either way; declining therefore fails with "does not
/// exist".
pub fn run<L, C, W>(
    action: Action,
    store: &NoteStore<L>,
    confirm: &mut C,
    out: &mut W,
) -> Result<()>
where
    L: Launcher,
    C: Confirm,
    W: Write,
{
    debug!(?action, "dispatching");
    match action {
        Action::List { json } => {
            let ids = store.list().context("cannot list notes")?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &ids)?;
                writeln!(out)?;
            } else {
                for id in &ids {
                    writeln!(out, "{id}")?;
                }
            }
        }
        Action::Edit(id) => {
            if !store.exists(&id)? {
                let prompt = format!("note \"{id}\" does not exist. Create it? [y/N] ");
                if confirm.confirm(&prompt).context("cannot read answer")? {
                    store.create(&id)?;
                }
            }
            store.edit(&id)?;
        }
        Action::Create(id) => {
            let path = store.create(&id)?;
            writeln!(out, "{}", path.display())?;
        }
        Action::Remove(id) => {
            store.remove(&id)?;
        }
        Action::Path(None) => {
            writeln!(out, "{}", store.root().display())?;
        }
        Action::Path(Some(id)) => {
            writeln!(out, "{}", store.path_of(&id).display())?;
        }
    }
    Ok(())
}
