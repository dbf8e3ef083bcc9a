//! The note store: every note is a `.md` file somewhere under one root
//! directory.
//!
//! The store keeps no state besides its configuration. Each operation goes
//! back to the file system, so external edits are always visible.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use tnote_core::error::NoteError;
use tnote_core::{NoteId, StoreConfig};

use crate::launcher::{Launcher, ProcessLauncher};

/// Manages the notes under a single root directory.
#[derive(Debug)]
pub struct NoteStore<L = ProcessLauncher> {
    root: PathBuf,
    editor: String,
    launcher: L,
}

impl NoteStore<ProcessLauncher> {
    /// Open a store that launches the editor as a real child process.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if the root directory cannot be created.
    pub fn open(config: StoreConfig) -> Result<Self, NoteError> {
        Self::with_launcher(config, ProcessLauncher)
    }
}

impl<L: Launcher> NoteStore<L> {
    /// Open a store with a custom editor launcher.
    ///
    /// Creates the root directory (and its parents) if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if the root directory cannot be created.
    pub fn with_launcher(config: StoreConfig, launcher: L) -> Result<Self, NoteError> {
        fs::create_dir_all(&config.root)?;
        debug!(root = %config.root.display(), "opened note store");
        Ok(Self {
            root: config.root,
            editor: config.editor,
            launcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// File path a note ID maps to. The file need not exist.
    pub fn path_of(&self, id: &NoteId) -> PathBuf {
        id.resolve(&self.root)
    }

    /// List every note under the root, sorted ascending.
    ///
    /// Only regular files whose name ends in `.md` count as notes; one
    /// extension is stripped, so `a.md.md` lists as `a.md`.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Walk`] if any part of the tree cannot be read.
    pub fn list(&self) -> Result<Vec<NoteId>, NoteError> {
        let mut ids = Vec::new();

        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| NoteError::Walk(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if let Some(id) = NoteId::from_relative_path(relative) {
                ids.push(id);
            }
        }

        ids.sort();
        debug!(count = ids.len(), "listed notes");
        Ok(ids)
    }

    /// Whether anything exists at the note's path.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] for any stat failure other than "not found".
    pub fn exists(&self, id: &NoteId) -> Result<bool, NoteError> {
        match fs::metadata(self.path_of(id)) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Create a note containing a single heading line.
    ///
    /// Missing parent folders are created. An existing note is never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Duplicate`] if the note already exists, or
    /// [`NoteError::Io`] if a folder or the file cannot be created.
    pub fn create(&self, id: &NoteId) -> Result<PathBuf, NoteError> {
        if self.exists(id)? {
            return Err(NoteError::Duplicate(id.clone()));
        }

        let path = self.path_of(id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(NoteError::Duplicate(id.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(placeholder(id).as_bytes())?;

        info!(note = %id, path = %path.display(), "created note");
        Ok(path)
    }

    /// Delete a note's file. Folders are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::NotFound`] if there is no such note, or
    /// [`NoteError::Io`] if the file cannot be removed.
    pub fn remove(&self, id: &NoteId) -> Result<(), NoteError> {
        let path = self.path_of(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(note = %id, "removed note");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(NoteError::NotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    /// Open a note in the editor and block until the editor exits.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::NotFound`] if the note does not exist, or
    /// [`NoteError::Editor`] if the editor cannot be started or exits
    /// unsuccessfully.
    pub fn edit(&self, id: &NoteId) -> Result<(), NoteError> {
        if !self.exists(id)? {
            return Err(NoteError::NotFound(id.clone()));
        }

        let path = self.path_of(id);
        info!(note = %id, editor = %self.editor, "opening editor");
        let state = self
            .launcher
            .launch(&self.editor, &path)
            .map_err(|e| NoteError::editor(&self.editor, e.to_string()))?;

        if !state.success {
            return Err(NoteError::editor(&self.editor, state.describe()));
        }
        Ok(())
    }
}

/// Initial content of a freshly created note.
pub fn placeholder(id: &NoteId) -> String {
    format!("# {}\n", id.title())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    use proptest::prelude::*;
    use tempfile::TempDir;

    use crate::launcher::ExitState;

    /// Records launches instead of spawning processes.
    #[derive(Default)]
    struct FakeLauncher {
        calls: RefCell<Vec<(String, PathBuf)>>,
        exit: Option<ExitState>,
        spawn_error: bool,
    }

    impl Launcher for FakeLauncher {
        fn launch(&self, editor: &str, path: &Path) -> io::Result<ExitState> {
            self.calls
                .borrow_mut()
                .push((editor.to_string(), path.to_path_buf()));
            if self.spawn_error {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
            }
            Ok(self.exit.unwrap_or_else(ExitState::ok))
        }
    }

    fn store_with(launcher: FakeLauncher) -> (NoteStore<FakeLauncher>, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("notes"), "fake-editor");
        let store = NoteStore::with_launcher(config, launcher).unwrap();
        (store, dir)
    }

    fn store() -> (NoteStore<FakeLauncher>, TempDir) {
        store_with(FakeLauncher::default())
    }

    fn id(raw: &str) -> NoteId {
        NoteId::parse(raw).unwrap()
    }

    fn touch(root: &Path, files: &[&str]) {
        for name in files {
            let path = root.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn listed(store: &NoteStore<FakeLauncher>) -> Vec<String> {
        store
            .list()
            .unwrap()
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect()
    }

    // === Construction ===

    #[test]
    fn open_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Documents").join("notes");
        let store = NoteStore::open(StoreConfig::new(&root, "vi")).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root);
    }

    #[test]
    fn open_accepts_existing_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), &["keep.md"]);
        let store = NoteStore::open(StoreConfig::new(dir.path(), "vi")).unwrap();
        assert_eq!(store.list().unwrap(), vec![id("keep")]);
    }

    // === List ===

    #[test]
    fn list_simple_files_sorted() {
        let (store, _dir) = store();
        touch(store.root(), &["b.md", "a.md"]);
        assert_eq!(listed(&store), vec!["a", "b"]);
    }

    #[test]
    fn list_keeps_dashes_and_underscores() {
        let (store, _dir) = store();
        touch(
            store.root(),
            &["file-with-dash.md", "file_with_underscore.md"],
        );
        assert_eq!(
            listed(&store),
            vec!["file-with-dash", "file_with_underscore"]
        );
    }

    #[test]
    fn list_strips_only_one_extension() {
        let (store, _dir) = store();
        touch(store.root(), &["file_with_two_mds.md.md"]);
        assert_eq!(listed(&store), vec!["file_with_two_mds.md"]);
    }

    #[test]
    fn list_includes_nested_folders() {
        let (store, _dir) = store();
        touch(store.root(), &["folder/file1.md", "file2.md", "a/b/c.md"]);
        assert_eq!(listed(&store), vec!["a/b/c", "file2", "folder/file1"]);
    }

    #[test]
    fn list_ignores_other_files_and_md_directories() {
        let (store, _dir) = store();
        touch(store.root(), &["notes.txt", "dir.md/inner.txt", "real.md"]);
        assert_eq!(listed(&store), vec!["real"]);
    }

    #[test]
    fn list_empty_root() {
        let (store, _dir) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn list_fails_on_unreadable_folder() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _dir) = store();
        touch(store.root(), &["locked/secret.md"]);
        let locked = store.root().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let readable = fs::read_dir(&locked).is_ok(); // root ignores permissions
        let result = store.list();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert!(matches!(result, Err(NoteError::Walk(_))));
        }
    }

    // === Exists ===

    #[test]
    fn exists_for_present_note() {
        let (store, _dir) = store();
        touch(store.root(), &["file.md"]);
        assert!(store.exists(&id("file")).unwrap());
    }

    #[test]
    fn exists_false_for_missing_note() {
        let (store, _dir) = store();
        touch(store.root(), &["file.md"]);
        assert!(!store.exists(&id("none_existing_note")).unwrap());
    }

    #[test]
    fn exists_false_when_extension_is_given() {
        let (store, _dir) = store();
        touch(store.root(), &["file.md"]);
        assert!(!store.exists(&id("file.md")).unwrap());
    }

    // === Create ===

    #[test]
    fn create_simple_note() {
        let (store, _dir) = store();
        let path = store.create(&id("file")).unwrap();
        assert_eq!(path, store.root().join("file.md"));
        assert_eq!(entries(store.root()), vec!["file.md"]);
        assert!(store.exists(&id("file")).unwrap());
    }

    #[test]
    fn create_doubles_existing_extension() {
        let (store, _dir) = store();
        store.create(&id("file.md")).unwrap();
        assert_eq!(entries(store.root()), vec!["file.md.md"]);
    }

    #[test]
    fn create_nested_note_with_placeholder() {
        let (store, _dir) = store();
        store.create(&id("foo/bar")).unwrap();

        assert_eq!(listed(&store), vec!["foo/bar"]);
        let content = fs::read_to_string(store.root().join("foo").join("bar.md")).unwrap();
        assert_eq!(content, "# bar\n");
    }

    #[test]
    fn create_rejects_duplicate_and_keeps_content() {
        let (store, _dir) = store();
        let path = store.root().join("file.md");
        fs::write(&path, "precious").unwrap();

        let err = store.create(&id("file")).unwrap_err();
        assert!(matches!(err, NoteError::Duplicate(ref dup) if dup.as_str() == "file"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "precious");
        assert_eq!(entries(store.root()), vec!["file.md"]);
    }

    // === Remove ===

    #[test]
    fn remove_deletes_only_that_note() {
        let (store, _dir) = store();
        touch(store.root(), &["file.md", "file_.md", "extrafile.md"]);
        store.remove(&id("file")).unwrap();
        assert_eq!(entries(store.root()), vec!["extrafile.md", "file_.md"]);
    }

    #[test]
    fn remove_missing_note_fails_without_changes() {
        let (store, _dir) = store();
        touch(store.root(), &["extrafile.md"]);
        let err = store.remove(&id("file")).unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));
        assert_eq!(entries(store.root()), vec!["extrafile.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn exists_propagates_stat_errors_other_than_missing() {
        let (store, _dir) = store();
        touch(store.root(), &["file.md"]);
        // `file.md` is a regular file, so `file.md/x.md` fails with ENOTDIR.
        let err = store.exists(&id("file.md/x")).unwrap_err();
        assert!(matches!(err, NoteError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn remove_directory_is_io_error() {
        let (store, _dir) = store();
        fs::create_dir(store.root().join("d.md")).unwrap();
        let err = store.remove(&id("d")).unwrap_err();
        assert!(matches!(err, NoteError::Io(_)));
        assert!(store.root().join("d.md").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn create_under_file_parent_is_io_error() {
        let (store, _dir) = store();
        touch(store.root(), &["file.md"]);
        let err = store.create(&id("file.md/child")).unwrap_err();
        assert!(matches!(err, NoteError::Io(_)));
        assert_eq!(entries(store.root()), vec!["file.md"]);
    }

    #[test]
    fn create_then_remove_restores_file_set() {
        let (store, _dir) = store();
        touch(store.root(), &["keep.md"]);
        let before = store.list().unwrap();

        store.create(&id("tmp/scratch")).unwrap();
        store.remove(&id("tmp/scratch")).unwrap();

        assert_eq!(store.list().unwrap(), before);
        assert!(store.root().join("tmp").is_dir());
    }

    // === Edit ===

    #[test]
    fn edit_launches_editor_with_note_path() {
        let (store, _dir) = store();
        store.create(&id("daily/today")).unwrap();
        store.edit(&id("daily/today")).unwrap();

        let calls = store.launcher().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "fake-editor");
        assert_eq!(calls[0].1, store.root().join("daily").join("today.md"));
    }

    #[test]
    fn edit_missing_note_does_not_launch() {
        let (store, _dir) = store();
        let err = store.edit(&id("ghost")).unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));
        assert!(store.launcher().calls.borrow().is_empty());
    }

    #[test]
    fn edit_surfaces_nonzero_exit() {
        let (store, _dir) = store_with(FakeLauncher {
            exit: Some(ExitState::failed(3)),
            ..Default::default()
        });
        store.create(&id("n")).unwrap();
        let err = store.edit(&id("n")).unwrap_err();
        match err {
            NoteError::Editor { editor, reason } => {
                assert_eq!(editor, "fake-editor");
                assert!(reason.contains('3'));
            }
            other => panic!("Expected Editor error, got {other:?}"),
        }
    }

    #[test]
    fn edit_surfaces_spawn_failure() {
        let (store, _dir) = store_with(FakeLauncher {
            spawn_error: true,
            ..Default::default()
        });
        store.create(&id("n")).unwrap();
        assert!(matches!(
            store.edit(&id("n")),
            Err(NoteError::Editor { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn list_returns_exactly_created_ids_sorted(
            raw in proptest::collection::btree_set("[a-z]{1,6}(/[a-z]{1,6})?", 0..8)
        ) {
            let (store, _dir) = store();
            // A folder and a note may share a name (`a` and `a/b`); both are valid.
            let mut created = BTreeSet::new();
            for r in &raw {
                let note = id(r);
                if store.create(&note).is_ok() {
                    created.insert(note);
                }
            }

            let listed = store.list().unwrap();
            let expected: Vec<NoteId> = created.into_iter().collect();
            prop_assert_eq!(&listed, &expected);
            prop_assert_eq!(store.list().unwrap(), listed);
        }
    }
}
