//! The classifier session: one root directory, a queue of images still to
//! sort, and a single level of undo.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::config::{LabelMode, SorterConfig};
use crate::error::SorterError;
use crate::is_supported_image;
use crate::label::{DieType, Label};
use crate::storage::{DirectoryAccess, EntryKind, FsDirectory};

/// User-selected directory being sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDirectory {
    pub path: PathBuf,
    /// Shown in the UI; last component of `path`.
    pub name: String,
}

impl RootDirectory {
    fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

/// Handle to a single image awaiting classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub dir: PathBuf,
    pub name: String,
}

impl ImageEntry {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// The most recent classification, kept so it can be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastAction {
    pub entry: ImageEntry,
    pub label: Label,
    pub original_dir: PathBuf,
}

pub struct ClassifierSession<S = FsDirectory> {
    storage: S,
    mode: LabelMode,
    root: Option<RootDirectory>,
    queue: VecDeque<ImageEntry>,
    current: Option<ImageEntry>,
    preview: Option<Vec<u8>>,
    last_action: Option<LastAction>,
    die_type: Option<DieType>,
}

impl ClassifierSession<FsDirectory> {
    pub fn from_config(cfg: &SorterConfig) -> Self {
        Self::with_storage(FsDirectory, cfg)
    }
}

impl<S: DirectoryAccess> ClassifierSession<S> {
    pub fn with_storage(storage: S, cfg: &SorterConfig) -> Self {
        let die_type = match cfg.mode {
            LabelMode::Fixed => DieType::new(cfg.fixed_sides).ok(),
            LabelMode::DieSelect => None,
        };
        Self {
            storage,
            mode: cfg.mode,
            root: None,
            queue: VecDeque::new(),
            current: None,
            preview: None,
            last_action: None,
            die_type,
        }
    }

    /// Replaces the root directory with the one `pick` returns and reloads the queue.
    ///
    /// `pick` is the folder dialog and returns `None` when the user cancels.
    /// Nothing changes if the dialog is cancelled or the directory cannot be
    /// listed. A successful selection drops any pending undo, which would
    /// point into the previous directory.
    pub fn select_directory<P>(&mut self, pick: P) -> Result<(), SorterError>
    where
        P: FnOnce() -> Option<PathBuf>,
    {
        let path = pick().ok_or(SorterError::SelectionCancelled)?;
        let queue = scan_images(&self.storage, &path)?;
        tracing::info!(
            "selected {} with {} uncategorized images",
            path.display(),
            queue.len()
        );

        self.root = Some(RootDirectory::new(path));
        self.queue = queue;
        self.last_action = None;
        self.show_next_image();
        Ok(())
    }

    /// Rebuilds the queue from the root directory's immediate children.
    ///
    /// Originals of images classified earlier are still in the root, so they
    /// are offered again.
    pub fn load_uncategorized_images(&mut self) -> Result<(), SorterError> {
        let root = self.root.as_ref().ok_or(SorterError::NoDirectory)?;
        self.queue = scan_images(&self.storage, &root.path)?;
        self.show_next_image();
        Ok(())
    }

    /// Makes the queue head the current image and reads its bytes for display.
    ///
    /// An unreadable head still becomes the current image, just without a
    /// preview.
    pub fn show_next_image(&mut self) {
        self.preview = None;
        self.current = self.queue.front().cloned();
        if let Some(entry) = &self.current {
            match self.storage.read_file(&entry.dir, &entry.name) {
                Ok(bytes) => self.preview = Some(bytes),
                Err(e) => tracing::warn!("no preview for {}: {e}", entry.name),
            }
        }
    }

    /// Copies the current image into `<root>/<label>/` and advances the queue.
    ///
    /// The original stays in the root directory. Does nothing without a
    /// current image.
    pub fn classify_image(&mut self, label: Label) -> Result<(), SorterError> {
        let Some(entry) = self.current.clone() else {
            return Ok(());
        };
        if !self.labels().contains(&label) {
            return Err(SorterError::UnknownLabel(label));
        }
        let root = self.root.as_ref().ok_or(SorterError::NoDirectory)?;
        let original_dir = root.path.clone();

        let target = self.storage.directory(&original_dir, &label.dir_name())?;
        let bytes = self.storage.read_file(&entry.dir, &entry.name)?;
        self.storage.write_file(&target, &entry.name, &bytes)?;
        tracing::info!("classified {} as {}", entry.name, label);

        self.last_action = Some(LastAction {
            entry,
            label,
            original_dir,
        });
        self.queue.pop_front();
        self.show_next_image();
        Ok(())
    }

    /// Restores the last classified image to the root and puts it back at the head of the queue.
    ///
    /// The copy in the label directory is left in place. Does nothing when
    /// there is no action to undo.
    pub fn undo_last_action(&mut self) -> Result<(), SorterError> {
        let Some(action) = &self.last_action else {
            return Ok(());
        };
        let classified = action.original_dir.join(action.label.dir_name());
        let bytes = self.storage.read_file(&classified, &action.entry.name)?;
        self.storage
            .write_file(&action.original_dir, &action.entry.name, &bytes)?;

        if let Some(action) = self.last_action.take() {
            tracing::info!("undid {} as {}", action.entry.name, action.label);
            self.queue.push_front(action.entry);
        }
        self.show_next_image();
        Ok(())
    }

    /// Sets the die being sorted, which determines the offered labels.
    pub fn select_die_type(&mut self, sides: u32) -> Result<(), SorterError> {
        let die = DieType::new(sides)?;
        tracing::info!("die type set to {die}");
        self.die_type = Some(die);
        self.show_next_image();
        Ok(())
    }

    /// Labels currently offered; empty until a die type is chosen.
    pub fn labels(&self) -> Vec<Label> {
        self.die_type.map(DieType::labels).unwrap_or_default()
    }

    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    pub fn die_type(&self) -> Option<DieType> {
        self.die_type
    }

    pub fn root(&self) -> Option<&RootDirectory> {
        self.root.as_ref()
    }

    pub fn queue(&self) -> &VecDeque<ImageEntry> {
        &self.queue
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn current_image(&self) -> Option<&ImageEntry> {
        self.current.as_ref()
    }

    /// Bytes of the current image, if they could be read.
    pub fn preview(&self) -> Option<&[u8]> {
        self.preview.as_deref()
    }

    pub fn last_action(&self) -> Option<&LastAction> {
        self.last_action.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.last_action.is_some()
    }
}

fn scan_images<S: DirectoryAccess>(
    storage: &S,
    dir: &Path,
) -> Result<VecDeque<ImageEntry>, SorterError> {
    let queue = storage
        .entries(dir)?
        .into_iter()
        .filter(|e| e.kind == EntryKind::File && is_supported_image(&e.name))
        .map(|e| ImageEntry {
            dir: dir.to_path_buf(),
            name: e.name,
        })
        .collect();
    Ok(queue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::DirEntry;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::io;

    /// In-memory directory tree with a switch to make writes fail.
    #[derive(Default)]
    struct MemoryDirectory {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
        order: Vec<String>,
        fail_writes: Cell<bool>,
    }

    impl MemoryDirectory {
        fn with_files(root: &Path, names: &[&str]) -> Self {
            let files = names
                .iter()
                .map(|n| (root.join(n), n.as_bytes().to_vec()))
                .collect();
            Self {
                files: RefCell::new(files),
                order: names.iter().map(|n| n.to_string()).collect(),
                fail_writes: Cell::new(false),
            }
        }
    }

    impl DirectoryAccess for MemoryDirectory {
        fn entries(&self, _dir: &Path) -> Result<Vec<DirEntry>, StorageError> {
            Ok(self
                .order
                .iter()
                .map(|n| DirEntry {
                    name: n.clone(),
                    kind: EntryKind::File,
                })
                .collect())
        }

        fn read_file(&self, dir: &Path, name: &str) -> Result<Vec<u8>, StorageError> {
            let path = dir.join(name);
            self.files.borrow().get(&path).cloned().ok_or_else(|| {
                StorageError::io("read", path, io::Error::from(io::ErrorKind::NotFound))
            })
        }

        fn directory(&self, parent: &Path, name: &str) -> Result<PathBuf, StorageError> {
            Ok(parent.join(name))
        }

        fn write_file(&self, dir: &Path, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
            let path = dir.join(name);
            if self.fail_writes.get() {
                return Err(StorageError::io(
                    "write",
                    path,
                    io::Error::from(io::ErrorKind::PermissionDenied),
                ));
            }
            self.files.borrow_mut().insert(path, bytes.to_vec());
            Ok(())
        }
    }

    fn names<S: DirectoryAccess>(session: &ClassifierSession<S>) -> Vec<String> {
        session.queue().iter().map(|e| e.name.clone()).collect()
    }

    fn session(names: &[&str]) -> ClassifierSession<MemoryDirectory> {
        let root = PathBuf::from("/rolls");
        let storage = MemoryDirectory::with_files(&root, names);
        let mut session = ClassifierSession::with_storage(storage, &SorterConfig::default());
        session.select_die_type(6).unwrap();
        session.select_directory(|| Some(root.clone())).unwrap();
        session
    }

    #[test]
    fn queue_keeps_enumeration_order() {
        let s = session(&["c.png", "a.png", "b.png"]);
        assert_eq!(names(&s), vec!["c.png", "a.png", "b.png"]);
        assert_eq!(s.current_image().map(|e| e.name.as_str()), Some("c.png"));
        assert_eq!(s.preview(), Some(&b"c.png"[..]));
    }

    #[test]
    fn failed_copy_leaves_state_untouched() {
        let mut s = session(&["a.png", "b.png"]);
        s.classify_image(Label::Face(1)).unwrap();
        let before_queue = names(&s);
        let before_action = s.last_action().cloned();

        s.storage.fail_writes.set(true);
        assert!(matches!(
            s.classify_image(Label::Face(2)),
            Err(SorterError::Storage(StorageError::Io { op: "write", .. }))
        ));
        assert_eq!(names(&s), before_queue);
        assert_eq!(s.last_action().cloned(), before_action);
        assert_eq!(s.current_image().map(|e| e.name.as_str()), Some("b.png"));
    }

    #[test]
    fn unreadable_head_does_not_fail_selection() {
        let root = PathBuf::from("/rolls");
        let storage = MemoryDirectory::with_files(&root, &["bad.png", "ok.png"]);
        storage.files.borrow_mut().remove(&root.join("bad.png"));
        let mut s = ClassifierSession::with_storage(storage, &SorterConfig::default());

        s.select_directory(|| Some(root.clone())).unwrap();

        assert_eq!(s.root().map(|r| r.name.as_str()), Some("rolls"));
        assert_eq!(names(&s), vec!["bad.png", "ok.png"]);
        assert_eq!(s.current_image().map(|e| e.name.as_str()), Some("bad.png"));
        assert!(s.preview().is_none());
    }

    #[test]
    fn unreadable_next_head_does_not_fail_classification() {
        let mut s = session(&["a.png", "bad.png"]);
        s.storage
            .files
            .borrow_mut()
            .remove(&PathBuf::from("/rolls/bad.png"));

        s.classify_image(Label::Face(2)).unwrap();

        assert!(s.can_undo());
        assert_eq!(names(&s), vec!["bad.png"]);
        assert_eq!(s.current_image().map(|e| e.name.as_str()), Some("bad.png"));
        assert!(s.preview().is_none());

        s.undo_last_action().unwrap();
        assert_eq!(s.current_image().map(|e| e.name.as_str()), Some("a.png"));
        assert_eq!(s.preview(), Some(&b"a.png"[..]));
    }

    #[test]
    fn failed_undo_keeps_last_action() {
        let mut s = session(&["a.png", "b.png"]);
        s.classify_image(Label::Invalid).unwrap();
        s.storage.fail_writes.set(true);

        assert!(s.undo_last_action().is_err());
        assert!(s.can_undo());
        assert_eq!(names(&s), vec!["b.png"]);
    }

    #[test]
    fn label_outside_die_is_rejected() {
        let mut s = session(&["a.png"]);
        assert!(matches!(
            s.classify_image(Label::Face(7)),
            Err(SorterError::UnknownLabel(Label::Face(7)))
        ));
        assert_eq!(names(&s), vec!["a.png"]);
        assert!(!s.can_undo());
    }

    #[test]
    fn cancelled_selection_changes_nothing() {
        let mut s = session(&["a.png", "b.png"]);
        s.classify_image(Label::Face(3)).unwrap();

        let err = s.select_directory(|| None).unwrap_err();
        assert!(matches!(err, SorterError::SelectionCancelled));
        assert_eq!(s.root().map(|r| r.name.as_str()), Some("rolls"));
        assert_eq!(names(&s), vec!["b.png"]);
        assert!(s.can_undo());
    }

    #[test]
    fn reselecting_clears_undo() {
        let mut s = session(&["a.png", "b.png"]);
        s.classify_image(Label::Face(3)).unwrap();
        s.select_directory(|| Some(PathBuf::from("/rolls"))).unwrap();
        assert!(!s.can_undo());
        assert_eq!(names(&s), vec!["a.png", "b.png"]);
    }

    #[test]
    fn reload_without_directory_fails() {
        let storage = MemoryDirectory::default();
        let mut s = ClassifierSession::with_storage(storage, &SorterConfig::default());
        assert!(matches!(
            s.load_uncategorized_images(),
            Err(SorterError::NoDirectory)
        ));
    }

    #[test]
    fn fixed_mode_offers_labels_up_front() {
        let cfg = SorterConfig {
            mode: LabelMode::Fixed,
            fixed_sides: 4,
            ..SorterConfig::default()
        };
        let s = ClassifierSession::with_storage(MemoryDirectory::default(), &cfg);
        assert_eq!(s.die_type().map(DieType::sides), Some(4));
        assert_eq!(s.labels().len(), 5);
    }
}
