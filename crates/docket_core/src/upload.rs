use std::path::PathBuf;

/// A file waiting in the upload queue.
///
/// Identity for deduplication is the (name, size, modified) triple; `path`
/// is where the bytes are read from at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    /// Last modification time, milliseconds since the Unix epoch.
    pub modified_ms: u64,
    pub path: PathBuf,
}

impl FileHandle {
    fn same_identity(&self, other: &FileHandle) -> bool {
        self.name == other.name && self.size == other.size && self.modified_ms == other.modified_ms
    }
}

/// Ordered set of files pending upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadQueue {
    files: Vec<FileHandle>,
}

impl UploadQueue {
    /// Appends `file` unless an identical (name, size, modified) entry is
    /// already queued. Returns whether the file was added.
    pub(crate) fn add(&mut self, file: FileHandle) -> bool {
        if self.files.iter().any(|queued| queued.same_identity(&file)) {
            return false;
        }
        self.files.push(file);
        true
    }

    /// Removes the entry at `index`; out of range is a no-op.
    pub(crate) fn remove(&mut self, index: usize) -> Option<FileHandle> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub(crate) fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Upload category; the server routes each kind to its own subfolder of
/// the target record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadKind {
    #[default]
    General,
    Expenses,
}

impl UploadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Expenses => "expenses",
        }
    }
}

/// Optional metadata attached to expense uploads; the server uses it to
/// build the stored filename.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseDetails {
    pub label: String,
    /// ISO date, `YYYY-MM-DD`; empty means not provided.
    pub due_date: String,
}

impl ExpenseDetails {
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.due_date.is_empty()
    }
}

/// Shape check for a `YYYY-MM-DD` field. Calendar validity is the
/// server's concern.
pub(crate) fn is_iso_date(text: &str) -> bool {
    let mut parts = text.split('-');
    let widths = [4usize, 2, 2];
    for width in widths {
        let Some(part) = parts.next() else {
            return false;
        };
        if part.len() != width || !part.chars().all(|ch| ch.is_ascii_digit()) {
            return false;
        }
    }
    parts.next().is_none()
}

/// A submitted batch, snapshotted at submit time so that a confirmed
/// resubmission carries the exact same file set even if the queue was
/// edited in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBatch {
    pub target: String,
    pub kind: UploadKind,
    pub expense: ExpenseDetails,
    pub files: Vec<FileHandle>,
}

/// Where the submit/confirm protocol currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    /// No batch in flight.
    #[default]
    Idle,
    /// A request is on the wire.
    InFlight { batch: PendingBatch },
    /// The server reported name collisions and stored nothing; waiting for
    /// the user to allow a forced rename or give up.
    AwaitingRenameConfirm {
        batch: PendingBatch,
        existing: Vec<String>,
    },
}
