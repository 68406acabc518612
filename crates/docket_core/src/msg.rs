use crate::{FileHandle, FilterField, FilterSet, ProcessRecord, SortColumn, UploadKind};

/// Everything that can happen to the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// App start: load the client list and run the initial search.
    Started,
    /// Restore persisted UI preferences, normally before `Started`.
    PrefsRestored {
        page_size: usize,
        filters: FilterSet,
    },
    /// User edited one filter input.
    FilterChanged { field: FilterField, value: String },
    /// User reset all filters; a fresh search follows.
    FiltersCleared,
    /// User asked for a search with the current filters.
    SearchSubmitted,
    /// Search response or failure, tagged with the issuing sequence.
    SearchCompleted {
        seq: u64,
        result: Result<Vec<ProcessRecord>, String>,
    },
    /// Client list for the filter dropdown.
    ClientsLoaded {
        result: Result<Vec<String>, String>,
    },
    /// User clicked a column header.
    SortClicked { column: SortColumn },
    /// User picked a new page size.
    PageSizeChanged { size: usize },
    PageFirst,
    PagePrev,
    PageNext,
    PageLast,
    /// User jumped to a specific page (clamped).
    PageJumped { page: usize },
    /// User toggled a row's checkbox; single-selection semantics.
    RowToggled { number: String },
    /// User dismissed the selection.
    SelectionCleared,
    /// User dropped or picked files for upload.
    FilesAdded { files: Vec<FileHandle> },
    /// User removed one queued file by position.
    FileRemoved { index: usize },
    /// User edited the expense metadata attached to the next submit.
    ExpenseDetailsChanged { label: String, due_date: String },
    /// User pressed the submit action.
    SubmitClicked { kind: UploadKind },
    /// Upload response for the in-flight batch.
    BatchCompleted {
        result: Result<BatchOutcome, String>,
    },
    /// User allowed renaming the colliding files.
    RenameConfirmed,
    /// User declined the rename; the queue stays as it was.
    RenameDeclined,
    /// User asked to open the folder of one record.
    OpenFolderClicked { number: String },
    /// Folder-open response, success or not.
    FolderOpened {
        result: Result<(), FolderOpenError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Upload outcomes that are not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The server stored every file.
    Accepted { message: String },
    /// The server found name collisions and stored nothing.
    Exists { files: Vec<String> },
}

/// Why a folder-open request did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderOpenError {
    /// The server answered but refused the request.
    Rejected(String),
    /// The request never completed.
    Transport(String),
}
