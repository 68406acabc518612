//! Docket core: pure state machine and view-model helpers.
mod effect;
mod filter;
mod msg;
mod record;
mod state;
mod table;
mod update;
mod upload;
mod view_model;

pub use effect::Effect;
pub use filter::{FilterError, FilterField, FilterSet};
pub use msg::{BatchOutcome, FolderOpenError, Msg};
pub use record::{ProcessRecord, SortColumn};
pub use state::{AppState, Notice, NoticeKind};
pub use table::{PageState, SortState, DEFAULT_PAGE_SIZE};
pub use upload::{
    ExpenseDetails, FileHandle, PendingBatch, SubmitPhase, UploadKind, UploadQueue,
};
pub use view_model::{
    AppViewModel, LastAddStats, QueueRowView, RecordRowView, RenamePromptView,
};
