use crate::{FilterSet, Notice, SortState};

/// Render-ready projection of the application state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub filters: FilterSet,
    pub clients: Vec<String>,
    pub loading: bool,
    /// The visible page slice, in display order.
    pub rows: Vec<RecordRowView>,
    pub total_count: usize,
    pub current_page: usize,
    pub last_page: usize,
    pub page_size: usize,
    pub can_prev: bool,
    pub can_next: bool,
    pub sort: SortState,
    pub selection: Option<String>,
    /// The upload panel shows iff a record is selected.
    pub upload_panel_visible: bool,
    pub queue: Vec<QueueRowView>,
    pub last_add_stats: Option<LastAddStats>,
    pub rename_prompt: Option<RenamePromptView>,
    pub submit_in_flight: bool,
    pub notice: Option<Notice>,
    /// Path whose folder-open request is in flight; disables that action.
    pub opening_path: Option<String>,
}

impl AppViewModel {
    /// Human-readable pagination summary; the page count never reads zero.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.last_page)
    }
}

/// One visible results row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRowView {
    pub number: String,
    pub client: String,
    pub area: String,
    pub service: String,
    pub year: String,
    pub reference: String,
    pub path: String,
    pub selected: bool,
}

/// One queued upload row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRowView {
    pub name: String,
    pub size: u64,
}

/// Outcome of the most recent file add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LastAddStats {
    pub added: usize,
    pub skipped: usize,
}

/// Pending rename confirmation, shown until answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePromptView {
    /// Filenames the server reported as already present.
    pub existing: Vec<String>,
    pub file_count: usize,
}
