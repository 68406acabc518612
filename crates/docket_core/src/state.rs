use crate::record::compare_records;
use crate::upload::is_iso_date;
use crate::view_model::{
    AppViewModel, LastAddStats, QueueRowView, RecordRowView, RenamePromptView,
};
use crate::{
    ExpenseDetails, FileHandle, FilterField, FilterSet, FolderOpenError, PageState, PendingBatch,
    ProcessRecord, SortColumn, SortState, SubmitPhase, UploadKind, UploadQueue,
};

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// One-line user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// The whole client-side application state.
///
/// Mutation happens only through `update`; the platform layer reads a
/// render-ready projection via `view` and the render gate via
/// `consume_dirty`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    filters: FilterSet,
    clients: Vec<String>,
    records: Vec<ProcessRecord>,
    sort: SortState,
    page: PageState,
    selection: Option<String>,
    queue: UploadQueue,
    expense: ExpenseDetails,
    submit: SubmitPhase,
    last_add_stats: Option<LastAddStats>,
    search_seq: u64,
    loading: bool,
    notice: Option<Notice>,
    opening: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub(crate) fn is_current_search(&self, seq: u64) -> bool {
        seq == self.search_seq
    }

    pub(crate) fn submit_phase(&self) -> &SubmitPhase {
        &self.submit
    }

    pub(crate) fn record_path(&self, number: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.number == number)
            .map(|record| record.path.as_str())
    }

    pub(crate) fn is_opening(&self) -> bool {
        self.opening.is_some()
    }

    pub(crate) fn restore_prefs(&mut self, page_size: usize, filters: FilterSet) {
        self.page.set_page_size(page_size);
        self.filters = filters;
        self.mark_dirty();
    }

    pub(crate) fn set_filter(&mut self, field: FilterField, value: String) {
        self.filters.set(field, value);
        self.mark_dirty();
    }

    pub(crate) fn clear_filters(&mut self) {
        self.filters = FilterSet::default();
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, text: String) {
        self.notice = Some(Notice::error(text));
        self.mark_dirty();
    }

    /// Allocates the next search sequence and enters the loading state.
    pub(crate) fn begin_search(&mut self) -> u64 {
        self.search_seq += 1;
        self.loading = true;
        self.notice = None;
        self.mark_dirty();
        self.search_seq
    }

    /// Replaces the record set wholesale; the sort state and the current
    /// page start fresh, the page size survives as a user preference.
    pub(crate) fn apply_search_results(&mut self, records: Vec<ProcessRecord>) {
        self.records = records;
        self.sort = SortState::default();
        self.page.reset();
        self.loading = false;
        self.mark_dirty();
    }

    pub(crate) fn fail_search(&mut self, message: String) {
        self.loading = false;
        self.notice = Some(Notice::error(format!("Search failed: {message}")));
        self.mark_dirty();
    }

    pub(crate) fn set_clients(&mut self, clients: Vec<String>) {
        self.clients = clients;
        self.mark_dirty();
    }

    /// Applies the column-click rules and re-sorts the records in place.
    /// The current page is kept (clamped), only a fresh search resets it.
    pub(crate) fn apply_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
        let SortState { column, reverse } = self.sort;
        self.records.sort_by(|a, b| {
            let ordering = compare_records(a, b, column);
            if reverse {
                ordering.reverse()
            } else {
                ordering
            }
        });
        self.page.clamp(self.records.len());
        self.mark_dirty();
    }

    pub(crate) fn set_page_size(&mut self, size: usize) {
        self.page.set_page_size(size);
        self.mark_dirty();
    }

    pub(crate) fn page_first(&mut self) {
        self.page.first();
        self.mark_dirty();
    }

    pub(crate) fn page_prev(&mut self) {
        self.page.prev();
        self.mark_dirty();
    }

    pub(crate) fn page_next(&mut self) {
        self.page.next(self.records.len());
        self.mark_dirty();
    }

    pub(crate) fn page_last(&mut self) {
        self.page.last(self.records.len());
        self.mark_dirty();
    }

    pub(crate) fn page_goto(&mut self, page: usize) {
        self.page.goto(page, self.records.len());
        self.mark_dirty();
    }

    pub(crate) fn toggle_selection(&mut self, number: String) {
        self.selection = if self.selection.as_deref() == Some(number.as_str()) {
            None
        } else {
            Some(number)
        };
        self.mark_dirty();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = None;
        self.mark_dirty();
    }

    pub(crate) fn add_files(&mut self, files: Vec<FileHandle>) {
        let mut stats = LastAddStats::default();
        for file in files {
            if self.queue.add(file) {
                stats.added += 1;
            } else {
                stats.skipped += 1;
            }
        }
        self.last_add_stats = Some(stats);
        self.mark_dirty();
    }

    pub(crate) fn remove_file(&mut self, index: usize) {
        if self.queue.remove(index).is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_expense_details(&mut self, label: String, due_date: String) {
        self.expense = ExpenseDetails {
            label: label.trim().to_owned(),
            due_date: due_date.trim().to_owned(),
        };
        self.mark_dirty();
    }

    /// Snapshots the current target/kind/queue into an in-flight batch, or
    /// reports why a submit cannot happen. Nothing is mutated on failure.
    pub(crate) fn begin_submit(&mut self, kind: UploadKind) -> Result<PendingBatch, String> {
        let Some(target) = self.selection.clone() else {
            return Err("select a process before submitting".into());
        };
        if self.queue.is_empty() {
            return Err("the upload queue is empty".into());
        }
        if kind == UploadKind::Expenses
            && !self.expense.due_date.is_empty()
            && !is_iso_date(&self.expense.due_date)
        {
            return Err(format!(
                "due date {:?} is not a YYYY-MM-DD date",
                self.expense.due_date
            ));
        }
        let expense = match kind {
            UploadKind::Expenses => self.expense.clone(),
            UploadKind::General => ExpenseDetails::default(),
        };
        let batch = PendingBatch {
            target,
            kind,
            expense,
            files: self.queue.files().to_vec(),
        };
        self.submit = SubmitPhase::InFlight {
            batch: batch.clone(),
        };
        self.mark_dirty();
        Ok(batch)
    }

    /// The server stored the batch; the queue is spent.
    pub(crate) fn finish_submit_success(&mut self, message: String) {
        self.queue.clear();
        self.submit = SubmitPhase::Idle;
        self.notice = Some(Notice::success(message));
        self.mark_dirty();
    }

    pub(crate) fn await_rename_confirm(&mut self, existing: Vec<String>) {
        if let SubmitPhase::InFlight { batch } = std::mem::take(&mut self.submit) {
            self.submit = SubmitPhase::AwaitingRenameConfirm { batch, existing };
        }
        self.mark_dirty();
    }

    pub(crate) fn fail_submit(&mut self, message: String) {
        self.submit = SubmitPhase::Idle;
        self.notice = Some(Notice::error(format!("Upload failed: {message}")));
        self.mark_dirty();
    }

    /// Confirmed rename: the snapshotted batch goes back on the wire.
    pub(crate) fn resume_submit(&mut self) -> Option<PendingBatch> {
        match std::mem::take(&mut self.submit) {
            SubmitPhase::AwaitingRenameConfirm { batch, .. } => {
                self.submit = SubmitPhase::InFlight {
                    batch: batch.clone(),
                };
                self.mark_dirty();
                Some(batch)
            }
            other => {
                self.submit = other;
                None
            }
        }
    }

    pub(crate) fn decline_rename(&mut self) {
        if matches!(self.submit, SubmitPhase::AwaitingRenameConfirm { .. }) {
            self.submit = SubmitPhase::Idle;
            self.notice = Some(Notice::info("upload cancelled; the queued files were kept"));
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_open(&mut self, path: String) {
        self.opening = Some(path);
        self.mark_dirty();
    }

    /// The action is re-enabled no matter how the request ended.
    pub(crate) fn finish_open(&mut self, result: Result<(), FolderOpenError>) {
        self.opening = None;
        match result {
            Ok(()) => {}
            Err(FolderOpenError::Rejected(message)) => {
                self.notice = Some(Notice::error(format!("Could not open folder: {message}")));
            }
            Err(FolderOpenError::Transport(message)) => {
                self.notice = Some(Notice::error(format!("Folder request failed: {message}")));
            }
        }
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns and clears the render flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let total = self.records.len();
        let (start, end) = self.page.bounds(total);
        let rows = self.records[start..end]
            .iter()
            .map(|record| RecordRowView {
                number: record.number.clone(),
                client: record.client.clone(),
                area: record.area.clone(),
                service: record.service.clone(),
                year: record.year.clone(),
                reference: record.reference.clone(),
                path: record.path.clone(),
                selected: self.selection.as_deref() == Some(record.number.as_str()),
            })
            .collect();
        let last_page = self.page.last_page(total);
        let rename_prompt = match &self.submit {
            SubmitPhase::AwaitingRenameConfirm { batch, existing } => Some(RenamePromptView {
                existing: existing.clone(),
                file_count: batch.files.len(),
            }),
            _ => None,
        };

        AppViewModel {
            filters: self.filters.clone(),
            clients: self.clients.clone(),
            loading: self.loading,
            rows,
            total_count: total,
            current_page: self.page.current(),
            last_page,
            page_size: self.page.page_size(),
            can_prev: self.page.current() > 1,
            can_next: self.page.current() < last_page,
            sort: self.sort,
            selection: self.selection.clone(),
            upload_panel_visible: self.selection.is_some(),
            queue: self
                .queue
                .files()
                .iter()
                .map(|file| QueueRowView {
                    name: file.name.clone(),
                    size: file.size,
                })
                .collect(),
            last_add_stats: self.last_add_stats,
            rename_prompt,
            submit_in_flight: matches!(self.submit, SubmitPhase::InFlight { .. }),
            notice: self.notice.clone(),
            opening_path: self.opening.clone(),
        }
    }
}
