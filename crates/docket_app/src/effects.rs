use std::sync::mpsc;
use std::thread;

use docket_core::{
    BatchOutcome, Effect, FileHandle, FilterSet, FolderOpenError, Msg, PendingBatch, ProcessRecord,
};
use docket_engine::{
    ApiCommand, ApiError, ApiEvent, ApiHandle, ApiSettings, BatchRequest, SearchQuery, UploadFile,
};
use docket_logging::docket_warn;

use crate::ui::AppMsg;

/// Runs core effects against the api worker and pumps its completion
/// events back into the message loop.
pub(crate) struct EffectRunner {
    api: ApiHandle,
}

impl EffectRunner {
    pub fn start(settings: &ApiSettings, msg_tx: mpsc::Sender<AppMsg>) -> Result<Self, ApiError> {
        let (api, event_rx) = ApiHandle::start(settings)?;
        spawn_event_pump(event_rx, msg_tx);
        Ok(Self { api })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search { seq, filters } => {
                    self.api.enqueue(ApiCommand::Search {
                        seq,
                        query: map_filters(&filters),
                    });
                }
                Effect::FetchClients => self.api.enqueue(ApiCommand::FetchClients),
                Effect::OpenFolder { path } => {
                    self.api.enqueue(ApiCommand::OpenFolder { path });
                }
                Effect::SubmitBatch {
                    batch,
                    force_rename,
                } => {
                    self.api.enqueue(ApiCommand::SubmitBatch {
                        request: map_batch(&batch, force_rename),
                    });
                }
            }
        }
    }
}

fn spawn_event_pump(event_rx: mpsc::Receiver<ApiEvent>, msg_tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            let msg = match event {
                ApiEvent::SearchCompleted { seq, result } => Msg::SearchCompleted {
                    seq,
                    result: result.map(map_records).map_err(|err| err.to_string()),
                },
                ApiEvent::ClientsFetched { result } => {
                    if let Err(err) = &result {
                        docket_warn!("client list fetch failed: {}", err);
                    }
                    Msg::ClientsLoaded {
                        result: result.map_err(|err| err.to_string()),
                    }
                }
                ApiEvent::FolderOpened { result } => Msg::FolderOpened {
                    result: result.map_err(map_open_error),
                },
                ApiEvent::BatchCompleted { result } => Msg::BatchCompleted {
                    result: result.map(map_outcome).map_err(|err| err.to_string()),
                },
            };
            if msg_tx.send(AppMsg::Core(msg)).is_err() {
                break;
            }
        }
    });
}

fn map_filters(filters: &FilterSet) -> SearchQuery {
    SearchQuery {
        client: filters.client.clone(),
        number_start: filters.number_start.clone(),
        number_end: filters.number_end.clone(),
        year: filters.year.clone(),
        area: filters.area.clone(),
        service: filters.service.clone(),
        reference: filters.reference.clone(),
    }
}

fn map_records(records: Vec<docket_engine::ProcessRecord>) -> Vec<ProcessRecord> {
    records
        .into_iter()
        .map(|record| ProcessRecord {
            number: record.number,
            client: record.client,
            area: record.area,
            service: record.service,
            year: record.year,
            reference: record.reference,
            path: record.path,
        })
        .collect()
}

fn map_batch(batch: &PendingBatch, force_rename: bool) -> BatchRequest {
    BatchRequest {
        target: batch.target.clone(),
        kind: batch.kind.as_str().to_string(),
        expense_label: batch.expense.label.clone(),
        expense_due_date: batch.expense.due_date.clone(),
        files: batch.files.iter().map(map_file).collect(),
        force_rename,
    }
}

fn map_file(file: &FileHandle) -> UploadFile {
    UploadFile {
        name: file.name.clone(),
        path: file.path.clone(),
    }
}

fn map_outcome(outcome: docket_engine::BatchOutcome) -> BatchOutcome {
    match outcome {
        docket_engine::BatchOutcome::Accepted { message } => BatchOutcome::Accepted { message },
        docket_engine::BatchOutcome::Exists { files } => BatchOutcome::Exists { files },
    }
}

/// A decoded server refusal stays distinct from transport trouble; the
/// two render differently.
fn map_open_error(err: ApiError) -> FolderOpenError {
    match err {
        ApiError::Server(message) => FolderOpenError::Rejected(message),
        other => FolderOpenError::Transport(other.to_string()),
    }
}
