use std::sync::{mpsc, Arc};
use std::thread;

use docket_logging::{docket_info, docket_warn};

use crate::client::{ApiSettings, ArchiveApi, ReqwestArchiveApi};
use crate::{ApiEvent, BatchRequest, SearchQuery};

/// Work items accepted by the api worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    Search { seq: u64, query: SearchQuery },
    FetchClients,
    OpenFolder { path: String },
    SubmitBatch { request: BatchRequest },
}

/// Cloneable sender half of the api worker.
///
/// A dedicated thread owns a tokio runtime; every command is spawned as an
/// independent task, so a slow upload never blocks a search. Completion
/// events arrive on the receiver returned by `start`.
#[derive(Clone)]
pub struct ApiHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
}

impl ApiHandle {
    /// Spawns the worker. Fails early when the base URL cannot be parsed.
    pub fn start(
        settings: &ApiSettings,
    ) -> Result<(Self, mpsc::Receiver<ApiEvent>), crate::ApiError> {
        let api = Arc::new(ReqwestArchiveApi::new(settings)?);
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ApiEvent>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    docket_warn!("api worker could not start a runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = run_command(api.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    /// Queues one command; dropped silently once the worker is gone.
    pub fn enqueue(&self, command: ApiCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn run_command(api: &dyn ArchiveApi, command: ApiCommand) -> ApiEvent {
    match command {
        ApiCommand::Search { seq, query } => {
            docket_info!("search seq={} params={}", seq, query.to_pairs().len());
            ApiEvent::SearchCompleted {
                seq,
                result: api.search(&query).await,
            }
        }
        ApiCommand::FetchClients => ApiEvent::ClientsFetched {
            result: api.clients().await,
        },
        ApiCommand::OpenFolder { path } => {
            docket_info!("open folder path_len={}", path.len());
            ApiEvent::FolderOpened {
                result: api.open_folder(&path).await,
            }
        }
        ApiCommand::SubmitBatch { request } => {
            docket_info!(
                "submit batch target={} files={} force_rename={}",
                request.target,
                request.files.len(),
                request.force_rename
            );
            ApiEvent::BatchCompleted {
                result: api.submit_batch(&request).await,
            }
        }
    }
}
