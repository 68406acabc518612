use crate::{FilterSet, PendingBatch};

/// Side effects requested by `update`, to be run by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue a search; `seq` tags the request so a stale reply can be
    /// recognized and dropped.
    Search { seq: u64, filters: FilterSet },
    /// Load the client list for the filter dropdown.
    FetchClients,
    /// Ask the server to open a record's folder.
    OpenFolder { path: String },
    /// Upload a snapshotted batch of files against its target record.
    SubmitBatch {
        batch: PendingBatch,
        force_rename: bool,
    },
}
