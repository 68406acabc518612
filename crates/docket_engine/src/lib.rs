//! Docket engine: the HTTP boundary to the archive service.
mod client;
mod engine;
mod types;

pub use client::{ApiSettings, ArchiveApi, ReqwestArchiveApi};
pub use engine::{ApiCommand, ApiHandle};
pub use types::{
    ApiError, ApiEvent, BatchOutcome, BatchRequest, ProcessRecord, SearchQuery, UploadFile,
};
