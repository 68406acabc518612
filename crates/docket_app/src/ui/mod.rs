pub(crate) mod commands;
pub(crate) mod render;

use std::path::PathBuf;

use docket_core::Msg;

/// Message-loop items: core messages plus app-level controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppMsg {
    Core(Msg),
    /// Paths still to be stat'ed into upload handles.
    AddFiles { paths: Vec<PathBuf> },
    Help,
    Unknown { input: String },
    Quit,
}
