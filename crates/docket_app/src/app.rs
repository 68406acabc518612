use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::SystemTime;

use anyhow::Context;
use clap::Parser;
use docket_core::{update, AppState, FileHandle, Msg};
use docket_engine::ApiSettings;
use docket_logging::{docket_info, docket_warn};

use crate::effects::EffectRunner;
use crate::logging::{self, LogDestination};
use crate::persistence;
use crate::ui::{self, AppMsg};

/// Terminal client for a process-archive search service.
#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "Search process records, open their folders, upload file batches")]
pub struct Options {
    /// Base URL of the archive service.
    #[arg(long, default_value = "http://127.0.0.1:8420")]
    server_url: String,

    /// Rows per page for the results table.
    #[arg(long)]
    page_size: Option<usize>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "file")]
    log: LogDestination,
}

pub fn run(options: Options) -> anyhow::Result<()> {
    logging::initialize(options.log);

    let settings = ApiSettings {
        base_url: options.server_url.clone(),
        ..ApiSettings::default()
    };

    let (msg_tx, msg_rx) = mpsc::channel::<AppMsg>();
    let runner = EffectRunner::start(&settings, msg_tx.clone())
        .with_context(|| format!("cannot use server url {:?}", options.server_url))?;
    docket_info!("connected against {}", options.server_url);

    // Persisted UI preferences feed the state before the first search.
    let prefs = persistence::load_prefs(Path::new("."));
    let page_size = options.page_size.unwrap_or(prefs.page_size);
    let mut state = AppState::new();
    state = dispatch(
        state,
        Msg::PrefsRestored {
            page_size,
            filters: prefs.filters(),
        },
        &runner,
    );
    state = dispatch(state, Msg::Started, &runner);
    render_if_dirty(&mut state);

    spawn_input_thread(msg_tx);

    while let Ok(app_msg) = msg_rx.recv() {
        match app_msg {
            AppMsg::Core(msg) => {
                state = dispatch(state, msg, &runner);
            }
            AppMsg::AddFiles { paths } => {
                let files = stat_files(&paths);
                state = dispatch(state, Msg::FilesAdded { files }, &runner);
            }
            AppMsg::Help => {
                println!("{}", ui::render::help_text());
            }
            AppMsg::Unknown { input } => {
                println!("unrecognized command {input:?}; try `help`");
            }
            AppMsg::Quit => break,
        }
        render_if_dirty(&mut state);
    }

    persistence::save_prefs(Path::new("."), &state.view());
    docket_info!("shutting down");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn render_if_dirty(state: &mut AppState) {
    if state.consume_dirty() {
        print!("{}", ui::render::render(&state.view()));
    }
}

/// Builds upload handles from user-supplied paths. Anything that is not a
/// readable regular file is reported and dropped here, before the pure
/// state ever sees it.
fn stat_files(paths: &[PathBuf]) -> Vec<FileHandle> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let modified_ms = meta
                    .modified()
                    .ok()
                    .and_then(|time| time.duration_since(SystemTime::UNIX_EPOCH).ok())
                    .map(|elapsed| elapsed.as_millis() as u64)
                    .unwrap_or(0);
                files.push(FileHandle {
                    name,
                    size: meta.len(),
                    modified_ms,
                    path: path.clone(),
                });
            }
            Ok(_) => println!("skipping {}: not a regular file", path.display()),
            Err(err) => println!("skipping {}: {err}", path.display()),
        }
    }
    files
}

fn spawn_input_thread(msg_tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => {
                    let _ = msg_tx.send(AppMsg::Quit);
                    break;
                }
                Ok(_) => {
                    let msg = ui::commands::parse(&line);
                    let quit = matches!(msg, AppMsg::Quit);
                    if msg_tx.send(msg).is_err() || quit {
                        break;
                    }
                }
                Err(err) => {
                    docket_warn!("stdin read failed: {}", err);
                    let _ = msg_tx.send(AppMsg::Quit);
                    break;
                }
            }
        }
    });
}
