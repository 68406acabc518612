use std::fmt::Write as _;

use docket_core::{AppViewModel, NoticeKind, RecordRowView, SortColumn};

/// Renders the whole view as text. Pure; printing is the caller's job.
pub(crate) fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(notice) = &view.notice {
        let tag = match notice.kind {
            NoticeKind::Info => "--",
            NoticeKind::Success => "ok",
            NoticeKind::Error => "!!",
        };
        let _ = writeln!(out, "[{tag}] {}", notice.text);
    }

    let _ = writeln!(out, "{}", header_line(view));
    if view.loading {
        let _ = writeln!(out, "  searching...");
    } else if view.rows.is_empty() {
        let _ = writeln!(out, "  no results");
    } else {
        for row in &view.rows {
            let _ = writeln!(out, "{}", format_record_row(row));
        }
    }

    let _ = writeln!(
        out,
        "Total: {} processes found | {} | {} per page",
        format_with_commas(view.total_count as u64),
        view.page_label(),
        view.page_size
    );

    if view.upload_panel_visible {
        let target = view.selection.as_deref().unwrap_or_default();
        let _ = writeln!(out, "Upload target: process {target}");
        if view.queue.is_empty() {
            let _ = writeln!(out, "  queue empty; `add <path>` to queue files");
        } else {
            for (position, entry) in view.queue.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {} ({} B)",
                    position + 1,
                    entry.name,
                    format_with_commas(entry.size)
                );
            }
        }
        if let Some(stats) = view.last_add_stats {
            let _ = writeln!(
                out,
                "  last add: {} queued, {} duplicate(s) skipped",
                stats.added, stats.skipped
            );
        }
        if view.submit_in_flight {
            let _ = writeln!(out, "  uploading...");
        }
    }

    if let Some(prompt) = &view.rename_prompt {
        let _ = writeln!(
            out,
            "{} of {} file(s) already exist on the server:",
            prompt.existing.len(),
            prompt.file_count
        );
        for name in &prompt.existing {
            let _ = writeln!(out, "  - {name}");
        }
        let _ = writeln!(out, "Store them under renamed copies? (yes/no)");
    }

    if let Some(path) = &view.opening_path {
        let _ = writeln!(out, "Opening folder {path}...");
    }

    out
}

pub(crate) fn help_text() -> &'static str {
    "Commands:
  search                      run the search with the current filters
  set <field> <value>         client, start, end, year, area, service, reference
  clear                       reset all filters and search again
  sort <column>               number, client, area, service, year, reference
  first | prev | next | last  page navigation
  goto <n> | size <n>         jump to page n / set rows per page
  select <number>             toggle the selected process
  unselect                    clear the selection
  open <number>               open the folder of a process
  add <path>...               queue files for upload
  remove <n>                  drop queue entry n
  expense <label> <date>      attach expense metadata (date YYYY-MM-DD)
  submit [expenses]           upload the queue to the selected process
  yes | no                    answer the rename prompt
  quit"
}

const COLUMNS: [SortColumn; 6] = [
    SortColumn::Number,
    SortColumn::Client,
    SortColumn::Area,
    SortColumn::Service,
    SortColumn::Year,
    SortColumn::Reference,
];

const WIDTHS: [usize; 6] = [10, 18, 12, 14, 6, 20];

fn header_line(view: &AppViewModel) -> String {
    let mut line = String::from("   ");
    for (column, width) in COLUMNS.into_iter().zip(WIDTHS) {
        let mut label = column.label().to_string();
        if view.sort.column == column {
            label.push_str(if view.sort.reverse { " v" } else { " ^" });
        }
        let _ = write!(line, "{label:width$}  ");
    }
    line.trim_end().to_string()
}

fn format_record_row(row: &RecordRowView) -> String {
    let marker = if row.selected { "*" } else { " " };
    let cells = [
        row.number.as_str(),
        row.client.as_str(),
        row.area.as_str(),
        row.service.as_str(),
        row.year.as_str(),
        row.reference.as_str(),
    ];
    let mut line = format!("{marker}  ");
    for (cell, width) in cells.into_iter().zip(WIDTHS) {
        let _ = write!(line, "{cell:width$}  ");
    }
    line.trim_end().to_string()
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
