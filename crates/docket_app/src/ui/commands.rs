use std::path::PathBuf;

use docket_core::{FilterField, Msg, SortColumn, UploadKind};

use super::AppMsg;

/// Maps one input line to a message.
///
/// Grammar:
///   search | clear
///   set <field> <value...>
///   sort <column>
///   first | prev | next | last | goto <n> | size <n>
///   select <number> | unselect
///   open <number>
///   add <path>... | remove <n> | expense <label...> <YYYY-MM-DD>
///   submit [expenses] | yes | no
///   help | quit
pub(crate) fn parse(line: &str) -> AppMsg {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return AppMsg::Core(Msg::NoOp);
    }
    let mut words = trimmed.split_whitespace();
    let command = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    let unknown = || AppMsg::Unknown {
        input: trimmed.to_string(),
    };

    match command {
        "search" | "s" => AppMsg::Core(Msg::SearchSubmitted),
        "clear" => AppMsg::Core(Msg::FiltersCleared),
        "set" => match rest.split_first() {
            Some((field, value)) => match FilterField::parse(field) {
                Some(field) => AppMsg::Core(Msg::FilterChanged {
                    field,
                    value: value.join(" "),
                }),
                None => unknown(),
            },
            None => unknown(),
        },
        "sort" => match rest.first().and_then(|name| SortColumn::parse(name)) {
            Some(column) => AppMsg::Core(Msg::SortClicked { column }),
            None => unknown(),
        },
        "first" => AppMsg::Core(Msg::PageFirst),
        "prev" | "p" => AppMsg::Core(Msg::PagePrev),
        "next" | "n" => AppMsg::Core(Msg::PageNext),
        "last" => AppMsg::Core(Msg::PageLast),
        "goto" => match rest.first().and_then(|word| word.parse().ok()) {
            Some(page) => AppMsg::Core(Msg::PageJumped { page }),
            None => unknown(),
        },
        "size" => match rest.first().and_then(|word| word.parse().ok()) {
            Some(size) if size > 0 => AppMsg::Core(Msg::PageSizeChanged { size }),
            _ => unknown(),
        },
        "select" => match rest.first() {
            Some(number) => AppMsg::Core(Msg::RowToggled {
                number: (*number).to_string(),
            }),
            None => unknown(),
        },
        "unselect" => AppMsg::Core(Msg::SelectionCleared),
        "open" => match rest.first() {
            Some(number) => AppMsg::Core(Msg::OpenFolderClicked {
                number: (*number).to_string(),
            }),
            None => unknown(),
        },
        "add" => {
            if rest.is_empty() {
                unknown()
            } else {
                AppMsg::AddFiles {
                    paths: rest.iter().map(PathBuf::from).collect(),
                }
            }
        }
        // Queue entries are shown 1-based.
        "remove" | "rm" => match rest.first().and_then(|word| word.parse::<usize>().ok()) {
            Some(position) if position >= 1 => AppMsg::Core(Msg::FileRemoved {
                index: position - 1,
            }),
            _ => unknown(),
        },
        "expense" => match rest.split_last() {
            Some((due_date, label_words)) if !label_words.is_empty() => {
                AppMsg::Core(Msg::ExpenseDetailsChanged {
                    label: label_words.join(" "),
                    due_date: (*due_date).to_string(),
                })
            }
            _ => unknown(),
        },
        "submit" => {
            let kind = match rest.first() {
                Some(&"expenses") => UploadKind::Expenses,
                Some(_) => return unknown(),
                None => UploadKind::General,
            };
            AppMsg::Core(Msg::SubmitClicked { kind })
        }
        "yes" | "y" => AppMsg::Core(Msg::RenameConfirmed),
        "no" => AppMsg::Core(Msg::RenameDeclined),
        "help" | "?" => AppMsg::Help,
        "quit" | "exit" | "q" => AppMsg::Quit,
        _ => unknown(),
    }
}
