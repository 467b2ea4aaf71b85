use std::rc::Rc;

use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::warn;

use crate::domain::entities::shortcuts::{ShortcutSet, TableAction};
use crate::infra::export::clipboard::SystemClipboard;
use crate::infra::export::file::DownloadsSink;
use crate::infra::import::source::load_source;
use crate::platform::desktop::blocking::run_blocking;
use crate::usecase::table::TableState;

/// One independent table instance: its own data, filters, selection, undo
/// batch and shortcut set. Two of these run side by side without sharing any
/// state.
#[component]
pub fn DynamicTable(
    table_id: &'static str,
    source: &'static str,
    shortcuts: ShortcutSet,
) -> Element {
    let mut state = use_signal(TableState::default);
    let mut search_box = use_signal(|| None::<Rc<MountedData>>);

    use_effect(move || {
        match run_blocking(|| load_source(source)) {
            Ok(table) => state.write().load(table),
            Err(err) => warn!("failed to auto-load {source}: {err}"),
        }
    });

    let open_csv = move |_: MouseEvent| {
        let Some(file_path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() else {
            return;
        };
        match run_blocking(|| load_source(&file_path.to_string_lossy())) {
            Ok(table) => state.write().load(table),
            Err(err) => warn!("failed to import {}: {err}", file_path.display()),
        }
    };

    let on_key = move |event: KeyboardEvent| {
        if !event.modifiers().ctrl() {
            return;
        }
        let Key::Character(text) = event.key() else {
            return;
        };
        let Some(key) = text.chars().next() else {
            return;
        };
        let Some(action) = shortcuts.action_for(key) else {
            return;
        };
        event.prevent_default();
        match action {
            TableAction::FocusSearch => {
                if let Some(element) = search_box() {
                    spawn(async move {
                        let _ = element.set_focus(true).await;
                    });
                }
            }
            TableAction::SaveFirstColumn => state.write().export_first_column(&DownloadsSink),
            TableAction::CopyFirstCell => state.write().copy_first_cell(&SystemClipboard),
            TableAction::Clear => state.write().clear(),
            TableAction::CopyLot2 => state.write().copy_second_row_third_column(&SystemClipboard),
            TableAction::DeleteSelected => state.write().delete_selected(),
            TableAction::UndoDelete => state.write().undo_delete(),
            TableAction::SelectAll => state.write().select_all(),
            TableAction::ApplyResult => state.write().apply_result_to_amount(),
            TableAction::CopySelectedSummary => state.write().copy_selected_summary(&SystemClipboard),
        }
    };

    if state.read().is_empty() {
        return rsx! {
            div {
                h2 { "Table {table_id}" }
                button { onclick: open_csv, "Open CSV" }
            }
        };
    }

    let snapshot = state.read();
    let columns = snapshot.columns().to_vec();
    let rows = snapshot.visible_rows();
    let row_count = snapshot.row_count();
    let selected_count = snapshot.selected_count();
    let search = snapshot.search().to_string();
    let calculation = snapshot.calculation().to_string();
    let editing = snapshot.editing();
    let edit_value = snapshot.edit_value().to_string();
    let status = snapshot.status_line().map(str::to_string);
    let selected: Vec<bool> = (0..row_count).map(|pos| snapshot.is_selected(pos)).collect();
    drop(snapshot);

    let search_hint = ShortcutSet::hint(shortcuts.search);
    let save_hint = ShortcutSet::hint(shortcuts.save);
    let copy_first_hint = ShortcutSet::hint(shortcuts.copy_first);
    let clear_hint = ShortcutSet::hint(shortcuts.clear);
    let lot2_hint = ShortcutSet::hint(shortcuts.lot2);
    let delete_hint = ShortcutSet::hint(shortcuts.delete);
    let undo_hint = ShortcutSet::hint(shortcuts.undo);
    let select_all_hint = ShortcutSet::hint(shortcuts.select_all);
    let update_hint = ShortcutSet::hint(shortcuts.update);
    let copy_selected_hint = ShortcutSet::hint(shortcuts.copy_selected);

    rsx! {
        div {
            tabindex: "0",
            onkeydown: on_key,

            h2 { "Table {table_id}" }

            nav {
                style: "display: flex; gap: 8px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                button { onclick: open_csv, "Open CSV" }
                input {
                    r#type: "text",
                    placeholder: "Search ({search_hint})",
                    value: "{search}",
                    onmounted: move |event| search_box.set(Some(event.data())),
                    oninput: move |event| state.write().set_search(&event.value()),
                }
                button {
                    onclick: move |_| state.write().export_first_column(&DownloadsSink),
                    "Save First Column ({save_hint})"
                }
                button {
                    onclick: move |_| state.write().copy_first_cell(&SystemClipboard),
                    "Copy First Result ({copy_first_hint})"
                }
                button {
                    onclick: move |_| state.write().clear(),
                    "Clear ({clear_hint})"
                }
                button {
                    onclick: move |_| state.write().clear(),
                    "Reload"
                }
                button {
                    onclick: move |_| state.write().export_first_column_named(&DownloadsSink),
                    "Save2"
                }
                button {
                    onclick: move |_| state.write().copy_second_row_third_column(&SystemClipboard),
                    "Lot-2 ({lot2_hint})"
                }
                button {
                    onclick: move |_| state.write().delete_selected(),
                    "Delete Selected ({delete_hint})"
                }
                button {
                    onclick: move |_| state.write().undo_delete(),
                    "Undo Delete ({undo_hint})"
                }
                button {
                    onclick: move |_| state.write().select_all(),
                    "Select All ({select_all_hint})"
                }
                button {
                    onclick: move |_| state.write().apply_result_to_amount(),
                    "Update Column 4 ({update_hint})"
                }
                button {
                    onclick: move |_| state.write().copy_selected_summary(&SystemClipboard),
                    "Copy Selected ({copy_selected_hint})"
                }
            }

            if let Some(message) = status {
                div {
                    style: "background: rgba(0, 0, 0, 0.7); color: #fff; padding: 10px 20px; border-radius: 5px; white-space: pre-line;",
                    "{message}"
                }
            }

            div {
                span { "Rows: {row_count}" }
            }

            if !calculation.is_empty() {
                div {
                    span { "Result: " }
                    input { r#type: "text", value: "{calculation}", readonly: true }
                }
            }

            table { style: "border-collapse: collapse; width: 100%; border: 1px solid #bbb;",
                thead {
                    tr {
                        th { style: "border: 1px solid #bbb; padding: 6px; background: #f2f2f2;",
                            input {
                                r#type: "checkbox",
                                checked: selected_count == row_count && row_count > 0,
                                onchange: move |_| state.write().select_all(),
                            }
                        }
                        for column in columns {
                            th { style: "border: 1px solid #bbb; padding: 6px; background: #f2f2f2;",
                                div {
                                    "{column}"
                                    input {
                                        r#type: "text",
                                        placeholder: "Filter...",
                                        oninput: {
                                            let filter_col = column.clone();
                                            move |event: FormEvent| {
                                                state.write().set_filter(&filter_col, &event.value());
                                            }
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
                tbody {
                    for (pos, cells) in rows {
                        tr {
                            style: if selected[pos] {
                                "background: #444; color: #fff; cursor: pointer;"
                            } else {
                                "cursor: pointer;"
                            },
                            onclick: move |_| state.write().toggle_row(pos),
                            td { style: "border: 1px solid #bbb; padding: 6px;",
                                input {
                                    r#type: "checkbox",
                                    checked: selected[pos],
                                    style: "pointer-events: none;",
                                }
                            }
                            for (col_idx, cell) in cells.into_iter().enumerate() {
                                td {
                                    style: "border: 1px solid #bbb; padding: 6px;",
                                    onclick: move |event| {
                                        event.stop_propagation();
                                        state.write().begin_edit(pos, col_idx);
                                    },
                                    if editing.is_some_and(|active| active.view_idx == pos && active.col_idx == col_idx) {
                                        input {
                                            r#type: "text",
                                            value: "{edit_value}",
                                            autofocus: true,
                                            oninput: move |event| state.write().set_edit_value(&event.value()),
                                            onblur: move |_| state.write().commit_edit(),
                                            onkeydown: move |event| {
                                                if event.key() == Key::Enter {
                                                    state.write().commit_edit();
                                                }
                                            },
                                        }
                                    } else {
                                        "{cell}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
