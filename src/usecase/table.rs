use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Local};
use tracing::error;

use crate::domain::entities::table::{
    is_valid_amount, TableData, TableRow, AMOUNT_COL, BASIS_COL,
};
use crate::usecase::ports::export::{ClipboardSink, FileSink};

/// Fixed name used by the plain first-column export.
pub const FIRST_COLUMN_EXPORT_NAME: &str = "0lista.txt";

/// How long a transient status message stays visible.
pub const STATUS_LIFETIME_SECS: i64 = 3;

/// The single cell currently in edit mode, addressed by its position in the
/// filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditingCell {
    pub view_idx: usize,
    pub col_idx: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: DateTime<Local>,
}

/// All state of one table instance.
///
/// The filtered view is kept as indices into `table.rows`, so every view
/// entry carries a back-reference to its table slot. Delete, undo and edit
/// resolve through that back-reference and stay correct while a search or
/// filter is active.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    table: TableData,
    view: Vec<usize>,
    search: String,
    filters: BTreeMap<String, String>,
    selected: BTreeSet<usize>,
    deleted_rows: Vec<TableRow>,
    last_deleted: Vec<TableRow>,
    editing: Option<EditingCell>,
    edit_value: String,
    calculation: String,
    status: Option<StatusMessage>,
}

/// Indices of the rows that pass the current search term and per-column
/// filter terms, in table order. Terms are expected lower-cased; matching is
/// case-insensitive substring containment, filters AND together and AND with
/// the search.
pub fn derive_view(
    table: &TableData,
    search: &str,
    filters: &BTreeMap<String, String>,
) -> Vec<usize> {
    let mut view: Vec<usize> = (0..table.rows.len()).collect();

    if !search.is_empty() {
        view.retain(|&slot| {
            table.rows[slot]
                .cells
                .iter()
                .any(|cell| cell.to_lowercase().contains(search))
        });
    }

    for (column, term) in filters {
        if term.is_empty() {
            continue;
        }
        let Some(col_idx) = table.columns.iter().position(|name| name == column) else {
            continue;
        };
        view.retain(|&slot| table.rows[slot].cell(col_idx).to_lowercase().contains(term));
    }

    view
}

impl TableState {
    // --- load & reset -----------------------------------------------------

    pub fn load(&mut self, table: TableData) {
        self.table = table;
        self.search.clear();
        self.filters.clear();
        self.selected.clear();
        self.editing = None;
        self.edit_value.clear();
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.table = TableData::default();
        self.view.clear();
        self.search.clear();
        self.filters.clear();
        self.selected.clear();
        self.editing = None;
        self.edit_value.clear();
        self.calculation.clear();
    }

    // --- search & filter --------------------------------------------------

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
        self.refresh();
    }

    pub fn set_filter(&mut self, column: &str, term: &str) {
        let term = term.to_lowercase();
        if term.is_empty() {
            self.filters.remove(column);
        } else {
            self.filters.insert(column.to_string(), term);
        }
        self.refresh();
    }

    /// Re-derives the view and everything downstream of it, in a fixed
    /// order: view, auto-delete pass, selection bounds, calculation.
    fn refresh(&mut self) {
        self.view = derive_view(&self.table, &self.search, &self.filters);
        self.auto_delete();
        let bound = self.view.len();
        self.selected.retain(|&pos| pos < bound);
        self.calculate_difference();
    }

    /// Removes every visible row whose amount column parses to <= 0, without
    /// creating an undo entry. A second invocation on the resulting view
    /// finds nothing and is a no-op.
    fn auto_delete(&mut self) {
        let doomed: Vec<usize> = self
            .view
            .iter()
            .copied()
            .filter(|&slot| {
                let row = &self.table.rows[slot];
                row.has_cell(AMOUNT_COL) && row.numeric(AMOUNT_COL) <= 0.0
            })
            .collect();
        if doomed.is_empty() {
            return;
        }
        for slot in doomed.into_iter().rev() {
            self.table.rows.remove(slot);
        }
        self.view = derive_view(&self.table, &self.search, &self.filters);
    }

    // --- selection --------------------------------------------------------

    pub fn toggle_row(&mut self, view_idx: usize) {
        if view_idx >= self.view.len() {
            return;
        }
        if !self.selected.remove(&view_idx) {
            self.selected.insert(view_idx);
        }
        self.calculate_difference();
    }

    /// Toggle semantics: selects every visible row unless all of them are
    /// already selected, in which case the selection is cleared.
    pub fn select_all(&mut self) {
        if self.selected.len() == self.view.len() {
            self.selected.clear();
        } else {
            self.selected = (0..self.view.len()).collect();
        }
        self.calculate_difference();
    }

    // --- delete & undo ----------------------------------------------------

    pub fn delete_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let mut slots: Vec<usize> = self
            .selected
            .iter()
            .filter_map(|&pos| self.view.get(pos).copied())
            .collect();
        slots.sort_unstable_by(|a, b| b.cmp(a));

        let mut batch = Vec::with_capacity(slots.len());
        for slot in slots {
            batch.push(self.table.rows.remove(slot));
        }

        self.deleted_rows.extend(batch.iter().cloned());
        self.last_deleted = batch;
        self.selected.clear();
        self.editing = None;
        self.refresh();
    }

    /// Restores the most recent delete batch. Rows are appended at the end
    /// of the table, not spliced back to their original positions, and the
    /// previous selection is not restored.
    pub fn undo_delete(&mut self) {
        if self.last_deleted.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.last_deleted);
        for row in &batch {
            if let Some(pos) = self.deleted_rows.iter().rposition(|kept| kept == row) {
                self.deleted_rows.remove(pos);
            }
        }
        self.table.rows.extend(batch);
        self.refresh();
    }

    // --- cell editing -----------------------------------------------------

    /// Enters edit mode for a visible cell. Amount cells whose current value
    /// is not a non-negative number are refused silently. Beginning a new
    /// edit abandons any uncommitted previous one.
    pub fn begin_edit(&mut self, view_idx: usize, col_idx: usize) {
        let Some(row) = self.view_row(view_idx) else {
            return;
        };
        let current = row.cell(col_idx).to_string();
        if col_idx == AMOUNT_COL && !is_valid_amount(&current) {
            return;
        }
        self.editing = Some(EditingCell { view_idx, col_idx });
        self.edit_value = current;
    }

    pub fn set_edit_value(&mut self, value: &str) {
        self.edit_value = value.to_string();
    }

    /// Writes the pending value through the view's back-reference into the
    /// table. An invalid amount aborts the commit and leaves the edit open.
    pub fn commit_edit(&mut self) {
        let Some(cell) = self.editing else {
            return;
        };
        if cell.col_idx == AMOUNT_COL && !is_valid_amount(&self.edit_value) {
            return;
        }
        let Some(&slot) = self.view.get(cell.view_idx) else {
            self.editing = None;
            return;
        };
        let value = std::mem::take(&mut self.edit_value);
        self.table.rows[slot].set_cell(cell.col_idx, value);
        self.editing = None;
        self.refresh();
    }

    // --- aggregation & bulk update ----------------------------------------

    /// Sums amount minus basis over the selected rows that have a basis
    /// column, formatted to two decimals; empty selection yields an empty
    /// result string.
    pub fn calculate_difference(&mut self) {
        if self.selected.is_empty() {
            self.calculation.clear();
            return;
        }
        let mut total = 0.0;
        for &pos in &self.selected {
            let Some(&slot) = self.view.get(pos) else {
                continue;
            };
            let row = &self.table.rows[slot];
            if row.has_cell(BASIS_COL) {
                total += row.numeric(AMOUNT_COL) - row.numeric(BASIS_COL);
            }
        }
        self.calculation = format!("{total:.2}");
    }

    /// Overwrites the amount column of every selected row with the current
    /// calculation result.
    pub fn apply_result_to_amount(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let value = self.calculation.clone();
        let slots: Vec<usize> = self
            .selected
            .iter()
            .filter_map(|&pos| self.view.get(pos).copied())
            .collect();
        for slot in slots {
            if self.table.rows[slot].has_cell(AMOUNT_COL) {
                self.table.rows[slot].set_cell(AMOUNT_COL, value.clone());
            }
        }
        self.refresh();
    }

    // --- export & copy ----------------------------------------------------

    pub fn export_first_column(&mut self, sink: &dyn FileSink) {
        if self.view.is_empty() {
            return;
        }
        let content = self.first_column_text();
        match sink.save_text(FIRST_COLUMN_EXPORT_NAME, &content) {
            Ok(()) => self.set_status(format!(
                "First column values saved to {FIRST_COLUMN_EXPORT_NAME}"
            )),
            Err(err) => error!("first column export failed: {err}"),
        }
    }

    /// Same payload as [`export_first_column`](Self::export_first_column),
    /// but named `{row count}-{second cell of the first visible row}.txt`.
    pub fn export_first_column_named(&mut self, sink: &dyn FileSink) {
        if self.view.is_empty() {
            return;
        }
        let first_row = &self.table.rows[self.view[0]];
        let file_name = format!("{}-{}.txt", self.view.len(), first_row.cell(1));
        let content = self.first_column_text();
        match sink.save_text(&file_name, &content) {
            Ok(()) => self.set_status(format!("First column values saved to {file_name}")),
            Err(err) => error!("named first column export failed: {err}"),
        }
    }

    pub fn copy_first_cell(&mut self, clipboard: &dyn ClipboardSink) {
        if self.view.is_empty() {
            return;
        }
        let value = self.table.rows[self.view[0]].cell(0).to_string();
        match clipboard.copy_text(&value) {
            Ok(()) => self.set_status("First result copied to clipboard"),
            Err(err) => error!("clipboard write failed: {err}"),
        }
    }

    pub fn copy_second_row_third_column(&mut self, clipboard: &dyn ClipboardSink) {
        if self.view.len() < 2 {
            return;
        }
        let value = self.table.rows[self.view[1]].cell(2).to_string();
        match clipboard.copy_text(&value) {
            Ok(()) => self.set_status("Second result, third column copied to clipboard"),
            Err(err) => error!("clipboard write failed: {err}"),
        }
    }

    /// Copies a three-line summary counting the populated first, third and
    /// fifth column cells among the selected rows; the summary itself doubles
    /// as the status message.
    pub fn copy_selected_summary(&mut self, clipboard: &dyn ClipboardSink) {
        if self.selected.is_empty() {
            return;
        }
        let mut first = 0;
        let mut third = 0;
        let mut fifth = 0;
        for &pos in &self.selected {
            let Some(&slot) = self.view.get(pos) else {
                continue;
            };
            let row = &self.table.rows[slot];
            if row.has_cell(0) {
                first += 1;
            }
            if row.has_cell(2) {
                third += 1;
            }
            if row.has_cell(4) {
                fifth += 1;
            }
        }
        let summary = format!(
            "First Column: {first} values\nThird Column: {third} values\nFifth Column: {fifth} values"
        );
        match clipboard.copy_text(&summary) {
            Ok(()) => self.set_status(summary),
            Err(err) => error!("clipboard write failed: {err}"),
        }
    }

    fn first_column_text(&self) -> String {
        self.view
            .iter()
            .map(|&slot| self.table.rows[slot].cell(0))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // --- transient status -------------------------------------------------

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires_at: Local::now() + Duration::seconds(STATUS_LIFETIME_SECS),
        });
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line_at(Local::now())
    }

    pub fn status_line_at(&self, now: DateTime<Local>) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|message| message.expires_at > now)
            .map(|message| message.text.as_str())
    }

    // --- accessors --------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.table.columns
    }

    pub fn row_count(&self) -> usize {
        self.view.len()
    }

    pub fn view_row(&self, view_idx: usize) -> Option<&TableRow> {
        self.view
            .get(view_idx)
            .map(|&slot| &self.table.rows[slot])
    }

    /// Visible rows as (view position, cells padded to the header width),
    /// cloned for rendering.
    pub fn visible_rows(&self) -> Vec<(usize, Vec<String>)> {
        let width = self.table.columns.len();
        self.view
            .iter()
            .enumerate()
            .map(|(pos, &slot)| {
                let mut cells = self.table.rows[slot].cells.clone();
                cells.resize(width, String::new());
                (pos, cells)
            })
            .collect()
    }

    pub fn is_selected(&self, view_idx: usize) -> bool {
        self.selected.contains(&view_idx)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, column: &str) -> &str {
        self.filters.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn calculation(&self) -> &str {
        &self.calculation
    }

    pub fn editing(&self) -> Option<EditingCell> {
        self.editing
    }

    pub fn edit_value(&self) -> &str {
        &self.edit_value
    }

    pub fn has_undo(&self) -> bool {
        !self.last_deleted.is_empty()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_rows.len()
    }
}
