/// Index of the amount column (4th column), the only column with an edit
/// validation rule and the column driving the auto-delete pass.
pub const AMOUNT_COL: usize = 3;

/// Index of the basis column (5th column), subtracted from the amount when
/// computing the selection difference.
pub const BASIS_COL: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell value at `idx`, empty for cells past the end of a ragged row.
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn has_cell(&self, idx: usize) -> bool {
        idx < self.cells.len()
    }

    pub fn numeric(&self, idx: usize) -> f64 {
        parse_f64(self.cell(idx))
    }

    pub fn set_cell(&mut self, idx: usize, value: String) {
        if self.cells.len() <= idx {
            self.cells.resize(idx + 1, String::new());
        }
        self.cells[idx] = value;
    }
}

/// The full unfiltered dataset of one table instance. Column order is fixed
/// by the header at load time and never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableData {
    pub fn new(columns: Vec<String>, rows: Vec<TableRow>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn parse_f64(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

/// Whether `value` is acceptable for the amount column: a parseable,
/// non-negative number.
pub fn is_valid_amount(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|parsed| parsed >= 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_access_is_total_over_ragged_rows() {
        let row = TableRow::new(vec!["a".to_string(), "b".to_string()]);

        assert_eq!(row.cell(0), "a");
        assert_eq!(row.cell(1), "b");
        assert_eq!(row.cell(5), "");
        assert!(row.has_cell(1));
        assert!(!row.has_cell(2));
    }

    #[test]
    fn set_cell_pads_short_rows() {
        let mut row = TableRow::new(vec!["a".to_string()]);
        row.set_cell(3, "late".to_string());

        assert_eq!(row.cells.len(), 4);
        assert_eq!(row.cell(1), "");
        assert_eq!(row.cell(3), "late");
    }

    #[test]
    fn parse_f64_defaults_non_numeric_to_zero() {
        assert_eq!(parse_f64("10"), 10.0);
        assert_eq!(parse_f64(" 2.5 "), 2.5);
        assert_eq!(parse_f64("abc"), 0.0);
        assert_eq!(parse_f64(""), 0.0);
    }

    #[test]
    fn amount_validation_rejects_negative_and_non_numeric() {
        assert!(is_valid_amount("5"));
        assert!(is_valid_amount("0"));
        assert!(is_valid_amount(" 12.5 "));
        assert!(!is_valid_amount("-1"));
        assert!(!is_valid_amount("abc"));
        assert!(!is_valid_amount(""));
    }
}
