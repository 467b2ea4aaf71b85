use anyhow::{Context, Result};

use crate::domain::entities::table::{TableData, TableRow};

/// Parses CSV text into a table. The header line fixes the column order;
/// ragged records are kept as-is and fully blank records are dropped.
pub fn parse_csv(text: &str) -> Result<TableData> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .context("failed to read csv header")?
        .clone();
    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let columns: Vec<String> = headers.iter().map(|name| name.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        let cells: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(TableRow::new(cells));
    }

    Ok(TableData::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_csv_takes_columns_from_the_header() {
        let table = parse_csv("name,city\nAlice,Paris\nBob,Tokyo\n").expect("should parse");

        assert_eq!(table.columns, vec!["name".to_string(), "city".to_string()]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cell(0), "Alice");
        assert_eq!(table.rows[1].cell(1), "Tokyo");
    }

    #[test]
    fn parse_csv_keeps_ragged_records() {
        let table = parse_csv("A,B,C\n1,2,3\n4\n").expect("should parse");

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].cell(0), "4");
        assert_eq!(table.rows[1].cell(2), "");
    }

    #[test]
    fn parse_csv_drops_blank_records() {
        let table = parse_csv("A,B\n1,2\n,\n3,4\n").expect("should parse");

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].cell(0), "3");
    }

    #[test]
    fn parse_csv_rejects_empty_input() {
        assert!(parse_csv("").is_err());
    }

    #[test]
    fn parse_csv_handles_quoted_cells() {
        let table = parse_csv("A,B\n\"a, with comma\",plain\n").expect("should parse");

        assert_eq!(table.rows[0].cell(0), "a, with comma");
    }
}
