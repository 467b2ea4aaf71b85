use std::fs;

use anyhow::{Context, Result};

use crate::domain::entities::table::TableData;

use super::csv::parse_csv;

/// Loads a table from a CSV source: an http(s) URL is fetched, anything else
/// is read from the local filesystem.
pub fn load_source(source: &str) -> Result<TableData> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_remote(source)?
    } else {
        fs::read_to_string(source).with_context(|| format!("failed to read csv: {source}"))?
    };
    parse_csv(&text)
}

fn fetch_remote(url: &str) -> Result<String> {
    let response =
        reqwest::blocking::get(url).with_context(|| format!("failed to fetch csv: {url}"))?;
    let response = response
        .error_for_status()
        .with_context(|| format!("csv request rejected: {url}"))?;
    response.text().context("failed to read csv response body")
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn unique_test_dir(prefix: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("lotview-{prefix}-{nanos}"))
    }

    #[test]
    fn load_source_reads_a_local_file() {
        let temp_dir = unique_test_dir("load-source");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let csv_path = temp_dir.join("lots.csv");
        fs::write(&csv_path, "A,B\n1,2\n").expect("should write csv fixture");

        let table = load_source(&csv_path.to_string_lossy()).expect("should load");

        assert_eq!(table.columns, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(table.rows.len(), 1);

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn load_source_reports_missing_files() {
        let missing = unique_test_dir("missing").join("absent.csv");

        assert!(load_source(&missing.to_string_lossy()).is_err());
    }
}
