//! Delimited-file loading for the restaurant dataset.
//!
//! Reads the `rate`, `listed_in(type)`, `votes` and `online_order` columns
//! into a [`RawTable`]; every other column is ignored.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use insights_core::error::{InsightsError, Result};
use insights_core::models::{Column, RawRecord, RawTable, Table};
use tracing::{debug, info};

/// Delimiters tried when sniffing the header line, in order of preference.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the dataset at `path`.
///
/// Fails with [`InsightsError::DataLoad`] when the file is missing,
/// unreadable, empty, or not consistently delimited.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|e| InsightsError::data_load(path, e))?;
    let table = read_table(file, path)?;
    info!(
        "Loaded {} rows ({} known columns) from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

/// Load a dataset from any reader.  Errors name the source as `<reader>`.
pub fn load_table_from_reader<R: Read>(reader: R) -> Result<RawTable> {
    read_table(reader, Path::new("<reader>"))
}

/// Pick the delimiter that occurs most often in the header line.
///
/// Ties go to the earlier entry in [`CANDIDATE_DELIMITERS`]; a header with
/// none of them is treated as comma-separated.
pub fn sniff_delimiter(input: &[u8]) -> u8 {
    let header = input.split(|&b| b == b'\n').next().unwrap_or_default();
    let mut best = (b',', 0usize);
    for delimiter in CANDIDATE_DELIMITERS {
        let count = header.iter().filter(|&&b| b == delimiter).count();
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_table<R: Read>(mut reader: R, origin: &Path) -> Result<RawTable> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .map_err(|e| InsightsError::data_load(origin, e))?;

    if input.iter().all(u8::is_ascii_whitespace) {
        return Err(InsightsError::data_load(origin, "file is empty"));
    }

    let delimiter = sniff_delimiter(&input);
    debug!("Using delimiter {:?} for {}", delimiter as char, origin.display());

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(input.as_slice());

    let headers = csv_reader
        .headers()
        .map_err(|e| InsightsError::data_load(origin, e))?
        .clone();

    // First occurrence wins when a header is repeated.
    let mut positions: HashMap<Column, usize> = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(name.trim_start_matches('\u{feff}')) {
            positions.entry(column).or_insert(idx);
        }
    }

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result.map_err(|e| InsightsError::data_load(origin, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let cell = |column: Column| -> Option<String> {
            positions
                .get(&column)
                .and_then(|&idx| row.get(idx))
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        };

        let votes = match cell(Column::Votes) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                InsightsError::data_load(origin, format!("line {line}: invalid votes value {raw:?}"))
            })?),
            None => None,
        };

        records.push(RawRecord {
            rate: cell(Column::Rate),
            listed_in_type: cell(Column::ListedInType),
            votes,
            online_order: cell(Column::OnlineOrder),
        });
    }

    Ok(Table::new(positions.into_keys(), records))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
name,online_order,book_table,rate,votes,approx_cost(for two people),listed_in(type)
Jalsa,Yes,Yes,4.1/5,775,800,Buffet
Spice Elephant,Yes,No,4.1/5,787,800,Buffet
San Churro Cafe,Yes,No,3.8/5,918,800,Cafe
Addhuri Udupi Bhojana,No,No,3.7/5,88,300,Dining
Grand Village,No,No,3.8/5,166,600,Dining
";

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    // ── load_table ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_table_reads_known_columns() {
        let file = write_temp(SAMPLE);
        let table = load_table(file.path()).expect("load");

        assert_eq!(table.len(), 5);
        assert_eq!(table.columns(), &Column::ALL);

        let first = &table.records()[0];
        assert_eq!(first.rate.as_deref(), Some("4.1/5"));
        assert_eq!(first.listed_in_type.as_deref(), Some("Buffet"));
        assert_eq!(first.votes, Some(775));
        assert_eq!(first.online_order.as_deref(), Some("Yes"));
    }

    #[test]
    fn test_load_table_missing_file() {
        let err = load_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        match err {
            InsightsError::DataLoad { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.csv"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_table_empty_file() {
        let file = write_temp("");
        let err = load_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("file is empty"));
    }

    #[test]
    fn test_load_table_header_only() {
        let table = load_table_from_reader("rate,votes\n".as_bytes()).expect("load");
        assert!(table.is_empty());
        assert_eq!(table.columns(), &[Column::Rate, Column::Votes]);
    }

    // ── load_table_from_reader ────────────────────────────────────────────────

    #[test]
    fn test_missing_column_is_not_declared() {
        let input = "rate,listed_in(type),online_order\n4.1/5,Dining,Yes\n";
        let table = load_table_from_reader(input.as_bytes()).expect("load");
        assert!(!table.has_column(Column::Votes));
        assert_eq!(table.records()[0].votes, None);
    }

    #[test]
    fn test_empty_cells_are_none() {
        let input = "rate,listed_in(type),votes,online_order\n,Dining,,Yes\n";
        let table = load_table_from_reader(input.as_bytes()).expect("load");
        let record = &table.records()[0];
        assert_eq!(record.rate, None);
        assert_eq!(record.votes, None);
        assert_eq!(record.listed_in_type.as_deref(), Some("Dining"));
    }

    #[test]
    fn test_invalid_votes_is_data_load_error() {
        let input = "rate,listed_in(type),votes,online_order\n4.1/5,Dining,many,Yes\n";
        let err = load_table_from_reader(input.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, InsightsError::DataLoad { .. }));
        assert!(msg.contains("line 2"), "message was: {msg}");
        assert!(msg.contains("many"));
    }

    #[test]
    fn test_ragged_rows_are_data_load_error() {
        let input = "rate,listed_in(type),votes,online_order\n4.1/5,Dining\n";
        let err = load_table_from_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(err, InsightsError::DataLoad { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_data_load_error() {
        let mut input = b"rate,listed_in(type),votes,online_order\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b',', b'x', b',', b'1', b',', b'y', b'\n']);
        let err = load_table_from_reader(input.as_slice()).unwrap_err();
        assert!(matches!(err, InsightsError::DataLoad { .. }));
    }

    #[test]
    fn test_semicolon_delimited_file() {
        let input = "rate;listed_in(type);votes;online_order\n3.0/5;Cafe;7;Yes\n";
        let table = load_table_from_reader(input.as_bytes()).expect("load");
        assert_eq!(table.records()[0].listed_in_type.as_deref(), Some("Cafe"));
        assert_eq!(table.records()[0].votes, Some(7));
    }

    #[test]
    fn test_quoted_cells_with_commas() {
        let input = "name,rate,listed_in(type),votes,online_order\n\"Cafe, Bar\",3.0/5,Cafe,7,No\n";
        let table = load_table_from_reader(input.as_bytes()).expect("load");
        assert_eq!(table.records()[0].online_order.as_deref(), Some("No"));
    }

    #[test]
    fn test_bom_prefixed_header() {
        let input = "\u{feff}rate,votes\n4.0/5,3\n";
        let table = load_table_from_reader(input.as_bytes()).expect("load");
        assert!(table.has_column(Column::Rate));
    }

    // ── sniff_delimiter ───────────────────────────────────────────────────────

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter(b"a,b,c\n1,2,3"), b',');
        assert_eq!(sniff_delimiter(b"a;b;c\n1;2;3"), b';');
        assert_eq!(sniff_delimiter(b"a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter(b"a|b"), b'|');
        assert_eq!(sniff_delimiter(b"single"), b',');
    }
}
