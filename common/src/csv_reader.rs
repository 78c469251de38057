//! CSV読み込み
//!
//! アップロードされたバイト列を Table に変換する。
//! 1行目をヘッダーとし、セル値はそのままテキストとして保持する。

use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use csv::ReaderBuilder;
use std::collections::HashSet;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSVバイト列をパース
pub fn parse_csv(bytes: &[u8]) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(parse_error)?,
        None => return Err(Error::Parse("No columns to parse from file".into())),
    };
    let columns = dedupe_columns(header.iter());
    let width = columns.len();
    debug!(columns = ?columns, "parsed header");

    let mut table = Table::new(columns);
    let mut padded = 0usize;

    for record in records {
        let record = record.map_err(parse_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() > width {
            return Err(Error::Parse(format!(
                "Error tokenizing data. Expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            )));
        }

        let mut row: Vec<Cell> = record.iter().map(Cell::text).collect();
        if row.len() < width {
            padded += 1;
            row.resize(width, Cell::text(""));
        }
        table.push_row(row)?;
    }

    if padded > 0 {
        warn!(rows = padded, "padded short rows with empty cells");
    }
    debug!(rows = table.len(), "parsed csv");

    Ok(table)
}

/// 重複した列名に `.1`, `.2` を付与し、空の列名は `Unnamed: N` にする
///
/// CSV・スプレッドシートどちらの入力でも同じスキーマになるよう共用する。
pub fn dedupe_columns<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(names.len());

    for (i, name) in names.iter().enumerate() {
        let name = if name.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name.to_string()
        };

        let mut candidate = name.clone();
        let mut n = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}.{}", name, n);
            n += 1;
        }
        taken.insert(candidate.clone());
        columns.push(candidate);
    }

    columns
}

fn parse_error(err: csv::Error) -> Error {
    Error::Parse(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = parse_csv(b"id,Statement\n1,Hurry now\n2,\"Hello, world\"\n").unwrap();
        assert_eq!(table.columns(), &["id", "Statement"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][1], Cell::text("Hello, world"));
    }

    #[test]
    fn test_parse_strips_bom() {
        let table = parse_csv("\u{feff}Statement\nabc\n".as_bytes()).unwrap();
        assert_eq!(table.columns(), &["Statement"]);
        assert!(table.statement_column().is_ok());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_csv(b""), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_csv(b"Statement,other\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_parse_too_many_fields() {
        let result = parse_csv(b"a,b\n1,2\n1,2,3\n");
        match result {
            Err(Error::Parse(msg)) => assert!(msg.contains("Expected 2 fields")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_short_rows_padded() {
        let table = parse_csv(b"a,b,c\n1\n").unwrap();
        assert_eq!(
            table.rows()[0],
            vec![Cell::text("1"), Cell::text(""), Cell::text("")]
        );
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let result = parse_csv(b"Statement\n\xff\xfe\n");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let table = parse_csv(b"x,x,,x\n1,2,3,4\n").unwrap();
        assert_eq!(table.columns(), &["x", "x.1", "Unnamed: 2", "x.2"]);
    }

    #[test]
    fn test_dedupe_columns_avoids_existing_suffix() {
        assert_eq!(
            dedupe_columns(["a", "a.1", "a"]),
            vec!["a", "a.1", "a.2"]
        );
    }

    #[test]
    fn test_multiline_quoted_field() {
        let table = parse_csv(b"Statement\n\"line one\nline two\"\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][0], Cell::text("line one\nline two"));
    }
}
