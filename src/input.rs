//! 入力ファイル読み込み
//!
//! CSVは共通ライブラリでパースし、Excel/ODSはcalamineで先頭シートを読む。
//! どちらも1行目をヘッダーとして Table に変換する。

use crate::error::{ClassifierError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use marketing_classifier_common::{dedupe_columns, parse_csv, Cell, Table};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 入力ファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    Spreadsheet,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if ext == "csv" {
            Ok(InputKind::Csv)
        } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            Ok(InputKind::Spreadsheet)
        } else {
            Err(ClassifierError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

/// ファイルを読み込んで表に変換
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(ClassifierError::FileNotFound(path.display().to_string()));
    }

    let kind = InputKind::from_path(path)?;
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), kind = ?kind, "read input");

    load_bytes(bytes, kind)
}

pub fn load_bytes(bytes: Vec<u8>, kind: InputKind) -> Result<Table> {
    match kind {
        InputKind::Csv => Ok(parse_csv(&bytes)?),
        InputKind::Spreadsheet => parse_spreadsheet(bytes),
    }
}

/// 先頭シートを読み込む
fn parse_spreadsheet(bytes: Vec<u8>) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ClassifierError::SpreadsheetRead(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ClassifierError::SpreadsheetRead("シートがありません".into()))?
        .map_err(|e| ClassifierError::SpreadsheetRead(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ClassifierError::SpreadsheetRead("No columns to parse from file".into()))?;

    let names: Vec<String> = header.iter().map(cell_text).collect();
    let columns = dedupe_columns(names.iter().map(String::as_str));

    let mut table = Table::new(columns);
    for row in rows {
        // 空行はスキップ
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        table.push_row(row.iter().map(|c| Cell::text(cell_text(c))).collect())?;
    }

    debug!(rows = table.len(), columns = table.columns().len(), "parsed spreadsheet");
    Ok(table)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}
