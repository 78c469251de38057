//! CSV出力
//!
//! エンリッチ済みの表をCSVバイト列に変換し、ダウンロード用のファイル名を決める。

use super::CLASSIFIED_SUFFIX;
use crate::classifier::EnrichedTable;
use crate::error::{Error, Result};
use crate::table::Table;
use csv::{Terminator, WriterBuilder};
use std::path::Path;

/// CSV出力結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// エンリッチ済みの表をCSVに変換
pub fn serialize(enriched: &EnrichedTable, original_name: &str) -> Result<CsvExport> {
    serialize_table(enriched.table(), original_name)
}

/// 任意の表をCSVに変換（ヘッダー行 + 全行、インデックス列なし）
pub fn serialize_table(table: &Table, original_name: &str) -> Result<CsvExport> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(format!("CSV書き出しエラー: {}", e.error())))?;

    Ok(CsvExport {
        bytes,
        file_name: suggested_file_name(original_name, "csv"),
    })
}

/// 元ファイル名から出力ファイル名を決める
///
/// 最後の拡張子のみ除去する: `report.v2.csv` → `report.v2_classified.csv`
pub fn suggested_file_name(original_name: &str, extension: &str) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("output");
    format!("{}{}.{}", stem, CLASSIFIED_SUFFIX, extension)
}
