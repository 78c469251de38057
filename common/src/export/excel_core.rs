//! Excel生成（共通ライブラリ）
//!
//! エンリッチ済みの表を1シートのxlsxに書き出す。
//! ヘッダー行は太字・固定、真偽値はExcelの論理値セルとして出力する。

use crate::classifier::EnrichedTable;
use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use rust_xlsxwriter::*;

const SHEET_NAME: &str = "classified";

/// Excelをバッファに生成
pub fn generate_excel_buffer(enriched: &EnrichedTable) -> Result<Vec<u8>> {
    generate_table_buffer(enriched.table())
}

pub fn generate_table_buffer(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| excel_error("シート名設定エラー", e))?;

    for (col, name) in table.columns().iter().enumerate() {
        let col = column_number(col)?;
        worksheet
            .write_string_with_format(0, col, name, &header_format)
            .map_err(|e| excel_error("ヘッダー書き込みエラー", e))?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = u32::try_from(row_idx + 1)
            .map_err(|_| Error::Export(format!("行数が多すぎます: {}", row_idx + 1)))?;

        for (col, cell) in row.iter().enumerate() {
            let col = column_number(col)?;
            let written = match cell {
                Cell::Bool(b) => worksheet.write_boolean(excel_row, col, *b),
                other => worksheet.write_string(excel_row, col, other.to_string()),
            };
            written.map_err(|e| excel_error("セル書き込みエラー", e))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| excel_error("ヘッダー固定エラー", e))?;
    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| excel_error("Excel保存エラー", e))
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| Error::Export(format!("列数が多すぎます: {}", col + 1)))
}

fn excel_error(context: &str, err: XlsxError) -> Error {
    Error::Export(format!("{}: {}", context, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::enrich;
    use crate::dictionary::KeywordDictionary;

    #[test]
    fn test_generate_excel_buffer() {
        let table = Table::from_rows(
            vec!["Statement".into()],
            vec![vec![Cell::text("Hurry, VIP only")], vec![Cell::text("hello")]],
        )
        .unwrap();
        let enriched = enrich(&table, &KeywordDictionary::builtin()).unwrap();

        let buffer = generate_excel_buffer(&enriched).unwrap();
        // xlsxはZIPコンテナ
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_excel_header_only() {
        let table = Table::new(vec!["Statement".into(), "labels".into()]);
        assert!(generate_table_buffer(&table).is_ok());
    }
}
