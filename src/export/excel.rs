//! Excel生成（CLI版）
//!
//! 共通ライブラリでバッファを生成してファイルに書き出す

use crate::error::Result;
use marketing_classifier_common::export::excel_core::generate_excel_buffer;
use marketing_classifier_common::{suggested_file_name, EnrichedTable};
use std::path::{Path, PathBuf};

/// Excelを書き出し、パスとバイト数を返す
pub fn generate_excel(
    enriched: &EnrichedTable,
    output: &Path,
    original_name: &str,
) -> Result<(PathBuf, usize)> {
    let buffer = generate_excel_buffer(enriched)?;

    let file_name = suggested_file_name(original_name, "xlsx");
    let path = if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.with_extension("xlsx")
    };

    std::fs::write(&path, &buffer)?;
    Ok((path, buffer.len()))
}
