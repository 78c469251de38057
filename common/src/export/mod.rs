//! Export core modules shared across CLI and library callers.

pub mod delimited;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use delimited::{serialize, serialize_table, suggested_file_name, CsvExport};

/// 出力ファイル名に付与する接尾辞
pub const CLASSIFIED_SUFFIX: &str = "_classified";
