pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use marketing_classifier_common::ClassificationOutcome;
use std::path::{Path, PathBuf};

/// 出力先ディレクトリ（またはファイルパス）と推奨ファイル名から出力パスを決める
fn output_path_for(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// 出力されたファイル
#[derive(Debug, Clone)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// 処理結果をファイルに書き出す
///
/// CSVは処理結果に含まれるバイト列をそのまま書く。
pub fn export_results(
    outcome: &ClassificationOutcome,
    format: ExportFormat,
    output_dir: &Path,
    original_name: &str,
) -> Result<Vec<WrittenFile>> {
    if output_dir.extension().is_none() {
        std::fs::create_dir_all(output_dir)?;
    }

    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::Both) {
        println!("- CSVを生成中...");
        let export = &outcome.export;
        let path = output_path_for(output_dir, &export.file_name);
        std::fs::write(&path, &export.bytes)?;
        println!("✔ CSV出力: {}", path.display());
        written.push(WrittenFile {
            path,
            bytes: export.bytes.len(),
        });
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        println!("- Excelを生成中...");
        let (path, bytes) = excel::generate_excel(&outcome.enriched, output_dir, original_name)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(WrittenFile { path, bytes });
    }

    Ok(written)
}
