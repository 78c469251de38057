//! アップロード1件分の処理
//!
//! パース → 検証 → 分類 → 付与 → CSV化 を一度に行う。
//! エラーは分類前に検出され、途中結果は返さない。

use crate::classifier::{enrich, CategoryCount, EnrichedTable};
use crate::csv_reader::parse_csv;
use crate::dictionary::KeywordDictionary;
use crate::error::Result;
use crate::export::{serialize, CsvExport};
use crate::table::Table;
use tracing::info;

/// 処理結果
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    /// プレビュー表示用のエンリッチ済み表
    pub enriched: EnrichedTable,
    /// カテゴリごとの件数
    pub counts: Vec<CategoryCount>,
    /// ダウンロード用のCSV
    pub export: CsvExport,
}

/// CSVバイト列を処理
pub fn process_upload(
    bytes: &[u8],
    file_name: &str,
    dictionary: &KeywordDictionary,
) -> Result<ClassificationOutcome> {
    let table = parse_csv(bytes)?;
    process_table(&table, file_name, dictionary)
}

/// パース済みの表を処理
pub fn process_table(
    table: &Table,
    file_name: &str,
    dictionary: &KeywordDictionary,
) -> Result<ClassificationOutcome> {
    let enriched = enrich(table, dictionary)?;
    let counts = enriched.category_counts();
    let export = serialize(&enriched, file_name)?;
    info!(
        file = file_name,
        rows = enriched.len(),
        bytes = export.bytes.len(),
        "processed upload"
    );

    Ok(ClassificationOutcome {
        enriched,
        counts,
        export,
    })
}
