//! 分類・エンリッチ処理（CLI/ライブラリ共通）
//!
//! 各行の `Statement` を辞書と照合し、ラベル一覧列とカテゴリごとの真偽値列を追加する。
//!
//! 照合は小文字化した上での部分文字列一致で、単語境界は見ない。
//! そのため "vip" は "equivip" にも一致する（既知の誤検出リスク）。

use crate::dictionary::KeywordDictionary;
use crate::error::Result;
use crate::table::{Cell, StatementColumn, Table};
use serde::Serialize;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// ラベル一覧の列名
pub const LABELS_COLUMN: &str = "labels";

/// テキストを分類し、一致したカテゴリのラベルを辞書順で返す
pub fn classify(text: &str, dictionary: &KeywordDictionary) -> Vec<String> {
    let text_lower = text.to_lowercase();
    dictionary
        .iter()
        .filter(|category| category.matches_lowercased(&text_lower))
        .map(|category| category.label.clone())
        .collect()
}

/// 任意のセルをテキスト化して分類
pub fn classify_cell(cell: &Cell, dictionary: &KeywordDictionary) -> Vec<String> {
    match cell {
        Cell::Text(text) => classify(text, dictionary),
        other => classify(&other.to_string(), dictionary),
    }
}

/// 1行分の分類結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub labels: Vec<String>,
    /// 辞書順の真偽値（ラベル一覧に含まれるか）
    pub flags: Vec<bool>,
}

impl EnrichedRecord {
    fn from_labels(labels: Vec<String>, dictionary: &KeywordDictionary) -> Self {
        let flags = dictionary
            .iter()
            .map(|category| labels.iter().any(|l| l == &category.label))
            .collect();
        Self { labels, flags }
    }
}

/// カテゴリごとの件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// エンリッチ済みの表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedTable {
    table: Table,
    labels: Vec<String>,
}

impl EnrichedTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    /// 追加された真偽値列（辞書順）
    pub fn category_labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 各行のラベル一覧
    pub fn row_labels(&self) -> Vec<&[String]> {
        self.table
            .column_values(LABELS_COLUMN)
            .map(|values| values.map(|c| c.as_labels().unwrap_or(&[])).collect())
            .unwrap_or_default()
    }

    /// 真偽値列ごとの合計
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        self.labels
            .iter()
            .map(|label| {
                let count = self
                    .table
                    .column_values(label)
                    .map(|values| values.filter(|c| c.as_bool() == Some(true)).count())
                    .unwrap_or(0);
                CategoryCount {
                    label: label.clone(),
                    count,
                }
            })
            .collect()
    }

    /// 派生列（ラベル一覧・真偽値列）を取り除いた表
    pub fn strip_derived(&self) -> Table {
        let mut derived: Vec<&str> = vec![LABELS_COLUMN];
        derived.extend(self.labels.iter().map(String::as_str));
        self.table.without_columns(&derived)
    }

    /// プレビュー用の先頭n行
    pub fn head(&self, n: usize) -> Table {
        self.table.head(n)
    }
}

/// 表をエンリッチする
///
/// `Statement` 列の有無は最初に一度だけスキーマで確認する（0行でもエラー）。
/// 入力の表は変更せず、新しい表を返す。
pub fn enrich(table: &Table, dictionary: &KeywordDictionary) -> Result<EnrichedTable> {
    let statement = table.statement_column()?;
    debug!(
        rows = table.len(),
        categories = dictionary.len(),
        "enriching table"
    );

    let records = classify_rows(table, statement, dictionary);

    let mut enriched = table.clone();
    let label_cells: Vec<Cell> = records
        .iter()
        .map(|r| Cell::Labels(r.labels.clone()))
        .collect();
    enriched.set_column(LABELS_COLUMN, label_cells)?;

    for (i, category) in dictionary.iter().enumerate() {
        let flags: Vec<Cell> = records.iter().map(|r| Cell::Bool(r.flags[i])).collect();
        enriched.set_column(&category.label, flags)?;
    }

    info!(rows = enriched.len(), "enrichment complete");

    Ok(EnrichedTable {
        table: enriched,
        labels: dictionary.labels().into_iter().map(String::from).collect(),
    })
}

#[cfg(feature = "parallel")]
fn classify_rows(
    table: &Table,
    statement: StatementColumn,
    dictionary: &KeywordDictionary,
) -> Vec<EnrichedRecord> {
    table
        .rows()
        .par_iter()
        .map(|row| classify_row(row, statement, dictionary))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn classify_rows(
    table: &Table,
    statement: StatementColumn,
    dictionary: &KeywordDictionary,
) -> Vec<EnrichedRecord> {
    table
        .rows()
        .iter()
        .map(|row| classify_row(row, statement, dictionary))
        .collect()
}

fn classify_row(
    row: &[Cell],
    statement: StatementColumn,
    dictionary: &KeywordDictionary,
) -> EnrichedRecord {
    let labels = classify_cell(&row[statement.index()], dictionary);
    EnrichedRecord::from_labels(labels, dictionary)
}
