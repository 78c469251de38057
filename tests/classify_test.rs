//! 分類処理の統合テスト
//!
//! 読み込み → 分類 → 件数集計 → CSV化の流れを検証

use marketing_classifier::input::{self, InputKind};
use marketing_classifier_common::dictionary::{EXCLUSIVE_MARKETING, URGENCY_MARKETING};
use marketing_classifier_common::export::excel_core::{generate_excel_buffer, generate_table_buffer};
use marketing_classifier_common::{
    classify, enrich, parse_csv, process_upload, Cell, KeywordDictionary, Table, LABELS_COLUMN,
};
use tempfile::tempdir;

const SAMPLE_CSV: &str = "id,Statement,channel\n\
1,\"Limited time offer, act now!\",web\n\
2,Join our exclusive VIP members only event,mail\n\
3,\"Exclusive offer — act now, limited supply!\",web\n\
4,Our new product line is now available,print\n";

/// 代表的な文言の分類結果
#[test]
fn test_concrete_scenarios() {
    let dict = KeywordDictionary::builtin();

    assert_eq!(classify("Limited time offer, act now!", &dict), vec![URGENCY_MARKETING]);
    assert_eq!(
        classify("Join our exclusive VIP members only event", &dict),
        vec![EXCLUSIVE_MARKETING]
    );
    assert_eq!(
        classify("Exclusive offer — act now, limited supply!", &dict),
        vec![URGENCY_MARKETING, EXCLUSIVE_MARKETING]
    );
    assert!(classify("Our new product line is now available", &dict).is_empty());
}

/// ラベルはいずれかのフレーズが部分一致する場合に限り付与される
#[test]
fn test_label_iff_phrase_substring() {
    let dict = KeywordDictionary::builtin();
    let texts = [
        "HURRY UP",
        "a privileged few",
        "Selling Fast and selling out",
        "nothing to see",
        "early accessory",
        "",
        "3.14159",
    ];

    for text in texts {
        let labels = classify(text, &dict);
        let lower = text.to_lowercase();
        for category in dict.iter() {
            let expected = category.phrases.iter().any(|p| lower.contains(p.as_str()));
            assert_eq!(
                labels.contains(&category.label),
                expected,
                "text={:?} label={}",
                text,
                category.label
            );
        }
    }
}

/// アップロード1件分の処理
#[test]
fn test_process_upload_end_to_end() {
    let dict = KeywordDictionary::builtin();
    let outcome = process_upload(SAMPLE_CSV.as_bytes(), "campaign.csv", &dict).expect("処理失敗");

    let table = outcome.enriched.table();
    assert_eq!(
        table.columns(),
        &["id", "Statement", "channel", LABELS_COLUMN, URGENCY_MARKETING, EXCLUSIVE_MARKETING]
    );

    let ids: Vec<String> = table.rows().iter().map(|r| r[0].to_string()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);

    assert_eq!(outcome.counts[0].label, URGENCY_MARKETING);
    assert_eq!(outcome.counts[0].count, 2);
    assert_eq!(outcome.counts[1].label, EXCLUSIVE_MARKETING);
    assert_eq!(outcome.counts[1].count, 2);

    assert_eq!(outcome.export.file_name, "campaign_classified.csv");
    let text = String::from_utf8(outcome.export.bytes).unwrap();
    assert!(text.contains("\"['urgency_marketing', 'exclusive_marketing']\",True,True"));
}

/// 派生列を除いて再分類しても同じ真偽値列になる
#[test]
fn test_reenrichment_matches() {
    let dict = KeywordDictionary::builtin();
    let outcome = process_upload(SAMPLE_CSV.as_bytes(), "a.csv", &dict).unwrap();

    let again = enrich(&outcome.enriched.strip_derived(), &dict).unwrap();
    for label in [URGENCY_MARKETING, EXCLUSIVE_MARKETING] {
        let first: Vec<&Cell> = outcome.enriched.table().column_values(label).unwrap().collect();
        let second: Vec<&Cell> = again.table().column_values(label).unwrap().collect();
        assert_eq!(first, second);
    }
}

/// カスタム辞書のカテゴリがそのまま列になる
#[test]
fn test_custom_dictionary_columns() {
    let dict = KeywordDictionary::from_json(
        r#"{"categories": [
            {"label": "free_offer", "phrases": ["free", "no cost"]},
            {"label": "urgency_marketing", "phrases": ["hurry"]},
            {"label": "social_proof", "phrases": ["best seller", "5 stars"]}
        ]}"#,
    )
    .unwrap();

    let outcome = process_upload(
        b"Statement\nHurry! Free shipping on our best seller\nplain text\n",
        "x.csv",
        &dict,
    )
    .unwrap();

    let table = outcome.enriched.table();
    assert_eq!(
        table.columns(),
        &["Statement", "labels", "free_offer", "urgency_marketing", "social_proof"]
    );
    assert_eq!(
        outcome.enriched.row_labels()[0],
        &["free_offer", "urgency_marketing", "social_proof"]
    );
    assert!(outcome.counts.iter().all(|c| c.count == 1));
}

/// 数値や空のStatementも文字列として扱う
#[test]
fn test_numeric_and_empty_statements() {
    let dict = KeywordDictionary::builtin();
    let outcome = process_upload(b"Statement,n\n42,1\n,2\n", "nums.csv", &dict).unwrap();

    assert_eq!(outcome.enriched.len(), 2);
    assert!(outcome.counts.iter().all(|c| c.count == 0));
}

/// Excel入力も同じ表として読み込める
#[test]
fn test_spreadsheet_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let dict = KeywordDictionary::builtin();

    let source = process_upload(SAMPLE_CSV.as_bytes(), "a.csv", &dict).unwrap();
    let buffer = generate_excel_buffer(&source.enriched).expect("Excel生成失敗");
    let path = dir.path().join("upload.xlsx");
    std::fs::write(&path, buffer).unwrap();

    let table = input::load_table(&path).expect("Excel読み込み失敗");
    assert_eq!(table.columns(), source.enriched.table().columns());
    assert_eq!(table.len(), 4);
    assert_eq!(table.rows()[2][4], Cell::text("True"));

    let enriched = enrich(&table, &dict).unwrap();
    assert_eq!(enriched.category_counts(), source.counts);
}

/// CSVファイル読み込み
#[test]
fn test_csv_file_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.CSV");
    std::fs::write(&path, SAMPLE_CSV).unwrap();

    assert_eq!(InputKind::from_path(&path).unwrap(), InputKind::Csv);
    let table = input::load_table(&path).unwrap();
    assert_eq!(table.len(), 4);
}

/// 重複・空の列名はCSVとExcelで同じ名前になる
#[test]
fn test_spreadsheet_duplicate_headers_match_csv() {
    let dir = tempdir().expect("Failed to create temp dir");

    let sheet = Table::from_rows(
        vec!["Statement".into(), "Statement".into(), "".into(), "Statement".into()],
        vec![vec![
            Cell::text("hurry"),
            Cell::text("vip"),
            Cell::text("x"),
            Cell::text("plain"),
        ]],
    )
    .unwrap();
    let path = dir.path().join("dupes.xlsx");
    std::fs::write(&path, generate_table_buffer(&sheet).expect("Excel生成失敗")).unwrap();

    let from_xlsx = input::load_table(&path).expect("Excel読み込み失敗");
    let from_csv = parse_csv(b"Statement,Statement,,Statement\nhurry,vip,x,plain\n").unwrap();

    assert_eq!(
        from_xlsx.columns(),
        &["Statement", "Statement.1", "Unnamed: 2", "Statement.2"]
    );
    assert_eq!(from_xlsx.columns(), from_csv.columns());

    // 分類対象は最初のStatement列
    let enriched = enrich(&from_xlsx, &KeywordDictionary::builtin()).unwrap();
    assert_eq!(enriched.row_labels()[0], &[URGENCY_MARKETING]);
}
