//! Marketing Classifier Common Library
//!
//! CLIとライブラリ利用者で共有される型と分類ロジック

pub mod classifier;
pub mod csv_reader;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod table;
pub mod workflow;

pub use classifier::{classify, classify_cell, enrich, CategoryCount, EnrichedRecord, EnrichedTable, LABELS_COLUMN};
pub use csv_reader::{dedupe_columns, parse_csv};
pub use dictionary::{Category, KeywordDictionary};
pub use error::{Error, Result};
pub use export::{serialize, suggested_file_name, CsvExport};
pub use table::{Cell, StatementColumn, Table, STATEMENT_COLUMN};
pub use workflow::{process_table, process_upload, ClassificationOutcome};
