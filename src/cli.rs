use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marketing-classifier")]
#[command(about = "マーケティング文言（緊急性・限定性）をCSVで一括分類", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSV/Excelファイルを分類して結果を出力
    Classify {
        /// 入力ファイル（Statement列を含むCSV / xlsx）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ディレクトリ（デフォルト: 入力ファイルと同じ場所）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// キーワード辞書JSONファイル
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// 分類結果プレビューの行数（1以上、デフォルト: 設定値）
        #[arg(short, long, value_parser = parse_preview_rows)]
        preview: Option<usize>,

        /// ファイルを書かずにCSVを標準出力へ
        #[arg(long)]
        stdout: bool,
    },

    /// 文言を直接分類
    Text {
        /// 分類する文言
        #[arg(required = true)]
        statements: Vec<String>,

        /// キーワード辞書JSONファイル
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
    },

    /// 使用中のキーワード辞書を表示
    Dictionary {
        /// キーワード辞書JSONファイル
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// JSON形式で出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// デフォルトの辞書ファイルを設定
        #[arg(long)]
        set_dictionary: Option<PathBuf>,

        /// 辞書設定を解除（組み込み辞書に戻す）
        #[arg(long)]
        clear_dictionary: bool,

        /// プレビュー行数を設定（1以上）
        #[arg(long, value_parser = parse_preview_rows)]
        set_preview_rows: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// プレビュー行数（設定ファイルと同じく0は不可）
pub fn parse_preview_rows(s: &str) -> Result<usize, String> {
    let rows: usize = s
        .parse()
        .map_err(|_| format!("Invalid row count: {}", s))?;
    if rows == 0 {
        return Err("Preview rows must be at least 1".to_string());
    }
    Ok(rows)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
