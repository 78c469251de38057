use anyhow::Context;
use clap::Parser;
use marketing_classifier::{cli, config, export, input, report};
use marketing_classifier_common::{classify, process_table, KeywordDictionary};
use cli::{Cli, Commands, ExportFormat};
use config::Config;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// アップロード直後のプレビュー行数
const INPUT_PREVIEW_ROWS: usize = 5;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Classify { input, output, format, dictionary, preview, stdout } => {
            let dictionary = config.load_dictionary(dictionary.as_deref())?;
            let preview_rows = preview.unwrap_or(config.preview_rows);

            if stdout {
                classify_to_stdout(&input, &dictionary)?;
            } else {
                classify_file(&input, output, format, &dictionary, preview_rows)?;
            }
        }

        Commands::Text { statements, dictionary } => {
            let dictionary = config.load_dictionary(dictionary.as_deref())?;
            for statement in &statements {
                let labels = classify(statement, &dictionary);
                if labels.is_empty() {
                    println!("- {}  →  (該当なし)", statement);
                } else {
                    println!("✔ {}  →  {}", statement, labels.join(", "));
                }
            }
        }

        Commands::Dictionary { dictionary, json } => {
            let dictionary = config.load_dictionary(dictionary.as_deref())?;
            if json {
                println!("{}", dictionary.to_json_pretty()?);
            } else {
                println!("キーワード辞書（{}カテゴリ）:", dictionary.len());
                for category in dictionary.iter() {
                    println!("  {} ({}語)", category.label, category.phrases.len());
                    for phrase in &category.phrases {
                        println!("    - {}", phrase);
                    }
                }
            }
        }

        Commands::Config { set_dictionary, clear_dictionary, set_preview_rows, show } => {
            let mut config = config;

            if let Some(path) = set_dictionary {
                // 保存前に読めることを確認
                KeywordDictionary::from_file(&path)
                    .with_context(|| format!("辞書を読み込めません: {}", path.display()))?;
                config.set_dictionary_path(Some(path))?;
                println!("✔ 辞書ファイルを設定しました");
            }

            if clear_dictionary {
                config.set_dictionary_path(None)?;
                println!("✔ 組み込み辞書に戻しました");
            }

            if let Some(rows) = set_preview_rows {
                config.set_preview_rows(rows)?;
                println!("✔ プレビュー行数を{}行に設定しました", rows);
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  辞書: {}",
                    config
                        .dictionary_source(None)
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  プレビュー行数: {}", config.preview_rows);
            }
        }
    }

    Ok(())
}

fn classify_file(
    input: &Path,
    output: Option<PathBuf>,
    format: ExportFormat,
    dictionary: &KeywordDictionary,
    preview_rows: usize,
) -> anyhow::Result<()> {
    println!("🔍 marketing-classifier - 文言分類\n");

    // 1. 読み込み
    println!("[1/3] ファイルを読み込み中...");
    let table = input::load_table(input)
        .with_context(|| format!("読み込みに失敗: {}", input.display()))?;
    println!("✔ {}行 × {}列を読み込み\n", table.len(), table.columns().len());

    println!("アップロードデータのプレビュー:");
    println!("{}\n", report::render_table(&table.head(INPUT_PREVIEW_ROWS)));

    // 2. 分類
    println!("[2/3] 分類中...");
    let file_name = original_name(input);
    let outcome = process_table(&table, &file_name, dictionary)?;
    println!("✔ 分類完了\n");

    println!("分類結果（先頭{}行）:", preview_rows);
    println!("{}\n", report::render_table(&outcome.enriched.head(preview_rows)));

    println!("カテゴリ件数:");
    println!("{}\n", report::render_counts(&outcome.counts));

    // 3. 出力
    println!("[3/3] 結果を保存中...");
    let output_dir = output.unwrap_or_else(|| {
        input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    let written = export::export_results(&outcome, format, &output_dir, &file_name)?;
    for file in &written {
        debug!(path = %file.path.display(), bytes = file.bytes, "wrote output");
    }

    info!(rows = outcome.enriched.len(), files = written.len(), "classification finished");
    println!("\n✅ 処理完了");
    Ok(())
}

fn classify_to_stdout(input: &Path, dictionary: &KeywordDictionary) -> anyhow::Result<()> {
    let table = input::load_table(input)
        .with_context(|| format!("読み込みに失敗: {}", input.display()))?;
    let outcome = process_table(&table, &original_name(input), dictionary)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&outcome.export.bytes)?;
    stdout.flush()?;
    Ok(())
}

fn original_name(input: &Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
