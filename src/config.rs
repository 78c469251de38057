use crate::error::{ClassifierError, Result};
use marketing_classifier_common::KeywordDictionary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 辞書パスを上書きする環境変数
pub const DICTIONARY_ENV: &str = "MARKETING_CLASSIFIER_DICTIONARY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// カスタム辞書JSON（未設定なら組み込み辞書）
    pub dictionary_path: Option<PathBuf>,
    /// 分類結果プレビューの行数
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_path: None,
            preview_rows: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ClassifierError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("marketing-classifier").join("config.json"))
    }

    /// 使用する辞書パスを決める（引数 > 環境変数 > 設定ファイル）
    pub fn dictionary_source(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = cli_override {
            return Some(path.to_path_buf());
        }
        // 環境変数を優先
        if let Ok(path) = std::env::var(DICTIONARY_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        self.dictionary_path.clone()
    }

    /// 辞書を読み込む（指定がなければ組み込み辞書）
    pub fn load_dictionary(&self, cli_override: Option<&Path>) -> Result<KeywordDictionary> {
        match self.dictionary_source(cli_override) {
            Some(path) => {
                if !path.exists() {
                    return Err(ClassifierError::FileNotFound(path.display().to_string()));
                }
                let dictionary = KeywordDictionary::from_file(&path).map_err(|e| {
                    ClassifierError::InvalidDictionary(format!("{}: {}", path.display(), e))
                })?;
                debug!(path = %path.display(), categories = dictionary.len(), "loaded dictionary");
                Ok(dictionary)
            }
            None => Ok(KeywordDictionary::builtin()),
        }
    }

    pub fn set_dictionary_path(&mut self, path: Option<PathBuf>) -> Result<()> {
        self.dictionary_path = path;
        self.save()
    }

    pub fn set_preview_rows(&mut self, rows: usize) -> Result<()> {
        if rows == 0 {
            return Err(ClassifierError::Config("プレビュー行数は1以上を指定してください".into()));
        }
        self.preview_rows = rows;
        self.save()
    }
}
