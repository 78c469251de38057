//! キーワード辞書モジュール
//!
//! カテゴリ名 → トリガーフレーズ集合の対応表。
//! 構築後は不変で、分類器には参照で渡す。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 緊急性訴求カテゴリ
pub const URGENCY_MARKETING: &str = "urgency_marketing";
/// 限定性訴求カテゴリ
pub const EXCLUSIVE_MARKETING: &str = "exclusive_marketing";

/// 1カテゴリ分の定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    /// 小文字化済みのフレーズ（重複なし、順序は意味を持たない）
    pub phrases: BTreeSet<String>,
}

impl Category {
    pub fn new<I, S>(label: impl Into<String>, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            label: label.into(),
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// 小文字化済みテキストにいずれかのフレーズが含まれるか
    pub fn matches_lowercased(&self, text_lower: &str) -> bool {
        self.phrases.iter().any(|p| text_lower.contains(p.as_str()))
    }
}

/// キーワード辞書
///
/// カテゴリの並び順がそのまま分類結果のラベル順・追加列の順になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordDictionary {
    categories: Vec<Category>,
}

/// JSONファイル形式
#[derive(Deserialize)]
struct DictionaryFile {
    categories: Vec<RawCategory>,
}

#[derive(Deserialize)]
struct RawCategory {
    label: String,
    #[serde(default)]
    phrases: Vec<String>,
}

impl KeywordDictionary {
    /// カテゴリ一覧から辞書を構築（検証付き）
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        if categories.is_empty() {
            return Err(Error::Dictionary("at least one category is required".into()));
        }

        let mut seen = BTreeSet::new();
        for category in &categories {
            let label = category.label.trim();
            if label.is_empty() {
                return Err(Error::Dictionary("category label must not be empty".into()));
            }
            if label != category.label {
                return Err(Error::Dictionary(format!(
                    "category label has surrounding whitespace: '{}'",
                    category.label
                )));
            }
            if !seen.insert(label.to_string()) {
                return Err(Error::Dictionary(format!("duplicate category label: {}", label)));
            }
            if category.phrases.is_empty() {
                return Err(Error::Dictionary(format!(
                    "category '{}' has no phrases",
                    label
                )));
            }
        }

        Ok(Self { categories })
    }

    /// 組み込み辞書（urgency / exclusive の2カテゴリ）
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                Category::new(
                    URGENCY_MARKETING,
                    [
                        "limited", "limited time", "limited run", "limited edition", "order now",
                        "last chance", "hurry", "while supplies last", "before they're gone",
                        "selling out", "selling fast", "act now", "don't wait", "today only",
                        "expires soon", "final hours", "almost gone",
                    ],
                ),
                Category::new(
                    EXCLUSIVE_MARKETING,
                    [
                        "exclusive", "exclusively", "exclusive offer", "exclusive deal",
                        "members only", "vip", "special access", "invitation only",
                        "premium", "privileged", "limited access", "select customers",
                        "insider", "private sale", "early access",
                    ],
                ),
            ],
        }
    }

    /// JSON文字列から読み込み
    ///
    /// 形式: `{"categories":[{"label":"...","phrases":["..."]}]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DictionaryFile = serde_json::from_str(json)?;
        let categories = file
            .categories
            .into_iter()
            .map(|c| Category::new(c.label, c.phrases))
            .collect();
        Self::new(categories)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// ラベル一覧（辞書順）
    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn phrases(&self, label: &str) -> Option<&BTreeSet<String>> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| &c.phrases)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c.label == label)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for KeywordDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
