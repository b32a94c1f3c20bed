use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ciyuan_core::{Category, Lexicon, LexiconEntry, LexiconStore};
use serde::Deserialize;
use tracing::{info, warn};

/// 内置兜底词表（TSV）。
const BUILTIN_TSV: &str = include_str!("../asset/lexicon.tsv");

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON lexicon: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TSV line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("TSV line {line}: invalid priority `{value}`")]
    InvalidPriority { line: usize, value: String },

    #[error("unsupported lexicon format `{0}` (expected .tsv or .json)")]
    UnsupportedFormat(String),
}

/// TSV 格式：
///
/// - `english<TAB>chinese[<TAB>pinyin[<TAB>category[<TAB>priority]]]`
/// - 可选列留空即可；priority 省略时为 0
/// - 允许 `#` 开头注释行与空行
pub fn parse_tsv(s: &str) -> Result<Vec<LexiconEntry>, DictError> {
    let mut out = Vec::new();
    for (idx, line) in s.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut it = line.split('\t').map(str::trim);
        let english = it.next().unwrap_or("");
        if english.is_empty() {
            return Err(DictError::MissingField { line: line_no, field: "english" });
        }
        let chinese = it.next().unwrap_or("");
        if chinese.is_empty() {
            return Err(DictError::MissingField { line: line_no, field: "chinese" });
        }
        let pinyin = it.next().filter(|x| !x.is_empty()).map(str::to_owned);
        let category = it
            .next()
            .filter(|x| !x.is_empty())
            .and_then(|x| x.parse::<Category>().ok())
            .unwrap_or_default();
        let priority = match it.next().filter(|x| !x.is_empty()) {
            Some(p) => p.parse::<i32>().map_err(|_| DictError::InvalidPriority {
                line: line_no,
                value: p.to_owned(),
            })?,
            None => 0,
        };

        out.push(LexiconEntry {
            english: english.to_owned(),
            chinese: chinese.to_owned(),
            pinyin,
            category,
            priority,
            analysis: None,
        });
    }
    Ok(out)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonLexicon {
    List(Vec<LexiconEntry>),
    Wrapped { words: Vec<LexiconEntry> },
}

/// JSON 格式：条目数组，或 `{ "words": [...] }`。
pub fn parse_json(s: &str) -> Result<Vec<LexiconEntry>, DictError> {
    let parsed: JsonLexicon = serde_json::from_str(s)?;
    Ok(match parsed {
        JsonLexicon::List(v) | JsonLexicon::Wrapped { words: v } => v,
    })
}

/// 按扩展名加载词典文件（`.tsv`/`.txt` 或 `.json`）。
pub fn load(path: impl AsRef<Path>) -> Result<LexiconStore, DictError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let s = fs::read_to_string(path).map_err(|source| DictError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = match ext.as_str() {
        "tsv" | "txt" => parse_tsv(&s)?,
        "json" => parse_json(&s)?,
        _ => return Err(DictError::UnsupportedFormat(ext)),
    };
    let store = LexiconStore::new(entries);
    info!(path = %path.display(), entries = store.len(), "lexicon loaded");
    Ok(store)
}

/// 内置兜底词表。
pub fn builtin() -> Result<LexiconStore, DictError> {
    Ok(LexiconStore::new(parse_tsv(BUILTIN_TSV)?))
}

/// 有路径就加载文件，失败时退回内置词表；没有路径直接用内置词表。
pub fn load_or_builtin(path: Option<&Path>) -> Result<LexiconStore, DictError> {
    let Some(path) = path else {
        return builtin();
    };
    match load(path) {
        Ok(store) => Ok(store),
        Err(err) => {
            warn!(%err, "falling back to builtin lexicon");
            builtin()
        }
    }
}
