use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// 词条分类（仅用于展示/浏览，不参与匹配）。
///
/// 反序列化走 [`FromStr`]，与 TSV 列的解析规则一致。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Category {
    #[serde(rename = "Nature/Existence")]
    Nature,
    #[serde(rename = "People/Society")]
    People,
    #[serde(rename = "Actions/Changes")]
    Actions,
    #[serde(rename = "Qualities/Degree")]
    Qualities,
    #[serde(rename = "Modern/Abstract")]
    Modern,
    Compound,
    #[default]
    Unknown,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Nature => "Nature/Existence",
            Category::People => "People/Society",
            Category::Actions => "Actions/Changes",
            Category::Qualities => "Qualities/Degree",
            Category::Modern => "Modern/Abstract",
            Category::Compound => "Compound",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 宽松解析：既接受完整标签（`Nature/Existence`），也接受斜杠前的简称（`nature`）；
/// 无法识别的一律归为 `Unknown`，所以永远不会失败。
impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let head = s.trim().split('/').next().unwrap_or("").trim().to_ascii_lowercase();
        Ok(match head.as_str() {
            "nature" => Category::Nature,
            "people" => Category::People,
            "actions" => Category::Actions,
            "qualities" => Category::Qualities,
            "modern" => Category::Modern,
            "compound" => Category::Compound,
            _ => Category::Unknown,
        })
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(c) => c,
            Err(never) => match never {},
        }
    }
}

/// 数据源里已经做过分析的词条附带的结构（直查命中时原样透传，不重算）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntryAnalysis {
    pub structure: String,
    pub morphemes: Vec<String>,
    pub meaning: String,
    pub match_type: Option<String>,
    pub confidence: Option<f64>,
}

/// 词典条目：英文 -> 汉字。
///
/// 约定：`english` 是小写、去首尾空白后的唯一 key；`chinese` 非空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub english: String,
    pub chinese: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(default)]
    pub category: Category,
    /// 仅用于展示排序
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<EntryAnalysis>,
}

impl LexiconEntry {
    pub fn new(english: impl Into<String>, chinese: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            chinese: chinese.into(),
            pinyin: None,
            category: Category::Unknown,
            priority: 0,
            analysis: None,
        }
    }

    pub fn with_pinyin(mut self, pinyin: impl Into<String>) -> Self {
        self.pinyin = Some(pinyin.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// 命中方式；`Unknown` 表示所有策略都失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Direct,
    Inflection,
    Prefixed,
    Suffixed,
    Fuzzy,
    Compound,
    Unknown,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Direct => "direct",
            MatchKind::Inflection => "inflection",
            MatchKind::Prefixed => "prefixed",
            MatchKind::Suffixed => "suffixed",
            MatchKind::Fuzzy => "fuzzy",
            MatchKind::Compound => "compound",
            MatchKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 拆解片段在词中的角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartRole {
    Base,
    Prefix,
    Suffix,
    Inflection,
    Approximate,
}

/// 拆解片段：`text` 是词面上的原样子串，按顺序拼接可还原输入词。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionPart {
    pub text: String,
    pub role: PartRole,
    pub gloss: String,
    /// 实际查到的词典 key（与 `text` 不同时才有，例如 `happi` -> `happy`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

impl DecompositionPart {
    pub fn new(text: impl Into<String>, role: PartRole, gloss: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role,
            gloss: gloss.into(),
            lemma: None,
        }
    }

    /// 仅当 lemma 与词面不同才记录。
    pub fn with_lemma(mut self, lemma: &str) -> Self {
        if lemma != self.text {
            self.lemma = Some(lemma.to_owned());
        }
        self
    }
}

/// 词源注释：词中出现的古典词根。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootGloss {
    pub root: String,
    pub meaning: String,
    /// 词根在规范化词中的起始位置（字符下标）
    pub offset: usize,
}

/// 一次查询的完整分析结果（交给展示层）。
///
/// 不变式：
/// - `found == true` => `confidence > 0` 且 `matched_entry.is_some()`
/// - `match_kind == Unknown` => `found == false`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub original_input: String,
    pub normalized_word: String,
    pub found: bool,
    pub confidence: f64,
    pub match_kind: MatchKind,
    pub matched_entry: Option<LexiconEntry>,
    pub decomposition: Vec<DecompositionPart>,
    pub suggestions: Vec<LexiconEntry>,
    pub etymology: Vec<RootGloss>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<EntryAnalysis>,
}

impl AnalysisResult {
    /// 未命中结果。
    pub fn unknown(original_input: &str, normalized_word: &str) -> Self {
        Self {
            original_input: original_input.to_owned(),
            normalized_word: normalized_word.to_owned(),
            found: false,
            confidence: 0.0,
            match_kind: MatchKind::Unknown,
            matched_entry: None,
            decomposition: Vec::new(),
            suggestions: Vec::new(),
            etymology: Vec::new(),
            annotation: None,
        }
    }

    /// 展示用的汉字结果（未命中时为 None）。
    pub fn chinese(&self) -> Option<&str> {
        self.matched_entry.as_ref().map(|e| e.chinese.as_str())
    }
}
