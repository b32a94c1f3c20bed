//! `strategy`：匹配策略链。
//!
//! 每个策略实现 [`MatchStrategy::attempt`]：命中返回 `Some(MatchOutcome)`，
//! 否则返回 `None` 交给下一个策略。engine 按固定顺序逐个尝试，**第一个命中即返回**，
//! 不同策略的结果不会合并。
//!
//! 默认链路（[`default_chain`]）：
//! - `DirectStrategy`：精确查词（1.0）
//! - `InflectionStrategy`：去屈折后缀（0.95）
//! - `PrefixStrategy`：去前缀（0.85）
//! - `SuffixStrategy`：去派生后缀（0.80）
//! - `FuzzyStrategy`：字符集合相似度（置信度 = 相似度）
//! - `CompoundStrategy`：复合词结构切分（0.75）
mod affix;
mod compound;
mod direct;
mod fuzzy;
mod inflection;

pub use affix::{PrefixStrategy, SuffixStrategy};
pub use compound::CompoundStrategy;
pub use direct::DirectStrategy;
pub use fuzzy::FuzzyStrategy;
pub use inflection::InflectionStrategy;

use crate::{
    config::EngineConfig,
    lexicon::Lexicon,
    model::{DecompositionPart, EntryAnalysis, LexiconEntry, MatchKind},
    rules::AffixTables,
};

pub const DIRECT_CONFIDENCE: f64 = 1.0;
pub const INFLECTION_CONFIDENCE: f64 = 0.95;
pub const PREFIX_CONFIDENCE: f64 = 0.85;
pub const SUFFIX_CONFIDENCE: f64 = 0.80;
pub const COMPOUND_CONFIDENCE: f64 = 0.75;

/// 策略运行时可见的只读环境。
#[derive(Clone, Copy)]
pub struct MatchContext<'a> {
    pub lexicon: &'a dyn Lexicon,
    pub tables: &'a AffixTables,
    pub config: &'a EngineConfig,
}

/// 单个策略的命中结果。
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub kind: MatchKind,
    pub confidence: f64,
    /// 命中的条目（可能是临时合成的，不会写回词典）
    pub entry: LexiconEntry,
    pub decomposition: Vec<DecompositionPart>,
    pub suggestions: Vec<LexiconEntry>,
    pub annotation: Option<EntryAnalysis>,
}

impl MatchOutcome {
    pub fn new(kind: MatchKind, confidence: f64, entry: LexiconEntry) -> Self {
        Self {
            kind,
            confidence,
            entry,
            decomposition: Vec::new(),
            suggestions: Vec::new(),
            annotation: None,
        }
    }

    pub fn with_parts(mut self, parts: Vec<DecompositionPart>) -> Self {
        self.decomposition = parts;
        self
    }
}

/// 匹配策略：输入已经规范化（去空白 + 小写）的词。
pub trait MatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn attempt(&self, word: &str, ctx: &MatchContext<'_>) -> Option<MatchOutcome>;
}

/// 默认策略链（顺序即优先级）。
pub fn default_chain() -> Vec<Box<dyn MatchStrategy>> {
    vec![
        Box::new(DirectStrategy),
        Box::new(InflectionStrategy),
        Box::new(PrefixStrategy),
        Box::new(SuffixStrategy),
        Box::new(FuzzyStrategy),
        Box::new(CompoundStrategy),
    ]
}

/// 去掉后缀后的词干可能发生过拼写变化，按顺序给出要查的 lemma：
/// 原样、`i -> y`、补回 `e`、双写辅音还原。
///
/// 少于 2 个字符的词干只查原样，避免 `bed` -> `b` -> `be` 这类误判。
pub(crate) fn lemma_candidates(stem: &str) -> Vec<String> {
    let mut out = vec![stem.to_owned()];
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n < 2 {
        return out;
    }
    if chars[n - 1] == 'i' {
        let mut s: String = chars[..n - 1].iter().collect();
        s.push('y');
        out.push(s);
    }
    if chars[n - 1] != 'e' {
        out.push(format!("{stem}e"));
    }
    if chars[n - 1] == chars[n - 2] && is_consonant(chars[n - 1]) {
        out.push(chars[..n - 1].iter().collect());
    }
    out
}

/// 按 [`lemma_candidates`] 的顺序查词，返回第一个命中的 (lemma, 条目)。
pub(crate) fn lookup_lemma<'a>(
    lexicon: &'a dyn Lexicon,
    stem: &str,
) -> Option<(String, &'a LexiconEntry)> {
    lemma_candidates(stem)
        .into_iter()
        .find_map(|lemma| lexicon.lookup(&lemma).map(|e| (lemma, e)))
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
