use super::{
    MatchContext, MatchOutcome, MatchStrategy, PREFIX_CONFIDENCE, SUFFIX_CONFIDENCE, lookup_lemma,
};
use crate::model::{DecompositionPart, LexiconEntry, MatchKind, PartRole};

/// 去前缀后查词干：汉字 = 前缀释义 + 词干汉字。
///
/// 前缀按表顺序尝试；剥离后词干字符数须 >= `min_affix_stem`。
pub struct PrefixStrategy;

impl MatchStrategy for PrefixStrategy {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn attempt(&self, word: &str, ctx: &MatchContext<'_>) -> Option<MatchOutcome> {
        for rule in ctx.tables.prefixes() {
            let Some(stem) = word.strip_prefix(rule.text.as_str()) else {
                continue;
            };
            if stem.chars().count() < ctx.config.min_affix_stem {
                continue;
            }
            let Some(base) = ctx.lexicon.lookup(stem) else {
                continue;
            };
            let entry = synthesize(word, format!("{}{}", rule.meaning, base.chinese), base);
            let parts = vec![
                DecompositionPart::new(rule.text.clone(), PartRole::Prefix, rule.meaning.clone()),
                DecompositionPart::new(stem, PartRole::Base, base.chinese.clone()),
            ];
            return Some(
                MatchOutcome::new(MatchKind::Prefixed, PREFIX_CONFIDENCE, entry).with_parts(parts),
            );
        }
        None
    }
}

/// 去派生后缀后查词干：汉字 = 词干汉字 + 后缀释义。
///
/// 词干允许拼写还原（`happi` -> `happy`），见 `lemma_candidates`。
pub struct SuffixStrategy;

impl MatchStrategy for SuffixStrategy {
    fn name(&self) -> &'static str {
        "suffix"
    }

    fn attempt(&self, word: &str, ctx: &MatchContext<'_>) -> Option<MatchOutcome> {
        for rule in ctx.tables.suffixes() {
            let Some(stem) = word.strip_suffix(rule.text.as_str()) else {
                continue;
            };
            if stem.chars().count() < ctx.config.min_affix_stem {
                continue;
            }
            let Some((lemma, base)) = lookup_lemma(ctx.lexicon, stem) else {
                continue;
            };
            let entry = synthesize(word, format!("{}{}", base.chinese, rule.meaning), base);
            let parts = vec![
                DecompositionPart::new(stem, PartRole::Base, base.chinese.clone()).with_lemma(&lemma),
                DecompositionPart::new(rule.text.clone(), PartRole::Suffix, rule.meaning.clone()),
            ];
            return Some(
                MatchOutcome::new(MatchKind::Suffixed, SUFFIX_CONFIDENCE, entry).with_parts(parts),
            );
        }
        None
    }
}

/// 合成临时条目：沿用词干的分类与排序权重；拼音无法推出，留空。
fn synthesize(word: &str, chinese: String, base: &LexiconEntry) -> LexiconEntry {
    LexiconEntry {
        english: word.to_owned(),
        chinese,
        pinyin: None,
        category: base.category,
        priority: base.priority,
        analysis: None,
    }
}
