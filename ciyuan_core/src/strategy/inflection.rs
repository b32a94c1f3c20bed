use super::{INFLECTION_CONFIDENCE, MatchContext, MatchOutcome, MatchStrategy, lookup_lemma};
use crate::model::{DecompositionPart, MatchKind, PartRole};

/// 去屈折后缀（复数、过去式、进行时、比较级……）后查词干。
///
/// 后缀顺序由 `AffixTables` 决定（长的在前）；词干至少 1 个字符。
/// 命中的条目就是词干条目本身，汉字不变。
pub struct InflectionStrategy;

impl MatchStrategy for InflectionStrategy {
    fn name(&self) -> &'static str {
        "inflection"
    }

    fn attempt(&self, word: &str, ctx: &MatchContext<'_>) -> Option<MatchOutcome> {
        for rule in ctx.tables.inflections() {
            let Some(stem) = word.strip_suffix(rule.text.as_str()) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let Some((lemma, entry)) = lookup_lemma(ctx.lexicon, stem) else {
                continue;
            };
            let parts = vec![
                DecompositionPart::new(stem, PartRole::Base, entry.chinese.clone()).with_lemma(&lemma),
                DecompositionPart::new(rule.text.clone(), PartRole::Inflection, rule.meaning.clone()),
            ];
            return Some(
                MatchOutcome::new(MatchKind::Inflection, INFLECTION_CONFIDENCE, entry.clone())
                    .with_parts(parts),
            );
        }
        None
    }
}
