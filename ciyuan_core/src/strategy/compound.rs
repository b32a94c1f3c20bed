use tracing::trace;

use super::{COMPOUND_CONFIDENCE, MatchContext, MatchOutcome, MatchStrategy};
use crate::model::{Category, DecompositionPart, LexiconEntry, MatchKind, PartRole};

/// 复合词切分：按 `AffixTables::compounds()` 的顺序逐条规则尝试。
///
/// 每个部件都必须 >= `compound_min_part` 个字符且能精确查到，否则该方案作废
/// （不存在“部分命中”）。第一个全部部件都能查到的方案胜出。
pub struct CompoundStrategy;

impl MatchStrategy for CompoundStrategy {
    fn name(&self) -> &'static str {
        "compound"
    }

    fn attempt(&self, word: &str, ctx: &MatchContext<'_>) -> Option<MatchOutcome> {
        if word.chars().count() < ctx.config.compound_min_length {
            return None;
        }
        let min_part = ctx.config.compound_min_part;

        for pattern in ctx.tables.compounds() {
            for parts in pattern.segmentations(word, min_part) {
                if parts.len() < 2 || parts.iter().any(|p| p.chars().count() < min_part) {
                    continue;
                }
                let Some(entries) = parts
                    .iter()
                    .map(|p| ctx.lexicon.lookup(p))
                    .collect::<Option<Vec<_>>>()
                else {
                    trace!(pattern = %pattern.name, ?parts, "compound parts unresolved");
                    continue;
                };

                let decomposition = parts
                    .iter()
                    .zip(&entries)
                    .enumerate()
                    .map(|(i, (text, e))| {
                        let role = pattern.roles.get(i).copied().unwrap_or(PartRole::Base);
                        DecompositionPart::new(*text, role, e.chinese.clone())
                    })
                    .collect();
                return Some(
                    MatchOutcome::new(MatchKind::Compound, COMPOUND_CONFIDENCE, synthesize(word, &entries))
                        .with_parts(decomposition),
                );
            }
        }
        None
    }
}

/// 合成复合词条目：汉字按词序拼接；所有部件都有拼音时才拼接拼音。
fn synthesize(word: &str, parts: &[&LexiconEntry]) -> LexiconEntry {
    let chinese: String = parts.iter().map(|e| e.chinese.as_str()).collect();
    let pinyin = parts
        .iter()
        .map(|e| e.pinyin.as_deref())
        .collect::<Option<Vec<_>>>()
        .map(|v| v.join(" "));
    LexiconEntry {
        english: word.to_owned(),
        chinese,
        pinyin,
        category: Category::Compound,
        priority: 0,
        analysis: None,
    }
}
