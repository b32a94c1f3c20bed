use super::{MatchContext, MatchOutcome, MatchStrategy};
use crate::{
    filter::{Filter, Scored, ThresholdRankTruncate},
    model::{DecompositionPart, MatchKind, PartRole},
    similarity::similarity,
};

/// 模糊匹配：在长度窗口内按 [`similarity`] 打分。
///
/// 得分 >= `fuzzy_threshold` 的候选按分数倒序（同分按插入顺序），
/// 第一名作为命中（置信度 = 其得分），其后最多 `max_suggestions` 个作为备选。
pub struct FuzzyStrategy;

impl MatchStrategy for FuzzyStrategy {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn attempt(&self, word: &str, ctx: &MatchContext<'_>) -> Option<MatchOutcome> {
        let len = word.chars().count();
        let radius = ctx.config.fuzzy_length_radius;

        let window = len.saturating_sub(radius)..=len.saturating_add(radius);
        let scored: Vec<Scored<'_>> = ctx
            .lexicon
            .entries_in_length_range(window)
            .into_iter()
            .map(|(ordinal, entry)| Scored {
                ordinal,
                score: similarity(word, &entry.english),
                entry,
            })
            .collect();

        let ranked = ThresholdRankTruncate {
            min_score: ctx.config.fuzzy_threshold,
            limit: ctx.config.max_suggestions.saturating_add(1),
        }
        .apply(scored);

        let mut ranked = ranked.into_iter();
        let best = ranked.next()?;
        let part = DecompositionPart::new(word, PartRole::Approximate, best.entry.chinese.clone())
            .with_lemma(&best.entry.english);
        let mut outcome = MatchOutcome::new(MatchKind::Fuzzy, best.score, best.entry.clone())
            .with_parts(vec![part]);
        outcome.suggestions = ranked.map(|s| s.entry.clone()).collect();
        Some(outcome)
    }
}
