use super::{DIRECT_CONFIDENCE, MatchContext, MatchOutcome, MatchStrategy};
use crate::model::MatchKind;

/// 精确查词；条目自带的 `analysis` 原样透传。
pub struct DirectStrategy;

impl MatchStrategy for DirectStrategy {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn attempt(&self, word: &str, ctx: &MatchContext<'_>) -> Option<MatchOutcome> {
        let entry = ctx.lexicon.lookup(word)?;
        let mut outcome = MatchOutcome::new(MatchKind::Direct, DIRECT_CONFIDENCE, entry.clone());
        outcome.annotation = entry.analysis.clone();
        Some(outcome)
    }
}
