//! `filter`：候选后处理（阈值过滤/排序/去重/裁剪）。

use std::cmp::Ordering;

use crate::model::LexiconEntry;

/// 带分数的候选；`ordinal` 是条目在词典中的插入序号。
#[derive(Debug, Clone, Copy)]
pub struct Scored<'a> {
    pub ordinal: usize,
    pub score: f64,
    pub entry: &'a LexiconEntry,
}

/// Filter：对候选列表做后处理。
pub trait Filter: Send + Sync {
    fn apply<'a>(&self, candidates: Vec<Scored<'a>>) -> Vec<Scored<'a>>;
}

/// 默认 filter：丢弃低于 `min_score` 的候选，按分数倒序、同分按插入序号，
/// 按序号去重，截断到 `limit`。
pub struct ThresholdRankTruncate {
    pub min_score: f64,
    pub limit: usize,
}

impl Filter for ThresholdRankTruncate {
    fn apply<'a>(&self, mut candidates: Vec<Scored<'a>>) -> Vec<Scored<'a>> {
        candidates.retain(|c| c.score >= self.min_score);
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.ordinal.cmp(&b.ordinal))
        });
        candidates.dedup_by_key(|c| c.ordinal);
        candidates.truncate(self.limit);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_score_then_ordinal() {
        let a = LexiconEntry::new("a", "甲");
        let b = LexiconEntry::new("b", "乙");
        let c = LexiconEntry::new("c", "丙");
        let d = LexiconEntry::new("d", "丁");
        let input = vec![
            Scored { ordinal: 3, score: 0.8, entry: &d },
            Scored { ordinal: 0, score: 0.5, entry: &a },
            Scored { ordinal: 2, score: 0.9, entry: &c },
            Scored { ordinal: 1, score: 0.8, entry: &b },
        ];
        let out = ThresholdRankTruncate { min_score: 0.7, limit: 2 }.apply(input);
        let names: Vec<_> = out.iter().map(|s| s.entry.english.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
    }

    #[test]
    fn duplicates_removed() {
        let a = LexiconEntry::new("a", "甲");
        let input = vec![
            Scored { ordinal: 0, score: 0.9, entry: &a },
            Scored { ordinal: 0, score: 0.9, entry: &a },
        ];
        let out = ThresholdRankTruncate { min_score: 0.0, limit: 10 }.apply(input);
        assert_eq!(out.len(), 1);
    }
}
