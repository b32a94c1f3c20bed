//! 字符串相似度（模糊匹配打分）。
//!
//! 规则：
//! - 完全相同：1.0
//! - 一方是另一方的子串：0.9
//! - 否则：字符集合的 Jaccard 系数 |A ∩ B| / |A ∪ B|
//!
//! 空串只与空串相似（1.0），与任何非空串为 0.0。
use std::collections::BTreeSet;

pub const IDENTICAL: f64 = 1.0;
pub const CONTAINED: f64 = 0.9;

pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return IDENTICAL;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(b) || b.contains(a) {
        return CONTAINED;
    }
    jaccard(a, b)
}

/// 字符集合的 Jaccard 系数。
pub fn jaccard(a: &str, b: &str) -> f64 {
    let sa: BTreeSet<char> = a.chars().collect();
    let sb: BTreeSet<char> = b.chars().collect();
    let union = sa.union(&sb).count();
    if union == 0 {
        return 1.0;
    }
    sa.intersection(&sb).count() as f64 / union as f64
}
