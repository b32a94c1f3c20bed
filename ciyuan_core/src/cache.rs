//! `cache`：会话内结果缓存。
//!
//! 约定：
//! - key 是规范化后的词
//! - 每个 key 只写一次（先写者胜），命中后不失效；没有 TTL，也没有淘汰
//! - 内部用 `RwLock`，允许多个 `resolve` 并发
use std::{
    collections::HashMap,
    sync::{
        RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::model::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
pub struct ResultCache {
    map: RwLock<HashMap<String, AnalysisResult>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, normalized_word: &str) -> Option<AnalysisResult> {
        let map = self.map.read().unwrap_or_else(|e| e.into_inner());
        let hit = map.get(normalized_word).cloned();
        match hit {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        hit
    }

    /// 写入结果；已有同 key 时保留旧值。
    pub fn put(&self, normalized_word: &str, result: AnalysisResult) {
        let mut map = self.map.write().unwrap_or_else(|e| e.into_inner());
        map.entry(normalized_word.to_owned()).or_insert(result);
    }

    pub fn len(&self) -> usize {
        self.map.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 会话结束时清空。
    pub fn clear(&self) {
        self.map.write().unwrap_or_else(|e| e.into_inner()).clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let cache = ResultCache::new();
        cache.put("cat", AnalysisResult::unknown("cat", "cat"));
        cache.put("cat", AnalysisResult::unknown("CAT", "cat"));
        assert_eq!(cache.get("cat").unwrap().original_input, "cat");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let cache = ResultCache::new();
        assert!(cache.get("dog").is_none());
        cache.put("dog", AnalysisResult::unknown("dog", "dog"));
        assert!(cache.get("dog").is_some());
        assert!(cache.get("dog").is_some());
        assert_eq!(cache.stats(), CacheStats { entries: 1, hits: 2, misses: 1 });

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
