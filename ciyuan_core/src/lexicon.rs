//! `lexicon`：词典抽象与内存实现。
//!
//! 约定：
//! - key 一律经过 [`normalize`]（去首尾空白 + 小写），因此查询大小写无关
//! - 每个条目有一个**插入序号**（ordinal），模糊匹配用它做同分时的稳定排序
//! - 词典在启动时一次性构建，之后只读
use std::{
    collections::{BTreeMap, HashMap},
    ops::RangeInclusive,
};

use tracing::{debug, warn};

use crate::model::LexiconEntry;

/// 规范化输入：去首尾空白并转小写。
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 词典抽象：engine 不关心词条来自文件/内存/网络。
pub trait Lexicon: Send + Sync {
    /// 精确查询（key 大小写无关）。
    fn lookup(&self, word: &str) -> Option<&LexiconEntry>;

    /// 指定长度（按字符计）的全部条目，附带插入序号，按插入顺序排列。
    fn entries_of_length(&self, len: usize) -> Vec<(usize, &LexiconEntry)>;

    /// 长度落在 `lengths` 内的全部条目，附带插入序号；先按长度、再按插入顺序。
    fn entries_in_length_range(&self, lengths: RangeInclusive<usize>) -> Vec<(usize, &LexiconEntry)>;

    /// 指定首字母的全部条目，按插入顺序排列。
    fn entries_with_initial(&self, initial: char) -> Vec<&LexiconEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 内存词典：主表 + 按长度/首字母的二级索引（索引里存的是插入序号）。
#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    entries: Vec<LexiconEntry>,
    by_key: HashMap<String, usize>,
    by_length: BTreeMap<usize, Vec<usize>>,
    by_initial: BTreeMap<char, Vec<usize>>,
}

impl LexiconStore {
    /// 按顺序构建词典。
    ///
    /// - 重复 key：后写覆盖前写，但保留首次出现的插入序号
    /// - key 或 `chinese` 为空的条目会被丢弃
    pub fn new(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let mut store = Self::default();
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    fn insert(&mut self, mut entry: LexiconEntry) {
        let key = normalize(&entry.english);
        if key.is_empty() || entry.chinese.trim().is_empty() {
            warn!(english = %entry.english, "dropping lexicon entry with empty key or chinese");
            return;
        }
        entry.english = key.clone();

        if let Some(&ordinal) = self.by_key.get(&key) {
            debug!(%key, ordinal, "duplicate lexicon key, last write wins");
            self.entries[ordinal] = entry;
            return;
        }

        let ordinal = self.entries.len();
        self.by_length
            .entry(key.chars().count())
            .or_default()
            .push(ordinal);
        if let Some(initial) = key.chars().next() {
            self.by_initial.entry(initial).or_default().push(ordinal);
        }
        self.by_key.insert(key, ordinal);
        self.entries.push(entry);
    }

    /// 全部条目（插入顺序）。
    pub fn iter(&self) -> impl Iterator<Item = &LexiconEntry> {
        self.entries.iter()
    }

    /// 已出现的首字母（升序），供浏览界面使用。
    pub fn initials(&self) -> impl Iterator<Item = char> + '_ {
        self.by_initial.keys().copied()
    }
}

impl FromIterator<LexiconEntry> for LexiconStore {
    fn from_iter<I: IntoIterator<Item = LexiconEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Lexicon for LexiconStore {
    fn lookup(&self, word: &str) -> Option<&LexiconEntry> {
        let key = normalize(word);
        self.by_key.get(&key).map(|&i| &self.entries[i])
    }

    fn entries_of_length(&self, len: usize) -> Vec<(usize, &LexiconEntry)> {
        self.by_length
            .get(&len)
            .map(|v| v.iter().map(|&i| (i, &self.entries[i])).collect())
            .unwrap_or_default()
    }

    fn entries_in_length_range(&self, lengths: RangeInclusive<usize>) -> Vec<(usize, &LexiconEntry)> {
        if lengths.is_empty() {
            return Vec::new();
        }
        self.by_length
            .range(lengths)
            .flat_map(|(_, v)| v.iter().map(|&i| (i, &self.entries[i])))
            .collect()
    }

    fn entries_with_initial(&self, initial: char) -> Vec<&LexiconEntry> {
        let initial = initial.to_lowercase().next().unwrap_or(initial);
        self.by_initial
            .get(&initial)
            .map(|v| v.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
