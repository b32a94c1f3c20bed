use std::collections::VecDeque;

/// 查询历史：最近的在前，重复查询会被挪到最前，超出上限丢弃最旧的。
#[derive(Debug, Clone)]
pub struct History {
    items: VecDeque<String>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            items: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, word: &str) {
        if let Some(pos) = self.items.iter().position(|w| w == word) {
            self.items.remove(pos);
        }
        self.items.push_front(word.to_owned());
        self.items.truncate(self.limit);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_recent_first_without_duplicates() {
        let mut h = History::new(5);
        h.push("sun");
        h.push("moon");
        h.push("sun");
        assert_eq!(h.iter().collect::<Vec<_>>(), vec!["sun", "moon"]);
    }

    #[test]
    fn bounded() {
        let mut h = History::new(2);
        for w in ["a", "b", "c"] {
            h.push(w);
        }
        assert_eq!(h.iter().collect::<Vec<_>>(), vec!["c", "b"]);
        assert_eq!(h.len(), 2);
    }
}
