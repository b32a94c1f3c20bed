//! 词源注释：找出词中出现的古典词根。
use crate::{model::RootGloss, rules::ClassicalRoot};

/// 从左到右扫描：每个位置取最长的、从该位置开始的词根，记录后跳过；
/// 没有词根的位置前进一个字符。
pub fn explain(word: &str, roots: &[ClassicalRoot]) -> Vec<RootGloss> {
    let mut out = Vec::new();
    let boundaries: Vec<usize> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(word.len()))
        .collect();

    let mut pos = 0;
    while pos + 1 < boundaries.len() {
        let rest = &word[boundaries[pos]..];
        let best = roots
            .iter()
            .filter(|r| !r.root.is_empty() && rest.starts_with(r.root.as_str()))
            .max_by_key(|r| r.root.len());
        match best {
            Some(r) => {
                out.push(RootGloss {
                    root: r.root.clone(),
                    meaning: r.meaning.clone(),
                    offset: pos,
                });
                pos += r.root.chars().count();
            }
            None => pos += 1,
        }
    }
    out
}
