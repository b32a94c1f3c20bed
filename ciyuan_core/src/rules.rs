//! `rules`：词缀 / 词根 / 复合词规则的类型定义。
//!
//! 具体的内置表在 `ciyuan_affix`；core 只关心“规则长什么样、按什么顺序用”。
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::PartRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffixKind {
    Prefix,
    Suffix,
    Inflection,
}

/// 词缀规则：`meaning` 是汉字释义，可以为空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixRule {
    pub text: String,
    pub kind: AffixKind,
    #[serde(default)]
    pub meaning: String,
}

impl AffixRule {
    pub fn new(text: impl Into<String>, kind: AffixKind, meaning: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            meaning: meaning.into(),
        }
    }

    pub fn prefix(text: &str, meaning: &str) -> Self {
        Self::new(text, AffixKind::Prefix, meaning)
    }

    pub fn suffix(text: &str, meaning: &str) -> Self {
        Self::new(text, AffixKind::Suffix, meaning)
    }

    pub fn inflection(text: &str, meaning: &str) -> Self {
        Self::new(text, AffixKind::Inflection, meaning)
    }
}

/// 古典词根（拉丁/希腊语素）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRoot {
    pub root: String,
    pub meaning: String,
}

impl ClassicalRoot {
    pub fn new(root: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            meaning: meaning.into(),
        }
    }
}

/// 复合词的结构形状。
#[derive(Debug, Clone)]
pub enum CompoundShape {
    /// 整词匹配的正则，每个捕获组是一个部件
    Regex(Regex),
    /// 任意位置一刀切成两段（从左到右尝试）
    AnySplit,
}

/// 复合词规则：形状 + 每个部件的角色。
#[derive(Debug, Clone)]
pub struct CompoundPattern {
    pub name: String,
    pub shape: CompoundShape,
    pub roles: Vec<PartRole>,
}

impl CompoundPattern {
    /// 正则规则；捕获组数量必须与 `roles` 一致。
    pub fn regex(name: &str, pattern: &str, roles: &[PartRole]) -> Result<Self, CoreError> {
        let regex = Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
            name: name.to_owned(),
            source,
        })?;
        let groups = regex.captures_len() - 1;
        if groups != roles.len() {
            return Err(CoreError::RoleMismatch {
                name: name.to_owned(),
                groups,
                roles: roles.len(),
            });
        }
        Ok(Self {
            name: name.to_owned(),
            shape: CompoundShape::Regex(regex),
            roles: roles.to_vec(),
        })
    }

    /// 两段式开放复合（`sunflower` = `sun` + `flower`）。
    pub fn any_split(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            shape: CompoundShape::AnySplit,
            roles: vec![PartRole::Base, PartRole::Base],
        }
    }

    /// 列出该规则对 `word` 的所有切分方案（每个方案的部件按词序排列）。
    ///
    /// 正则形状最多一个方案；`AnySplit` 按切分点从左到右给出全部方案，
    /// 每段至少 `min_part` 个字符。
    pub fn segmentations<'w>(&self, word: &'w str, min_part: usize) -> Vec<Vec<&'w str>> {
        match &self.shape {
            CompoundShape::Regex(re) => re
                .captures(word)
                .map(|caps| {
                    caps.iter()
                        .skip(1)
                        .flatten()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                })
                .into_iter()
                .collect(),
            CompoundShape::AnySplit => {
                let total = word.chars().count();
                word.char_indices()
                    .enumerate()
                    .filter(|&(n, _)| n >= min_part && total - n >= min_part)
                    .map(|(_, (at, _))| vec![&word[..at], &word[at..]])
                    .collect()
            }
        }
    }
}

/// 规则表：前缀、后缀、屈折、古典词根、复合词规则。构建一次、只读。
#[derive(Debug, Clone, Default)]
pub struct AffixTables {
    prefixes: Vec<AffixRule>,
    suffixes: Vec<AffixRule>,
    inflections: Vec<AffixRule>,
    roots: Vec<ClassicalRoot>,
    compounds: Vec<CompoundPattern>,
}

impl AffixTables {
    /// 按 `kind` 分拣词缀，表内保持原顺序。
    ///
    /// 屈折后缀额外按长度稳定降序，让 `es`/`ing` 先于裸 `s` 被尝试。
    pub fn new(
        rules: impl IntoIterator<Item = AffixRule>,
        roots: impl IntoIterator<Item = ClassicalRoot>,
        compounds: impl IntoIterator<Item = CompoundPattern>,
    ) -> Self {
        let mut tables = Self {
            roots: roots.into_iter().collect(),
            compounds: compounds.into_iter().collect(),
            ..Self::default()
        };
        for rule in rules {
            if rule.text.is_empty() {
                continue;
            }
            match rule.kind {
                AffixKind::Prefix => tables.prefixes.push(rule),
                AffixKind::Suffix => tables.suffixes.push(rule),
                AffixKind::Inflection => tables.inflections.push(rule),
            }
        }
        tables
            .inflections
            .sort_by(|a, b| b.text.chars().count().cmp(&a.text.chars().count()));
        tables
    }

    pub fn prefixes(&self) -> &[AffixRule] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[AffixRule] {
        &self.suffixes
    }

    pub fn inflections(&self) -> &[AffixRule] {
        &self.inflections
    }

    pub fn roots(&self) -> &[ClassicalRoot] {
        &self.roots
    }

    pub fn compounds(&self) -> &[CompoundPattern] {
        &self.compounds
    }
}
