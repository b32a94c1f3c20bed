use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// `fuzzy_length_radius` 的上限；词长超过它的差距已无比较意义。
pub const MAX_LENGTH_RADIUS: usize = 32;
/// `max_suggestions` 的上限。
pub const MAX_SUGGESTIONS: usize = 64;

/// Engine 的可调参数。
///
/// 置信度是每个策略固定的常量，不在这里配置；这里只放阈值与规模限制。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 模糊匹配的接受下限（唯一阈值），取值 (0, 1]
    pub fuzzy_threshold: f64,
    /// 模糊匹配候选的长度窗口：|len(candidate) - len(word)| <= radius
    pub fuzzy_length_radius: usize,
    /// 模糊命中时附带的备选数量上限
    pub max_suggestions: usize,
    /// 词缀剥离后词干的最小长度
    pub min_affix_stem: usize,
    /// 尝试复合词切分的最小词长
    pub compound_min_length: usize,
    /// 复合词每个部件的最小长度
    pub compound_min_part: usize,
    /// 是否启用会话内结果缓存
    pub use_cache: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.7,
            fuzzy_length_radius: 3,
            max_suggestions: 4,
            min_affix_stem: 3,
            compound_min_length: 6,
            compound_min_part: 3,
            use_cache: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold <= 1.0) {
            return Err(CoreError::InvalidConfig {
                field: "fuzzy_threshold",
                reason: format!("must be in (0, 1], got {}", self.fuzzy_threshold),
            });
        }
        if self.fuzzy_length_radius > MAX_LENGTH_RADIUS {
            return Err(CoreError::InvalidConfig {
                field: "fuzzy_length_radius",
                reason: format!("must be at most {MAX_LENGTH_RADIUS}, got {}", self.fuzzy_length_radius),
            });
        }
        if self.max_suggestions > MAX_SUGGESTIONS {
            return Err(CoreError::InvalidConfig {
                field: "max_suggestions",
                reason: format!("must be at most {MAX_SUGGESTIONS}, got {}", self.max_suggestions),
            });
        }
        if self.min_affix_stem == 0 {
            return Err(CoreError::InvalidConfig {
                field: "min_affix_stem",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.compound_min_part == 0 {
            return Err(CoreError::InvalidConfig {
                field: "compound_min_part",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.compound_min_length < self.compound_min_part * 2 {
            return Err(CoreError::InvalidConfig {
                field: "compound_min_length",
                reason: format!(
                    "must be at least twice compound_min_part ({}), got {}",
                    self.compound_min_part, self.compound_min_length
                ),
            });
        }
        Ok(())
    }
}
