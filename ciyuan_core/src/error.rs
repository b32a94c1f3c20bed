//! `error`：core 层的错误类型。
//!
//! 注意：`Engine::resolve` 本身不会失败（查不到是 `MatchKind::Unknown`，不是错误）；
//! 这里的错误只会出现在**构建期**：配置校验、复合词规则编译。

/// 构建 engine / 规则表时可能出现的错误。
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 配置项取值非法
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// 复合词规则的正则无法编译
    #[error("invalid compound pattern `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// 复合词规则的切分角色数量与捕获组数量不一致
    #[error("compound pattern `{name}` has {groups} capture groups but {roles} roles")]
    RoleMismatch {
        name: String,
        groups: usize,
        roles: usize,
    },
}
