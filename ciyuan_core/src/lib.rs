//! `ciyuan_core`：英文词 -> 汉字的解析引擎（纯逻辑层，不做任何 I/O）。
//!
//! 设计目标：
//! - **策略链**：直查 -> 屈折 -> 前缀 -> 后缀 -> 模糊 -> 复合，第一个命中即返回
//! - **注入式**：词典（`Lexicon`）与规则表（`AffixTables`）构建时注入，之后只读
//! - **不抛错**：任何字符串输入都会得到一个 `AnalysisResult`，查不到是 `Unknown`
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod etymology;
pub mod filter;
pub mod lexicon;
pub mod model;
pub mod rules;
pub mod similarity;
pub mod strategy;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::CoreError;
pub use lexicon::{Lexicon, LexiconStore, normalize};
pub use model::{
    AnalysisResult, Category, DecompositionPart, LexiconEntry, MatchKind, PartRole, RootGloss,
};
pub use rules::{AffixKind, AffixRule, AffixTables, ClassicalRoot, CompoundPattern};
