//! 内置规则表：前缀 / 后缀 / 屈折 / 古典词根 / 复合词结构。
//!
//! 释义只是粗略的单字或短语，不追求翻译准确；表的**顺序**有意义：
//! - 前缀、后缀：按表顺序尝试，先到先得
//! - 屈折：core 会按长度稳定降序重排
//! - 复合词规则：按顺序尝试，第一个部件全部可查的规则胜出

use ciyuan_core::{
    AffixRule, AffixTables, ClassicalRoot, CompoundPattern, CoreError, PartRole,
};

/// (前缀, 释义)
pub const PREFIXES: &[(&str, &str)] = &[
    ("un", "不"),
    ("dis", "不"),
    ("non", "非"),
    ("in", "不"),
    ("im", "不"),
    ("mis", "误"),
    ("anti", "反"),
    ("counter", "反"),
    ("re", "再"),
    ("pre", "前"),
    ("post", "后"),
    ("over", "过"),
    ("under", "欠"),
    ("sub", "次"),
    ("super", "超"),
    ("inter", "间"),
    ("trans", "跨"),
    ("auto", "自"),
    ("co", "共"),
    ("semi", "半"),
    ("multi", "多"),
    ("ex", "前"),
    ("de", "去"),
];

/// (后缀, 释义)
pub const SUFFIXES: &[(&str, &str)] = &[
    ("ness", "性"),
    ("ity", "性"),
    ("ment", "物"),
    ("tion", "化"),
    ("sion", "化"),
    ("ship", "谊"),
    ("hood", "态"),
    ("ism", "主义"),
    ("ist", "家"),
    ("er", "者"),
    ("or", "者"),
    ("ful", "满"),
    ("less", "无"),
    ("able", "可"),
    ("ible", "可"),
    ("ize", "化"),
    ("ify", "化"),
    ("al", "的"),
    ("ous", "的"),
    ("ive", "的"),
    ("ly", "地"),
];

/// (屈折后缀, 语法含义)；原始顺序，core 会按长度重排。
pub const INFLECTIONS: &[(&str, &str)] = &[
    ("s", "复数"),
    ("es", "复数"),
    ("ed", "过去"),
    ("ing", "进行"),
    ("er", "比较级"),
    ("est", "最高级"),
];

/// (古典词根, 释义)
pub const CLASSICAL_ROOTS: &[(&str, &str)] = &[
    ("photo", "光"),
    ("graph", "写"),
    ("graphy", "记录"),
    ("logy", "学"),
    ("log", "言"),
    ("nomy", "法则"),
    ("sophy", "智慧"),
    ("pathy", "感受"),
    ("metry", "测量"),
    ("meter", "计"),
    ("scopy", "观察"),
    ("scope", "镜"),
    ("micro", "微"),
    ("macro", "宏"),
    ("tele", "远"),
    ("hydro", "水"),
    ("psych", "心"),
    ("chron", "时"),
    ("geo", "地"),
    ("bio", "生"),
    ("astro", "星"),
    ("therm", "热"),
    ("phon", "声"),
    ("morph", "形"),
    ("anthrop", "人"),
    ("demo", "民"),
    ("cracy", "治"),
    ("phil", "爱"),
    ("phob", "惧"),
    ("port", "运"),
    ("spect", "看"),
    ("dict", "说"),
    ("script", "写"),
    ("vis", "见"),
    ("aqua", "水"),
    ("terr", "土"),
    ("vit", "命"),
];

const CLASSICAL_SUFFIX: &str = r"^([a-z]{3,})(graphy|logy|nomy|sophy|pathy|metry|scopy)$";
const CLASSICAL_PREFIX: &str =
    r"^(micro|macro|tele|hydro|psych|chron|geo|bio|astro|therm|photo)([a-z]{3,})$";
const DERIVATIONAL: &str = r"^([a-z]{3,})(tion|sion|ment|ness|ship|hood|able|ible|less|ful|ism|ist)$";
const QUALITY: &str = r"^([a-z]{3,})(proof|resistant|free|wise|like|worthy)$";

pub fn prefix_rules() -> impl Iterator<Item = AffixRule> {
    PREFIXES.iter().map(|&(t, m)| AffixRule::prefix(t, m))
}

pub fn suffix_rules() -> impl Iterator<Item = AffixRule> {
    SUFFIXES.iter().map(|&(t, m)| AffixRule::suffix(t, m))
}

pub fn inflection_rules() -> impl Iterator<Item = AffixRule> {
    INFLECTIONS.iter().map(|&(t, m)| AffixRule::inflection(t, m))
}

pub fn classical_roots() -> impl Iterator<Item = ClassicalRoot> {
    CLASSICAL_ROOTS.iter().map(|&(r, m)| ClassicalRoot::new(r, m))
}

/// 复合词规则（顺序即优先级）。
pub fn compound_patterns() -> Result<Vec<CompoundPattern>, CoreError> {
    use PartRole::{Base, Prefix, Suffix};
    Ok(vec![
        CompoundPattern::regex("classical-suffix", CLASSICAL_SUFFIX, &[Base, Suffix])?,
        CompoundPattern::regex("classical-prefix", CLASSICAL_PREFIX, &[Prefix, Base])?,
        CompoundPattern::regex("derivational", DERIVATIONAL, &[Base, Suffix])?,
        CompoundPattern::regex("quality", QUALITY, &[Base, Suffix])?,
        CompoundPattern::any_split("open"),
    ])
}

/// 组装全部内置规则表。
pub fn builtin() -> Result<AffixTables, CoreError> {
    Ok(AffixTables::new(
        prefix_rules().chain(suffix_rules()).chain(inflection_rules()),
        classical_roots(),
        compound_patterns()?,
    ))
}
