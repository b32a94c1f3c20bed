use tracing::{debug, instrument, trace};

use crate::cache::ResultCache;
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::etymology;
use crate::lexicon::{Lexicon, normalize};
use crate::model::{AnalysisResult, RootGloss};
use crate::rules::AffixTables;
use crate::strategy::{MatchContext, MatchOutcome, MatchStrategy, default_chain};

/// 引擎：把一个英文词解析成 `AnalysisResult`。
///
/// 流水线：
/// - normalize（去空白 + 小写） -> cache -> strategy 链（直查 / 屈折 / 前缀 / 后缀 / 模糊 / 复合） -> 词源注释
///
/// 词典与规则表在构建时注入，之后只读；除缓存外没有任何可变状态。
pub struct Engine<L> {
    /// 词典（TSV/JSON 或其他实现）
    lexicon: L,
    /// 词缀 / 词根 / 复合词规则
    tables: AffixTables,
    config: EngineConfig,
    /// 策略链（顺序即优先级）
    strategies: Vec<Box<dyn MatchStrategy>>,
    cache: ResultCache,
}

impl<L> Engine<L>
where
    L: Lexicon,
{
    /// 使用默认配置与默认策略链。
    pub fn new(lexicon: L, tables: AffixTables) -> Self {
        Self {
            lexicon,
            tables,
            config: EngineConfig::default(),
            strategies: default_chain(),
            cache: ResultCache::new(),
        }
    }

    /// 使用外部配置；配置非法时报错。
    pub fn with_config(lexicon: L, tables: AffixTables, config: EngineConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let mut engine = Self::new(lexicon, tables);
        engine.config = config;
        Ok(engine)
    }

    /// 设置模糊匹配阈值 (0, 1]；非法值会回退到默认值 0.7。
    pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
        if threshold > 0.0 && threshold <= 1.0 {
            self.config.fuzzy_threshold = threshold;
        } else {
            self.config.fuzzy_threshold = EngineConfig::default().fuzzy_threshold;
        }
        self
    }

    /// 模糊命中时附带的备选数量上限。
    pub fn max_suggestions(mut self, n: usize) -> Self {
        self.config.max_suggestions = n;
        self
    }

    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.config.use_cache = enabled;
        self
    }

    /// 替换策略链（例如只保留直查与模糊）。
    pub fn strategies(mut self, strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    pub fn tables(&self) -> &AffixTables {
        &self.tables
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// 解析一个词。永不失败：空串或全部策略失败都返回 `MatchKind::Unknown`。
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(&self, raw_word: &str) -> AnalysisResult {
        let normalized = normalize(raw_word);

        if self.config.use_cache {
            if let Some(mut cached) = self.cache.get(&normalized) {
                trace!("cache hit");
                cached.original_input = raw_word.to_owned();
                return cached;
            }
        }

        let result = self.resolve_normalized(raw_word, &normalized);
        if self.config.use_cache {
            self.cache.put(&normalized, result.clone());
        }
        result
    }

    /// 跳过缓存直接计算（`word` 会先规范化）。
    pub fn resolve_uncached(&self, raw_word: &str) -> AnalysisResult {
        self.resolve_normalized(raw_word, &normalize(raw_word))
    }

    /// 词中出现的古典词根。
    pub fn explain(&self, word: &str) -> Vec<RootGloss> {
        etymology::explain(&normalize(word), self.tables.roots())
    }

    fn resolve_normalized(&self, raw_word: &str, normalized: &str) -> AnalysisResult {
        let mut result = AnalysisResult::unknown(raw_word, normalized);
        if normalized.is_empty() {
            debug!("empty input");
            return result;
        }
        result.etymology = etymology::explain(normalized, self.tables.roots());

        let ctx = MatchContext {
            lexicon: &self.lexicon,
            tables: &self.tables,
            config: &self.config,
        };
        for strategy in &self.strategies {
            if let Some(outcome) = strategy.attempt(normalized, &ctx) {
                debug!(
                    strategy = strategy.name(),
                    chinese = %outcome.entry.chinese,
                    confidence = outcome.confidence,
                    "matched"
                );
                apply_outcome(&mut result, outcome);
                return result;
            }
            trace!(strategy = strategy.name(), "no match");
        }
        debug!("no strategy matched");
        result
    }
}

fn apply_outcome(result: &mut AnalysisResult, outcome: MatchOutcome) {
    result.found = true;
    result.confidence = outcome.confidence;
    result.match_kind = outcome.kind;
    result.matched_entry = Some(outcome.entry);
    result.decomposition = outcome.decomposition;
    result.suggestions = outcome.suggestions;
    result.annotation = outcome.annotation;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconStore;
    use crate::model::{Category, EntryAnalysis, LexiconEntry, MatchKind, PartRole};
    use crate::rules::{AffixRule, ClassicalRoot, CompoundPattern};
    use crate::strategy::{CompoundStrategy, DirectStrategy, FuzzyStrategy};

    fn tables() -> AffixTables {
        AffixTables::new(
            [
                AffixRule::inflection("s", "复数"),
                AffixRule::inflection("es", "复数"),
                AffixRule::inflection("ed", "过去"),
                AffixRule::inflection("ing", "进行"),
                AffixRule::inflection("er", "比较"),
                AffixRule::inflection("est", "最高"),
                AffixRule::prefix("un", "不"),
                AffixRule::prefix("re", "再"),
                AffixRule::suffix("ness", "性"),
                AffixRule::suffix("less", "无"),
            ],
            [ClassicalRoot::new("photo", "光"), ClassicalRoot::new("graphy", "记录")],
            [
                CompoundPattern::regex(
                    "classical-suffix",
                    r"^([a-z]{3,})(graphy|logy)$",
                    &[PartRole::Base, PartRole::Suffix],
                )
                .unwrap(),
                CompoundPattern::any_split("open"),
            ],
        )
    }

    fn lexicon() -> LexiconStore {
        LexiconStore::new([
            LexiconEntry::new("cat", "猫").with_pinyin("māo").with_category(Category::Nature),
            LexiconEntry::new("box", "箱"),
            LexiconEntry::new("democracy", "民主"),
            LexiconEntry::new("happy", "乐"),
            LexiconEntry::new("kind", "善"),
            LexiconEntry::new("hope", "望"),
            LexiconEntry::new("run", "跑"),
            LexiconEntry::new("photo", "光").with_pinyin("guāng"),
            LexiconEntry::new("graphy", "图").with_pinyin("tú"),
            LexiconEntry::new("water", "水"),
            LexiconEntry::new("sun", "日"),
            LexiconEntry::new("flower", "花"),
            LexiconEntry::new("fall", "落"),
        ])
    }

    fn engine() -> Engine<LexiconStore> {
        Engine::new(lexicon(), tables())
    }

    fn concat(result: &AnalysisResult) -> String {
        result.decomposition.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn every_entry_resolves_directly() {
        let e = engine();
        for entry in e.lexicon().iter() {
            let r = e.resolve(&entry.english);
            assert!(r.found);
            assert_eq!(r.match_kind, MatchKind::Direct);
            assert_eq!(r.confidence, 1.0);
            assert_eq!(r.chinese(), Some(entry.chinese.as_str()));
            assert!(r.decomposition.is_empty());
        }
    }

    #[test]
    fn input_is_normalized() {
        let r = engine().resolve("  CaT ");
        assert_eq!(r.original_input, "  CaT ");
        assert_eq!(r.normalized_word, "cat");
        assert_eq!(r.match_kind, MatchKind::Direct);
    }

    #[test]
    fn empty_input_is_unknown() {
        for raw in ["", "   ", "\t\n"] {
            let r = engine().resolve(raw);
            assert!(!r.found);
            assert_eq!(r.match_kind, MatchKind::Unknown);
            assert_eq!(r.confidence, 0.0);
            assert!(r.matched_entry.is_none());
        }
    }

    #[test]
    fn inflection_strips_plural() {
        let r = engine().resolve("cats");
        assert_eq!(r.match_kind, MatchKind::Inflection);
        assert_eq!(r.confidence, 0.95);
        assert_eq!(r.decomposition[0].gloss, "猫");
        assert_eq!(r.decomposition[1].role, PartRole::Inflection);
        assert_eq!(concat(&r), "cats");
    }

    #[test]
    fn inflection_prefers_es_over_s() {
        let r = engine().resolve("boxes");
        assert_eq!(r.match_kind, MatchKind::Inflection);
        assert_eq!(r.decomposition[0].text, "box");
        assert_eq!(r.decomposition[1].text, "es");
    }

    #[test]
    fn inflection_restores_y_from_ies() {
        let r = engine().resolve("democracies");
        assert_eq!(r.match_kind, MatchKind::Inflection);
        assert_eq!(r.chinese(), Some("民主"));
        assert_eq!(r.decomposition[0].text, "democraci");
        assert_eq!(r.decomposition[0].lemma.as_deref(), Some("democracy"));
        assert_eq!(concat(&r), "democracies");
    }

    #[test]
    fn inflection_undoubles_consonant() {
        let r = engine().resolve("running");
        assert_eq!(r.match_kind, MatchKind::Inflection);
        assert_eq!(r.decomposition[0].lemma.as_deref(), Some("run"));
    }

    #[test]
    fn prefix_prepends_gloss() {
        let r = engine().resolve("unkind");
        assert_eq!(r.match_kind, MatchKind::Prefixed);
        assert_eq!(r.confidence, 0.85);
        assert_eq!(r.chinese(), Some("不善"));
        assert_eq!(concat(&r), "unkind");
        assert_eq!(r.decomposition[0].role, PartRole::Prefix);
    }

    #[test]
    fn suffix_appends_gloss_with_restoration() {
        let r = engine().resolve("happiness");
        assert_eq!(r.match_kind, MatchKind::Suffixed);
        assert_eq!(r.confidence, 0.80);
        assert_eq!(r.chinese(), Some("乐性"));
        assert_eq!(concat(&r), "happiness");
    }

    #[test]
    fn prefix_tried_before_suffix() {
        let lex = LexiconStore::new([
            LexiconEntry::new("happiness", "幸福"),
            LexiconEntry::new("unhappy", "不快"),
        ]);
        let r = Engine::new(lex, tables()).resolve("unhappiness");
        assert_eq!(r.match_kind, MatchKind::Prefixed);
        assert_eq!(r.chinese(), Some("不幸福"));
    }

    #[test]
    fn suffix_used_when_prefix_stem_missing() {
        let lex = LexiconStore::new([LexiconEntry::new("unhappy", "不快")]);
        let r = Engine::new(lex, tables()).resolve("unhappiness");
        assert_eq!(r.match_kind, MatchKind::Suffixed);
        assert_eq!(r.chinese(), Some("不快性"));
        assert_eq!(concat(&r), "unhappiness");
    }

    #[test]
    fn short_affix_stems_are_ignored() {
        let lex = LexiconStore::new([LexiconEntry::new("do", "做")]);
        let r = Engine::new(lex, tables()).use_cache(false).resolve("undo");
        assert_ne!(r.match_kind, MatchKind::Prefixed);
    }

    #[test]
    fn fuzzy_match_with_suggestions() {
        let lex = LexiconStore::new([
            LexiconEntry::new("waiter", "侍者"),
            LexiconEntry::new("water", "水"),
            LexiconEntry::new("wafer", "威化"),
        ]);
        let r = Engine::new(lex, tables()).resolve("watre");
        assert_eq!(r.match_kind, MatchKind::Fuzzy);
        // {w,a,t,r,e} 与 water 字符集合相同
        assert_eq!(r.confidence, 1.0);
        assert_eq!(r.chinese(), Some("水"));
        assert_eq!(r.suggestions.iter().map(|e| e.english.as_str()).collect::<Vec<_>>(), vec!["waiter"]);
        assert_eq!(concat(&r), "watre");
    }

    #[test]
    fn unbounded_suggestion_limit_does_not_overflow() {
        let lex = LexiconStore::new([
            LexiconEntry::new("waiter", "侍者"),
            LexiconEntry::new("water", "水"),
        ]);
        let r = Engine::new(lex, tables()).max_suggestions(usize::MAX).resolve("watre");
        assert_eq!(r.match_kind, MatchKind::Fuzzy);
        assert_eq!(r.chinese(), Some("水"));
        assert_eq!(r.suggestions.len(), 1);
    }

    #[test]
    fn with_config_rejects_oversized_window() {
        let cfg = EngineConfig {
            fuzzy_length_radius: usize::MAX,
            ..EngineConfig::default()
        };
        assert!(Engine::with_config(lexicon(), tables(), cfg).is_err());
    }

    #[test]
    fn fuzzy_ties_broken_by_insertion_order() {
        let lex = LexiconStore::new([
            LexiconEntry::new("stone", "石"),
            LexiconEntry::new("notes", "记"),
            LexiconEntry::new("tones", "调"),
        ]);
        let r = Engine::new(lex, tables()).resolve("onset");
        assert_eq!(r.match_kind, MatchKind::Fuzzy);
        assert_eq!(r.chinese(), Some("石"));
        let s: Vec<_> = r.suggestions.iter().map(|e| e.english.as_str()).collect();
        assert_eq!(s, vec!["notes", "tones"]);
    }

    #[test]
    fn fuzzy_threshold_is_configurable() {
        let lex = || LexiconStore::new([LexiconEntry::new("planet", "行星")]);
        // plant:  {p,l,a,n,t}   vs {p,l,a,n,e,t}: 5 / 6
        // playnt: {p,l,a,y,n,t} vs {p,l,a,n,e,t}: 5 / 7
        // plains: {p,l,a,i,n,s} vs {p,l,a,n,e,t}: 4 / 8
        let strict = Engine::new(lex(), tables());
        let loose = Engine::new(lex(), tables()).fuzzy_threshold(0.6);
        assert_eq!(strict.resolve("plant").match_kind, MatchKind::Fuzzy);
        assert_eq!(strict.resolve("plains").match_kind, MatchKind::Unknown);
        assert_eq!(loose.resolve("plains").match_kind, MatchKind::Unknown);

        let strict = Engine::new(lex(), tables()).fuzzy_threshold(0.75);
        assert_eq!(strict.resolve("playnt").match_kind, MatchKind::Unknown);
        assert_eq!(loose.resolve("playnt").match_kind, MatchKind::Fuzzy);
    }

    #[test]
    fn invalid_threshold_falls_back_to_default() {
        let e = engine().fuzzy_threshold(3.0);
        assert_eq!(e.config().fuzzy_threshold, 0.7);
    }

    #[test]
    fn with_config_validates() {
        let bad = EngineConfig {
            fuzzy_threshold: 0.0,
            ..EngineConfig::default()
        };
        assert!(Engine::with_config(lexicon(), tables(), bad).is_err());
    }

    #[test]
    fn compound_from_classical_suffix() {
        let r = engine().resolve("photography");
        assert_eq!(r.match_kind, MatchKind::Compound);
        assert_eq!(r.confidence, 0.75);
        let entry = r.matched_entry.as_ref().unwrap();
        assert_eq!(entry.chinese, "光图");
        assert_eq!(entry.category, Category::Compound);
        assert_eq!(entry.pinyin.as_deref(), Some("guāng tú"));
        let parts: Vec<_> = r.decomposition.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(parts, vec!["photo", "graphy"]);
        assert_eq!(r.decomposition[1].role, PartRole::Suffix);
    }

    #[test]
    fn direct_entry_beats_compound() {
        let lex = LexiconStore::new([
            LexiconEntry::new("photo", "光"),
            LexiconEntry::new("graphy", "图"),
            LexiconEntry::new("photography", "摄影"),
        ]);
        let r = Engine::new(lex, tables()).resolve("photography");
        assert_eq!(r.match_kind, MatchKind::Direct);
        assert_eq!(r.chinese(), Some("摄影"));
    }

    #[test]
    fn compound_requires_every_part() {
        let lex = LexiconStore::new([LexiconEntry::new("photo", "光")]);
        let r = Engine::new(lex, tables()).resolve("photography");
        assert!(!r.found);
        assert_eq!(r.match_kind, MatchKind::Unknown);
    }

    #[test]
    fn open_compound_split() {
        let r = engine().resolve("waterfall");
        assert_eq!(r.match_kind, MatchKind::Compound);
        assert_eq!(r.chinese(), Some("水落"));
        // 部件没有全部带拼音
        assert!(r.matched_entry.as_ref().unwrap().pinyin.is_none());
    }

    #[test]
    fn fuzzy_runs_before_compound() {
        // sun 是 sunhat 的子串（0.9），且长度在窗口内，模糊匹配先命中
        let lex = LexiconStore::new([LexiconEntry::new("sun", "日"), LexiconEntry::new("hat", "帽")]);
        let r = Engine::new(lex, tables()).resolve("sunhat");
        assert_eq!(r.match_kind, MatchKind::Fuzzy);
        assert_eq!(r.chinese(), Some("日"));
    }

    #[test]
    fn compound_min_length_respected() {
        let lex = || LexiconStore::new([LexiconEntry::new("sun", "日"), LexiconEntry::new("hat", "帽")]);
        let chain = || -> Vec<Box<dyn MatchStrategy>> {
            vec![Box::new(DirectStrategy), Box::new(CompoundStrategy)]
        };
        let r = Engine::new(lex(), tables()).strategies(chain()).resolve("sunhat");
        assert_eq!(r.match_kind, MatchKind::Compound);
        assert_eq!(r.chinese(), Some("日帽"));

        let cfg = EngineConfig {
            compound_min_length: 7,
            ..EngineConfig::default()
        };
        let r = Engine::with_config(lex(), tables(), cfg)
            .unwrap()
            .strategies(chain())
            .resolve("sunhat");
        assert_eq!(r.match_kind, MatchKind::Unknown);
    }

    #[test]
    fn unknown_has_no_suggestions() {
        let r = engine().resolve("zzzzqqqq");
        assert!(!r.found);
        assert!(r.suggestions.is_empty());
        assert!(r.decomposition.is_empty());
    }

    #[test]
    fn annotation_passes_through_on_direct() {
        let mut entry = LexiconEntry::new("sunrise", "日出");
        entry.analysis = Some(EntryAnalysis {
            structure: "sun+rise".into(),
            morphemes: vec!["sun".into(), "rise".into()],
            ..EntryAnalysis::default()
        });
        let r = Engine::new(LexiconStore::new([entry]), tables()).resolve("sunrise");
        assert_eq!(r.match_kind, MatchKind::Direct);
        assert_eq!(r.confidence, 1.0);
        assert_eq!(r.annotation.unwrap().structure, "sun+rise");
    }

    #[test]
    fn etymology_attached_even_when_unknown() {
        let lex = LexiconStore::new([LexiconEntry::new("cat", "猫")]);
        let r = Engine::new(lex, tables()).resolve("photoxyz");
        assert!(!r.found);
        assert_eq!(r.etymology.len(), 1);
        assert_eq!(r.etymology[0].root, "photo");
    }

    #[test]
    fn cached_and_uncached_agree() {
        let e = engine();
        for w in ["cats", "unkind", "photography", "nothingknown", "Water"] {
            let first = e.resolve(w);
            let second = e.resolve(w);
            let fresh = e.resolve_uncached(w);
            assert_eq!(first, second);
            assert_eq!(first, fresh);
        }
        assert_eq!(e.cache().len(), 5);
    }

    #[test]
    fn cache_hit_reports_callers_input() {
        let e = engine();
        e.resolve("cat");
        let r = e.resolve(" CAT");
        assert_eq!(r.original_input, " CAT");
        assert_eq!(e.cache().stats().hits, 1);
    }

    #[test]
    fn custom_chain() {
        let e = engine()
            .strategies(vec![Box::new(DirectStrategy), Box::new(FuzzyStrategy)])
            .use_cache(false);
        assert_eq!(e.resolve("cats").match_kind, MatchKind::Fuzzy);
        assert!(e.cache().is_empty());
    }

    #[test]
    fn explain_uses_root_table() {
        let roots = engine().explain("Photography");
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1].meaning, "记录");
    }
}
