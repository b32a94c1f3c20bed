mod history;
mod repl;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ciyuan_core::{Engine, EngineConfig};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ciyuan")]
#[command(about = "英文词 -> 汉字：直查 / 屈折 / 词缀 / 模糊 / 复合词")]
struct Cli {
    /// 要查询的词；省略则进入交互模式
    words: Vec<String>,

    /// 词典文件（.tsv / .json）；省略或加载失败时使用内置词表
    #[arg(long)]
    dict: Option<PathBuf>,

    /// YAML 格式的 engine 配置
    #[arg(long)]
    config: Option<PathBuf>,

    /// 覆盖模糊匹配阈值 (0, 1]
    #[arg(long)]
    threshold: Option<f64>,

    /// 以 JSON 输出分析结果
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(t) = cli.threshold {
        config.fuzzy_threshold = t;
    }

    let lexicon = ciyuan_dict::load_or_builtin(cli.dict.as_deref()).context("failed to load lexicon")?;
    let tables = ciyuan_affix::builtin().context("failed to build affix tables")?;
    let engine = Engine::with_config(lexicon, tables, config).context("invalid engine config")?;
    info!(threshold = engine.config().fuzzy_threshold, "engine ready");

    if cli.words.is_empty() {
        return repl::repl(&engine, cli.json);
    }

    let mut out = io::stdout();
    for word in &cli.words {
        if word.trim().is_empty() {
            warn!("skipping empty input");
            continue;
        }
        let result = engine.resolve(word);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            repl::render(&mut out, &result)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
    serde_yaml::from_str(&s).with_context(|| format!("invalid config {}", path.display()))
}
