use std::io::{self, BufRead, Write};

use ciyuan_core::{AnalysisResult, Engine, Lexicon, LexiconEntry, LexiconStore, RootGloss};

use crate::history::History;

const PAGE_SIZE: usize = 20;
const HISTORY_LIMIT: usize = 50;

/// 交互命令（以 `:` 开头）；其他输入都当作要查的词。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    History,
    Stats,
    /// 清空结果缓存
    Clear,
    /// 列出词表中出现过的首字母
    Initials,
    /// 按首字母浏览（页码从 1 开始）
    Letter(char, usize),
    /// 按词长浏览
    Length(usize),
    /// 只做词源拆解，不查词
    Explain(String),
    Lookup(String),
    Invalid(String),
}

impl Command {
    /// 空行返回 None（调用方直接忽略）。
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Some(Command::Lookup(line.to_owned()));
        };
        let mut it = rest.split_whitespace();
        let cmd = match it.next().unwrap_or("") {
            "q" | "quit" | "exit" => Command::Quit,
            "h" | "help" => Command::Help,
            "history" => Command::History,
            "stats" => Command::Stats,
            "clear" => Command::Clear,
            "explain" => match it.next() {
                Some(word) => Command::Explain(word.to_owned()),
                None => Command::Invalid("用法：:explain <词>".to_owned()),
            },
            "letter" => {
                let letter = it.next().and_then(|s| s.chars().next());
                let page = it.next().map(|p| p.parse::<usize>());
                match (letter, page) {
                    (None, _) => Command::Initials,
                    (Some(c), None) => Command::Letter(c, 1),
                    (Some(c), Some(Ok(p))) if p >= 1 => Command::Letter(c, p),
                    _ => Command::Invalid("用法：:letter <字母> [页码]".to_owned()),
                }
            }
            "len" => match it.next().map(|n| n.parse::<usize>()) {
                Some(Ok(n)) => Command::Length(n),
                _ => Command::Invalid("用法：:len <长度>".to_owned()),
            },
            other => Command::Invalid(format!("未知命令 :{other}（输入 :help 查看帮助）")),
        };
        Some(cmd)
    }
}

pub fn repl(engine: &Engine<LexiconStore>, json: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    let mut history = History::new(HISTORY_LIMIT);
    let mut line = String::new();

    writeln!(out, "ciyuan | 词条 {} | 输入英文词回车查询，:help 查看命令，:q 退出", engine.lexicon().len())?;
    loop {
        line.clear();
        write!(out, "word> ")?;
        out.flush()?;
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Some(cmd) = Command::parse(&line) else {
            continue;
        };
        match cmd {
            Command::Quit => break,
            Command::Help => print_help(&mut out)?,
            Command::History => {
                if history.is_empty() {
                    writeln!(out, "(暂无历史)")?;
                }
                for (i, w) in history.iter().enumerate() {
                    writeln!(out, "{:>3}. {w}", i + 1)?;
                }
            }
            Command::Stats => {
                let s = engine.cache().stats();
                writeln!(out, "缓存：{} 条，命中 {}，未命中 {}", s.entries, s.hits, s.misses)?;
            }
            Command::Clear => {
                engine.cache().clear();
                writeln!(out, "缓存已清空")?;
            }
            Command::Initials => {
                let initials: String = engine.lexicon().initials().collect();
                writeln!(out, "首字母: {initials}")?;
            }
            Command::Explain(word) => {
                let roots = engine.explain(&word);
                if roots.is_empty() {
                    writeln!(out, "{word}: 无已知词根")?;
                } else {
                    render_roots(&mut out, &roots)?;
                }
            }
            Command::Letter(c, page) => {
                let entries = engine.lexicon().entries_with_initial(c);
                print_page(&mut out, &entries, page)?;
            }
            Command::Length(n) => {
                let entries: Vec<_> = engine
                    .lexicon()
                    .entries_of_length(n)
                    .into_iter()
                    .map(|(_, e)| e)
                    .collect();
                print_page(&mut out, &entries, 1)?;
            }
            Command::Lookup(word) => {
                let result = engine.resolve(&word);
                history.push(&result.normalized_word);
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
                } else {
                    render(&mut out, &result)?;
                }
            }
            Command::Invalid(msg) => writeln!(out, "{msg}")?,
        }
    }
    Ok(())
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "命令：")?;
    writeln!(out, "  <word>              查询")?;
    writeln!(out, "  :letter             列出首字母")?;
    writeln!(out, "  :letter <c> [页码]  按首字母浏览词表")?;
    writeln!(out, "  :len <n>            按词长浏览词表")?;
    writeln!(out, "  :history            查询历史")?;
    writeln!(out, "  :explain <word>     词源拆解")?;
    writeln!(out, "  :stats              缓存统计")?;
    writeln!(out, "  :clear              清空缓存")?;
    writeln!(out, "  :q                  退出")
}

fn print_page(out: &mut impl Write, entries: &[&LexiconEntry], page: usize) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "(无词条)");
    }
    let pages = entries.len().div_ceil(PAGE_SIZE);
    let page = page.min(pages);
    let start = (page - 1) * PAGE_SIZE;
    for e in entries.iter().skip(start).take(PAGE_SIZE) {
        match &e.pinyin {
            Some(py) => writeln!(out, "  {:<14} {} ({py})", e.english, e.chinese)?,
            None => writeln!(out, "  {:<14} {}", e.english, e.chinese)?,
        }
    }
    writeln!(out, "-- 第 {page}/{pages} 页，共 {} 条 --", entries.len())
}

/// 人类可读的结果展示。
pub fn render(out: &mut impl Write, r: &AnalysisResult) -> io::Result<()> {
    writeln!(out, "--------------------")?;
    let Some(entry) = &r.matched_entry else {
        writeln!(out, "{}: 未找到", r.normalized_word)?;
        return render_etymology(out, r);
    };
    writeln!(
        out,
        "{} -> {}  [{} {:.2}]",
        r.normalized_word, entry.chinese, r.match_kind, r.confidence
    )?;
    if let Some(py) = &entry.pinyin {
        writeln!(out, "  拼音: {py}")?;
    }
    writeln!(out, "  分类: {}", entry.category)?;
    if !r.decomposition.is_empty() {
        let parts: Vec<String> = r
            .decomposition
            .iter()
            .map(|p| match &p.lemma {
                Some(lemma) => format!("{}[{lemma}]({})", p.text, p.gloss),
                None => format!("{}({})", p.text, p.gloss),
            })
            .collect();
        writeln!(out, "  拆解: {}", parts.join(" + "))?;
    }
    if let Some(a) = &r.annotation {
        if !a.structure.is_empty() {
            writeln!(out, "  结构: {}", a.structure)?;
        }
        if !a.meaning.is_empty() {
            writeln!(out, "  释义: {}", a.meaning)?;
        }
    }
    if !r.suggestions.is_empty() {
        let s: Vec<String> = r
            .suggestions
            .iter()
            .map(|e| format!("{}({})", e.english, e.chinese))
            .collect();
        writeln!(out, "  备选: {}", s.join(", "))?;
    }
    render_etymology(out, r)
}

fn render_etymology(out: &mut impl Write, r: &AnalysisResult) -> io::Result<()> {
    if r.etymology.is_empty() {
        return Ok(());
    }
    render_roots(out, &r.etymology)
}

fn render_roots(out: &mut impl Write, roots: &[RootGloss]) -> io::Result<()> {
    let roots: Vec<String> = roots.iter().map(|g| format!("{}={}", g.root, g.meaning)).collect();
    writeln!(out, "  词源: {}", roots.join(" "))
}
