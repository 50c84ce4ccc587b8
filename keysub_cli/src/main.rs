use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use keysub_core::{Decision, RuleSet, SubstitutionRule};
use keysub_rules::RuleFile;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod host;

use host::EditorHost;

const DEFAULT_TEXT: &str = "A line of text in a paragraph.";

#[derive(Parser, Debug)]
#[command(name = "keysub_cli", version, about = "按键替换演示：逐字符输入，命中规则的按键被替换")]
struct Args {
    /// 规则文件（`*.json` 或 TSV：trigger<TAB>replacement）
    #[arg(long)]
    rules: Option<PathBuf>,

    /// 追加单条规则，格式 TRIGGER=REPLACEMENT，可重复；
    /// 在触发键首字符之后的第一个 `=` 处切分，所以 `==eq` 表示 `=` -> `eq`，`a=b=c` 表示 `a` -> `b=c`
    #[arg(long = "rule", value_name = "TRIGGER=REPLACEMENT")]
    rule: Vec<String>,

    /// 文档初始文本
    #[arg(long, default_value = DEFAULT_TEXT)]
    text: String,

    /// 记录每个按键（需配合 RUST_LOG=debug 查看）
    #[arg(long)]
    log_keys: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let rules = build_rules(&args)?;
    info!(rules = rules.len(), log_keys = args.log_keys, "keysub host started");
    let mut host = EditorHost::new(&args.text, rules.clone(), args.log_keys)
        .context("规则无效")?;
    repl(&mut host, &rules)
}

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

/// 组装规则：文件 + `--rule`；两者都没有时使用默认的 `& -> and`。
fn build_rules(args: &Args) -> Result<RuleSet> {
    let mut rules = match &args.rules {
        Some(path) => RuleFile::from_path(path)
            .with_context(|| format!("加载规则文件 {}", path.display()))?,
        None => RuleSet::new(),
    };
    for spec in &args.rule {
        rules
            .insert(parse_rule(spec)?)
            .with_context(|| format!("--rule {spec}"))?;
    }
    if rules.is_empty() && args.rules.is_none() {
        rules.insert(SubstitutionRule::new("&", "and"))?;
    }
    Ok(rules)
}

/// `TRIGGER=REPLACEMENT`；触发键至少一个字符，因此 `=` 本身也能作触发键。
fn parse_rule(spec: &str) -> Result<SubstitutionRule> {
    let first = spec.chars().next().map_or(0, char::len_utf8);
    let Some(pos) = spec[first..].find('=') else {
        bail!("--rule 需要 TRIGGER=REPLACEMENT 格式：{spec}");
    };
    let (trigger, rest) = spec.split_at(first + pos);
    Ok(SubstitutionRule::new(trigger, &rest[1..]))
}

fn repl(host: &mut EditorHost, rules: &RuleSet) -> Result<()> {
    let mut out = io::stdout();
    let mut line = String::new();
    writeln!(out, "keysub demo | {} 条规则", rules.len())?;
    for (trigger, replacement) in rules.iter() {
        writeln!(out, "  {trigger:?} -> {replacement:?}")?;
    }
    writeln!(out, "输入一行文本后回车。:show 查看文档，:q 退出。")?;
    print_document(&mut out, host)?;

    loop {
        line.clear();
        print!("keys>");
        out.flush()?;
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        match input {
            ":q" | ":quit" | ":exit" => break,
            ":show" => {
                print_document(&mut out, host)?;
                continue;
            }
            _ => {}
        }

        let decisions = host.type_line(input)?;
        let intercepted: Vec<&str> = decisions
            .iter()
            .filter_map(|d| match d {
                Decision::Intercepted(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        if intercepted.is_empty() {
            writeln!(out, "  (无替换)")?;
        } else {
            writeln!(out, "  替换 {} 次：{}", intercepted.len(), intercepted.join(", "))?;
        }
    }

    print_document(&mut out, host)?;
    Ok(())
}

fn print_document(out: &mut impl Write, host: &EditorHost) -> io::Result<()> {
    writeln!(out, "--------------------")?;
    for (i, p) in host.paragraphs().iter().enumerate() {
        writeln!(out, "{:>3} | {p}", i + 1)?;
    }
    writeln!(out, "--------------------")
}
