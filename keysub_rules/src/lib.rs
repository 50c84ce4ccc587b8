use std::{fs, io, path::Path};

use keysub_core::{ConfigurationError, RuleSet, SubstitutionRule};
use thiserror::Error;
use tracing::debug;

/// 规则文件加载错误。
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("读取规则文件失败：{0}")]
    Io(#[from] io::Error),
    #[error("JSON 规则格式错误：{0}")]
    Json(#[from] serde_json::Error),
    #[error("TSV 第 {line} 行：{message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Config(#[from] ConfigurationError),
}

/// 规则文件：
///
/// - `*.json`：一个对象，`{"&": "and"}`
/// - 其他：TSV，`trigger<TAB>replacement`
///   - 允许 `#` 开头注释行与空行
///   - 字段内支持 `\t` `\n` `\\` `\#` 转义（方便把 Tab/换行写进替换文本，`\#` 用于以 `#` 开头的触发键）
///
/// 加载后的规则都经过 `RuleSet::validate`。
pub struct RuleFile;

impl RuleFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<RuleSet, RulesError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let rules = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&s)?,
            _ => Self::from_tsv_str(&s)?,
        };
        debug!(path = %path.display(), rules = rules.len(), "rules loaded");
        Ok(rules)
    }

    pub fn from_json_str(s: &str) -> Result<RuleSet, RulesError> {
        let rules: RuleSet = serde_json::from_str(s)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_tsv_str(s: &str) -> Result<RuleSet, RulesError> {
        let mut rules = RuleSet::new();
        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            // 只裁掉行尾的 `\r`：行首/行尾空格可能就是触发键或替换文本
            let line = line.strip_suffix('\r').unwrap_or(line);
            // 含 Tab 的全空白行是合法规则（例如空格 -> 两个空格）；`#` 触发键写作 `\#`
            if line.starts_with('#') || (!line.contains('\t') && line.trim().is_empty()) {
                continue;
            }
            let Some((trigger, replacement)) = line.split_once('\t') else {
                return Err(RulesError::Parse {
                    line: line_no,
                    message: "缺少 Tab 分隔的 replacement".to_string(),
                });
            };
            let trigger = unescape(trigger).map_err(|message| RulesError::Parse {
                line: line_no,
                message,
            })?;
            let replacement = unescape(replacement).map_err(|message| RulesError::Parse {
                line: line_no,
                message,
            })?;
            if trigger.is_empty() {
                return Err(RulesError::Parse {
                    line: line_no,
                    message: "trigger 为空".to_string(),
                });
            }
            let rule = SubstitutionRule::new(trigger, replacement);
            rule.validate()?;
            rules.insert(rule)?;
        }
        Ok(rules)
    }
}

fn unescape(field: &str) -> Result<String, String> {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some('#') => out.push('#'),
            Some(other) => return Err(format!("未知转义 \\{other}")),
            None => return Err("行尾孤立的 \\".to_string()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsv_skips_comments_and_blank_lines() {
        let rules = RuleFile::from_tsv_str("# demo\n\n&\tand\n->\t→\n").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get("&"), Some("and"));
        assert_eq!(rules.get("->"), Some("→"));
    }

    #[test]
    fn tsv_unescapes_fields() {
        let rules = RuleFile::from_tsv_str("\\t\t  \n;\t;\\n\n\\\\\tbackslash\r\n").unwrap();
        assert_eq!(rules.get("\t"), Some("  "));
        assert_eq!(rules.get(";"), Some(";\n"));
        assert_eq!(rules.get("\\"), Some("backslash"));
    }

    #[test]
    fn tsv_keeps_whitespace_only_rules() {
        let rules = RuleFile::from_tsv_str("   \n \t  \n").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get(" "), Some("  "));
    }

    #[test]
    fn tsv_hash_trigger_needs_escape() {
        let rules = RuleFile::from_tsv_str("#\tcomment\n\\#\tnumber\n\\#!\tshebang\n").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get("#"), Some("number"));
        assert_eq!(rules.get("#!"), Some("shebang"));
    }

    #[test]
    fn tsv_reports_line_numbers() {
        let err = RuleFile::from_tsv_str("&\tand\nbroken\n").unwrap_err();
        assert!(matches!(err, RulesError::Parse { line: 2, .. }));

        let err = RuleFile::from_tsv_str("#\n\tempty trigger\n").unwrap_err();
        assert!(matches!(err, RulesError::Parse { line: 2, .. }));

        let err = RuleFile::from_tsv_str("a\\q\tb\n").unwrap_err();
        assert!(matches!(err, RulesError::Parse { line: 1, .. }));
    }

    #[test]
    fn tsv_rejects_duplicates_and_self_rules() {
        let err = RuleFile::from_tsv_str("&\tand\n&\tund\n").unwrap_err();
        assert!(matches!(
            err,
            RulesError::Config(ConfigurationError::DuplicateTrigger { .. })
        ));

        let err = RuleFile::from_tsv_str("&\t&\n").unwrap_err();
        assert!(matches!(
            err,
            RulesError::Config(ConfigurationError::SelfSubstitution { .. })
        ));
    }

    #[test]
    fn json_rules_are_validated() {
        let rules = RuleFile::from_json_str(r#"{"&": "and"}"#).unwrap();
        assert_eq!(rules.get("&"), Some("and"));

        let err = RuleFile::from_json_str(r#"{"": "x"}"#).unwrap_err();
        assert!(matches!(
            err,
            RulesError::Config(ConfigurationError::EmptyTrigger)
        ));

        assert!(matches!(
            RuleFile::from_json_str("[1, 2]"),
            Err(RulesError::Json(_))
        ));
    }
}
