//! `rules`：替换规则（trigger -> replacement）。
//!
//! core 不关心规则来自文件/命令行/内存；加载见 `keysub_rules`。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// 单条替换规则。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    /// 触发键（与 `KeyEvent::key` 精确匹配）
    pub trigger: String,
    /// 替换文本
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(trigger: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            replacement: replacement.into(),
        }
    }

    /// 结构校验：触发键非空，且不替换为自身。
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_rule(&self.trigger, &self.replacement)
    }
}

fn check_rule(trigger: &str, replacement: &str) -> Result<(), ConfigurationError> {
    if trigger.is_empty() {
        return Err(ConfigurationError::EmptyTrigger);
    }
    if trigger == replacement {
        return Err(ConfigurationError::SelfSubstitution {
            trigger: trigger.to_owned(),
        });
    }
    Ok(())
}

/// 规则表：触发键唯一，顺序无关。
///
/// JSON 形式就是一个对象：`{"&": "and"}`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    map: BTreeMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 (trigger, replacement) 序列构造；触发键重复时报错。
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut rules = Self::new();
        for (k, v) in pairs {
            rules.insert(SubstitutionRule::new(k, v))?;
        }
        Ok(rules)
    }

    /// 添加一条规则；同一触发键只能定义一次。
    pub fn insert(&mut self, rule: SubstitutionRule) -> Result<(), ConfigurationError> {
        if self.map.contains_key(&rule.trigger) {
            return Err(ConfigurationError::DuplicateTrigger {
                trigger: rule.trigger,
            });
        }
        self.map.insert(rule.trigger, rule.replacement);
        Ok(())
    }

    pub fn get(&self, trigger: &str) -> Option<&str> {
        self.map.get(trigger).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 逐条校验（见 `SubstitutionRule::validate`），返回第一个错误。
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.iter().try_for_each(|(k, v)| check_rule(k, v))
    }
}
