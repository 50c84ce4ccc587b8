use thiserror::Error;

/// 规则配置错误：构造拦截器或加载规则时发现，调用方修正规则后重试。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("触发键不能为空")]
    EmptyTrigger,
    /// 触发键替换为自身（退化规则）
    #[error("规则把触发键 {trigger:?} 替换为自身")]
    SelfSubstitution { trigger: String },
    #[error("触发键 {trigger:?} 重复定义")]
    DuplicateTrigger { trigger: String },
}

/// 文档不可用：宿主文档已销毁或正被占用，`insert_text` 无法送达。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("文档不可用：{reason}")]
pub struct DocumentUnavailable {
    pub reason: String,
}

impl DocumentUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
