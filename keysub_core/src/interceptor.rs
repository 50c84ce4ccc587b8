//! `interceptor`：按键替换的核心判断。
//!
//! 每次按键独立、同步处理：查表 -> （可选）阻止默认行为 -> （可选）插入替换文本。
//! 除构造时的规则表外不保存任何跨调用状态。

use tracing::{debug, trace, warn};

use crate::{
    document::DocumentHandle,
    error::{ConfigurationError, DocumentUnavailable},
    key_event::{Decision, KeyEvent},
    processor::KeyProcessor,
    rules::RuleSet,
};

/// 按键拦截器：命中规则时阻止默认插入，改为插入替换文本。
pub struct KeyInterceptor<H> {
    /// 规则表（构造后不可变）
    rules: RuleSet,
    /// 宿主文档句柄（非拥有）
    document: H,
}

impl<H> KeyInterceptor<H>
where
    H: DocumentHandle,
{
    /// 校验规则并创建拦截器；空规则表合法（纯放行）。
    pub fn new(rules: RuleSet, document: H) -> Result<Self, ConfigurationError> {
        rules.validate()?;
        debug!(rules = rules.len(), "key interceptor ready");
        Ok(Self { rules, document })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// 处理一个按键事件。
    ///
    /// - 命中且可阻止：阻止默认行为，插入一次替换文本，返回 `Intercepted`
    /// - 命中但不可阻止：返回 `Ignored`，不插入
    /// - 未命中：返回 `PassThrough`
    ///
    /// 插入失败时返回 `DocumentUnavailable`；此时事件保持已阻止状态，由调用方补偿。
    pub fn handle(&self, event: &mut KeyEvent) -> Result<Decision, DocumentUnavailable> {
        let Some(replacement) = self.rules.get(&event.key) else {
            trace!(key = %event.key, "pass through");
            return Ok(Decision::PassThrough);
        };
        if !event.preventable {
            debug!(key = %event.key, "matched key is not preventable; ignored");
            return Ok(Decision::Ignored);
        }
        event.prevent_default();
        if let Err(e) = self.document.insert_text(replacement) {
            warn!(key = %event.key, error = %e, "substitution not delivered");
            return Err(e);
        }
        debug!(key = %event.key, replacement, "intercepted");
        Ok(Decision::Intercepted(replacement.to_owned()))
    }
}

impl<H> KeyProcessor for KeyInterceptor<H>
where
    H: DocumentHandle,
{
    fn process(&self, event: &mut KeyEvent) -> Result<Decision, DocumentUnavailable> {
        self.handle(event)
    }
}
