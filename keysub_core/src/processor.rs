//! `processor`：按键事件处理链的单元。
//!
//! 每个 processor 对事件给出一个 `Decision`：
//! - `PassThrough`：不处理，交给下一个 processor
//! - 其他：已消费，后续 processor 不再执行
//!
//! 当前提供：
//! - `KeyInterceptor`（见 `interceptor`）：规则替换
//! - `KeyLogger`：只记录按键，从不消费

use tracing::debug;

use crate::{
    error::DocumentUnavailable,
    key_event::{Decision, KeyEvent},
};

/// Processor：处理一个按键事件，必要时阻止默认行为并修改文档。
///
/// 单线程同步模型，不要求 `Send`/`Sync`。
pub trait KeyProcessor {
    fn process(&self, event: &mut KeyEvent) -> Result<Decision, DocumentUnavailable>;
}

impl<P: KeyProcessor + ?Sized> KeyProcessor for Box<P> {
    fn process(&self, event: &mut KeyEvent) -> Result<Decision, DocumentUnavailable> {
        (**self).process(event)
    }
}

/// 记录每个按键（`debug` 级别）的 processor。
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyLogger;

impl KeyProcessor for KeyLogger {
    fn process(&self, event: &mut KeyEvent) -> Result<Decision, DocumentUnavailable> {
        debug!(key = %event.key, preventable = event.preventable, "key down");
        Ok(Decision::PassThrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_never_consumes() {
        let mut ev = KeyEvent::preventable("&");
        assert_eq!(KeyLogger.process(&mut ev), Ok(Decision::PassThrough));
        assert!(!ev.default_prevented());
    }
}
