//! `Session`：对宿主（CLI/GUI）提供的处理链入口。
//!
//! `Session` 自身不做业务判断，而是：
//! - 持有 processors 链（可插拔）
//! - 把每个 `KeyEvent` 依次交给 processors，直到被消费
//! - 返回第一个非 `PassThrough` 的 `Decision`

use crate::{
    error::DocumentUnavailable,
    key_event::{Decision, KeyEvent},
    processor::KeyProcessor,
};

/// 按键处理会话。
#[derive(Default)]
pub struct Session {
    processors: Vec<Box<dyn KeyProcessor>>,
}

impl Session {
    /// 创建空链；空链对任何事件都返回 `PassThrough`。
    pub fn new() -> Self {
        Self::default()
    }

    /// 在链尾追加一个 processor。
    pub fn with_processor(mut self, processor: impl KeyProcessor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// 处理一个按键事件；出错时立即停止，不再交给后续 processor。
    pub fn handle(&self, event: &mut KeyEvent) -> Result<Decision, DocumentUnavailable> {
        for p in &self.processors {
            let decision = p.process(event)?;
            if decision.is_consumed() {
                return Ok(decision);
            }
        }
        Ok(Decision::PassThrough)
    }
}
