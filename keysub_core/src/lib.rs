//! `keysub_core`：纯逻辑层，不做任何 I/O。
//!
//! 设计目标：
//! - **与 UI 框架解耦**：拦截器只依赖窄接口 `DocumentHandle`，可独立测试
//! - **分层清晰**：宿主 -> `Session` -> processors（`KeyLogger`/`KeyInterceptor`）-> `DocumentHandle`
//! - **同步单线程**：每个按键处理完毕才接受下一个，没有后台任务
pub mod document;
pub mod error;
pub mod interceptor;
pub mod key_event;
pub mod processor;
pub mod rules;
pub mod session;

pub use document::{DocumentHandle, DocumentRef, TextDocument};
pub use error::{ConfigurationError, DocumentUnavailable};
pub use interceptor::KeyInterceptor;
pub use key_event::{Decision, KeyEvent};
pub use processor::{KeyLogger, KeyProcessor};
pub use rules::{RuleSet, SubstitutionRule};
pub use session::Session;
