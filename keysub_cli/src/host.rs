//! 演示宿主：扮演 UI 框架的角色。
//!
//! 拥有文档，把每个字符转成 `KeyEvent` 交给 `Session`；
//! 事件没有被阻止时，由宿主自己执行默认插入。

use std::{cell::RefCell, rc::Rc};

use anyhow::{Result, bail};
use keysub_core::{
    Decision, DocumentRef, DocumentUnavailable, KeyEvent, KeyInterceptor, KeyLogger, RuleSet,
    Session, TextDocument,
};

pub struct EditorHost {
    doc: Rc<RefCell<TextDocument>>,
    session: Session,
}

impl EditorHost {
    /// 创建宿主；`log_keys` 为真时在拦截器前插入 `KeyLogger`。
    ///
    /// 宿主逐字符产生按键，触发键不是单个字符的规则永远不会命中，直接拒绝。
    pub fn new(initial_text: &str, rules: RuleSet, log_keys: bool) -> Result<Self> {
        let doc = TextDocument::with_text(initial_text).shared();
        let interceptor = KeyInterceptor::new(rules, DocumentRef::new(&doc))?;
        for (trigger, _) in interceptor.rules().iter() {
            if trigger.chars().count() != 1 {
                bail!("触发键 {trigger:?} 不是单个字符，逐字符输入无法触发");
            }
        }
        let mut session = Session::new();
        if log_keys {
            session = session.with_processor(KeyLogger);
        }
        Ok(Self {
            doc,
            session: session.with_processor(interceptor),
        })
    }

    /// 输入一个字符。
    pub fn type_char(&mut self, ch: char) -> Result<Decision, DocumentUnavailable> {
        let mut ev = KeyEvent::from_char(ch);
        let decision = self.session.handle(&mut ev)?;
        if !ev.default_prevented() {
            self.doc.borrow_mut().insert_text(&ev.key);
        }
        Ok(decision)
    }

    /// 输入一行：逐字符输入，然后另起一段（相当于回车）。
    pub fn type_line(&mut self, line: &str) -> Result<Vec<Decision>, DocumentUnavailable> {
        let mut decisions = Vec::with_capacity(line.chars().count());
        for ch in line.chars() {
            decisions.push(self.type_char(ch)?);
        }
        self.doc.borrow_mut().push_paragraph();
        Ok(decisions)
    }

    pub fn paragraphs(&self) -> Vec<String> {
        self.doc.borrow().paragraphs().to_vec()
    }

    pub fn text(&self) -> String {
        self.doc.borrow().text()
    }
}
