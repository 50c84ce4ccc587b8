//! `document`：拦截器对宿主文档的唯一依赖。
//!
//! - `DocumentHandle`：窄接口，只暴露 `insert_text`
//! - `TextDocument`：最小的段落文档（CLI/测试用的参考宿主）
//! - `DocumentRef`：对 `TextDocument` 的非拥有引用（`Weak`），文档销毁后报 `DocumentUnavailable`

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::error::DocumentUnavailable;

/// 宿主文档能力：在当前位置插入文本。
///
/// 接口取 `&self`：拦截器只持有句柄，不拥有文档；可变性由宿主实现负责。
pub trait DocumentHandle {
    fn insert_text(&self, text: &str) -> Result<(), DocumentUnavailable>;
}

impl<T: DocumentHandle + ?Sized> DocumentHandle for &T {
    fn insert_text(&self, text: &str) -> Result<(), DocumentUnavailable> {
        (**self).insert_text(text)
    }
}

/// 段落列表文档；插入总是追加到最后一个段落末尾。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    paragraphs: Vec<String>,
}

impl Default for TextDocument {
    fn default() -> Self {
        Self {
            paragraphs: vec![String::new()],
        }
    }
}

impl TextDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以一段初始文本创建文档。
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![text.into()],
        }
    }

    /// 包装成共享文档，宿主持有 `Rc`，拦截器持有 `DocumentRef`。
    pub fn shared(self) -> Rc<RefCell<TextDocument>> {
        Rc::new(RefCell::new(self))
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// 全文（段落以 `\n` 连接）。
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    pub fn push_paragraph(&mut self) {
        self.paragraphs.push(String::new());
    }

    pub fn insert_text(&mut self, text: &str) {
        match self.paragraphs.last_mut() {
            Some(p) => p.push_str(text),
            None => self.paragraphs.push(text.to_owned()),
        }
    }
}

/// `TextDocument` 的非拥有句柄。
#[derive(Debug, Clone)]
pub struct DocumentRef {
    doc: Weak<RefCell<TextDocument>>,
}

impl DocumentRef {
    pub fn new(doc: &Rc<RefCell<TextDocument>>) -> Self {
        Self {
            doc: Rc::downgrade(doc),
        }
    }
}

impl DocumentHandle for DocumentRef {
    fn insert_text(&self, text: &str) -> Result<(), DocumentUnavailable> {
        let doc = self
            .doc
            .upgrade()
            .ok_or_else(|| DocumentUnavailable::new("文档已销毁"))?;
        let mut doc = doc
            .try_borrow_mut()
            .map_err(|_| DocumentUnavailable::new("文档正被占用"))?;
        doc.insert_text(text);
        Ok(())
    }
}
