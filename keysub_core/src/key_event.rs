/// 按键事件（宿主 UI 每次按键创建一个）。
///
/// 说明：
/// - 处理链只关心 `key` 的语义值（例如 `"&"`、`"a"`），不关心平台扫描码。
/// - 事件是一次性的：处理链同步消费，不缓存、不排队。
/// - `default_prevented` 由处理链写入，宿主据此决定是否执行默认插入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// 按键语义值
    pub key: String,
    /// 默认行为能否被阻止
    pub preventable: bool,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, preventable: bool) -> Self {
        Self {
            key: key.into(),
            preventable,
            default_prevented: false,
        }
    }

    /// 可阻止默认行为的普通按键（宿主最常见的情况）。
    pub fn preventable(key: impl Into<String>) -> Self {
        Self::new(key, true)
    }

    /// 由单个字符构造（CLI 逐字符输入用）。
    pub fn from_char(ch: char) -> Self {
        Self::preventable(ch.to_string())
    }

    /// 阻止默认插入；`preventable == false` 时无效果，返回是否生效。
    pub fn prevent_default(&mut self) -> bool {
        if self.preventable {
            self.default_prevented = true;
        }
        self.default_prevented
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// 处理结果：处理链对一次按键做出的决定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// 已拦截：默认插入被阻止，并插入了替换文本
    Intercepted(String),
    /// 命中规则，但事件不可阻止，不做任何插入
    Ignored,
    /// 未命中，原样放行
    PassThrough,
}

impl Decision {
    /// 是否“消费”了事件（即后续 processor 不再执行）。
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Decision::PassThrough)
    }
}
