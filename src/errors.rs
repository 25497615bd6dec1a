use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TinyLinkError {
    Validation(String),
    NotFound(String),
    Server(String),
    Unreachable(String),
    Storage(String),
    Serialization(String),
    Clipboard(String),
    InFlight(String),
    Cancelled(String),
}

impl TinyLinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinyLinkError::Validation(_) => "E001",
            TinyLinkError::NotFound(_) => "E002",
            TinyLinkError::Server(_) => "E003",
            TinyLinkError::Unreachable(_) => "E004",
            TinyLinkError::Storage(_) => "E005",
            TinyLinkError::Serialization(_) => "E006",
            TinyLinkError::Clipboard(_) => "E007",
            TinyLinkError::InFlight(_) => "E008",
            TinyLinkError::Cancelled(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TinyLinkError::Validation(_) => "Validation Error",
            TinyLinkError::NotFound(_) => "Resource Not Found",
            TinyLinkError::Server(_) => "Server Error",
            TinyLinkError::Unreachable(_) => "Server Unreachable",
            TinyLinkError::Storage(_) => "Storage Error",
            TinyLinkError::Serialization(_) => "Serialization Error",
            TinyLinkError::Clipboard(_) => "Clipboard Error",
            TinyLinkError::InFlight(_) => "Operation In Progress",
            TinyLinkError::Cancelled(_) => "Cancelled",
        }
    }

    /// 获取错误详情（服务端错误为原文）
    pub fn message(&self) -> &str {
        match self {
            TinyLinkError::Validation(msg)
            | TinyLinkError::NotFound(msg)
            | TinyLinkError::Server(msg)
            | TinyLinkError::Unreachable(msg)
            | TinyLinkError::Storage(msg)
            | TinyLinkError::Serialization(msg)
            | TinyLinkError::Clipboard(msg)
            | TinyLinkError::InFlight(msg)
            | TinyLinkError::Cancelled(msg) => msg,
        }
    }

    /// Storage failures are logged and swallowed; everything else reaches the user.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, TinyLinkError::Storage(_))
    }

    /// 格式化为彩色输出（用于 CLI）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinyLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinyLinkError {}

// 便捷的构造函数
impl TinyLinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::NotFound(msg.into())
    }

    pub fn server<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::Server(msg.into())
    }

    pub fn unreachable<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::Unreachable(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::Storage(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::Serialization(msg.into())
    }

    pub fn clipboard<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::Clipboard(msg.into())
    }

    pub fn in_flight<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::InFlight(msg.into())
    }

    pub fn cancelled<T: Into<String>>(msg: T) -> Self {
        TinyLinkError::Cancelled(msg.into())
    }
}

impl From<std::io::Error> for TinyLinkError {
    fn from(err: std::io::Error) -> Self {
        TinyLinkError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TinyLinkError {
    fn from(err: serde_json::Error) -> Self {
        TinyLinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TinyLinkError>;
