use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 提交错误
    #[error("提交错误: {0}")]
    Submit(#[from] SubmitError),
    /// 持久化存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
}

/// 表格文件格式错误
///
/// 出现该错误时记录存储会被重置为空
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// 字节流无法被识别为工作簿
    #[error("unable to read the spreadsheet: {0}")]
    Unreadable(String),
    /// 工作簿中没有任何工作表
    #[error("the workbook contains no sheets")]
    NoSheets,
    /// 第一条记录缺少必需列（空表同样归于此类）
    #[error(
        "Invalid file format. Please ensure your Excel file has the required columns: QuestionText and QuestionType."
    )]
    MissingColumns,
}

/// 网络层错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// 服务器返回非 2xx 状态码
    #[error("Server responded with status: {0}")]
    Status(u16),
    /// 连接失败等网络错误
    #[error("{0}")]
    Network(String),
    /// 响应体不是预期的 JSON
    #[error("{0}")]
    MalformedBody(String),
}

/// 一次提交尝试的失败原因
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// 没有选择任何题目，不会发出网络请求
    #[error("Please select at least one question.")]
    Validation,
    /// 网络或 HTTP 状态错误
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// 服务器返回了 `status != "success"`
    #[error("{0}")]
    Application(String),
}

/// 持久化存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("无法访问状态文件 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("状态文件内容无效: {0}")]
    Serde(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 解析配置文件失败
    #[error("无法解析配置文件 {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
