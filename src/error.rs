use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 远程 API 调用错误（原样向上传递，不做重试）
    #[error("远程调用错误: {0}")]
    Remote(#[from] RemoteError),
    /// 调用方使用错误
    #[error("使用错误: {0}")]
    Usage(#[from] UsageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 任务被取消
    #[error("任务已取消")]
    Cancelled,
}

/// 远程错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    NotFound,
    Unauthorized,
    MalformedRequest,
    /// 服务端返回了 2xx，但响应体或响应头无法解析
    MalformedResponse,
    ServerError,
    Network,
}

impl RemoteErrorKind {
    /// 根据 HTTP 状态码归类
    pub fn from_status(status: u16) -> Self {
        match status {
            404 | 410 => RemoteErrorKind::NotFound,
            401 | 403 => RemoteErrorKind::Unauthorized,
            400..=499 => RemoteErrorKind::MalformedRequest,
            _ => RemoteErrorKind::ServerError,
        }
    }
}

impl std::fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RemoteErrorKind::NotFound => "not-found",
            RemoteErrorKind::Unauthorized => "unauthorized",
            RemoteErrorKind::MalformedRequest => "malformed-request",
            RemoteErrorKind::MalformedResponse => "malformed-response",
            RemoteErrorKind::ServerError => "server-error",
            RemoteErrorKind::Network => "network-failure",
        };
        f.write_str(name)
    }
}

/// 远程 API 返回的失败
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{kind}] {endpoint}: {message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub endpoint: String,
    pub message: String,
}

impl RemoteError {
    pub fn new(
        kind: RemoteErrorKind,
        endpoint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn not_found(endpoint: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::NotFound, endpoint, "资源不存在")
    }
}

/// 调用方使用错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsageError {
    /// 页码从 1 开始
    #[error("页码 {page} 无效 (文档共 {page_count:?} 页, 页码从 1 开始)")]
    InvalidPage { page: u32, page_count: Option<u32> },
    #[error("文档ID不能为空")]
    EmptyDocumentId,
    #[error("文件名不能为空")]
    EmptyFilename,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置项取值非法
    #[error("配置项 {name} 非法: {reason}")]
    InvalidValue { name: String, reason: String },
    /// 配置文件读取或解析失败
    #[error("配置文件 {path} 加载失败: {source}")]
    FileLoadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        let kind = match err.status() {
            Some(status) => RemoteErrorKind::from_status(status.as_u16()),
            None if err.is_decode() => RemoteErrorKind::MalformedResponse,
            None => RemoteErrorKind::Network,
        };
        AppError::Remote(RemoteError::new(kind, endpoint, err.to_string()))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Remote(RemoteError::new(
            RemoteErrorKind::MalformedResponse,
            "",
            format!("JSON解析失败: {}", err),
        ))
    }
}

impl AppError {
    /// 远程错误的分类（非远程错误返回 None）
    pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            AppError::Remote(e) => Some(e.kind),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
