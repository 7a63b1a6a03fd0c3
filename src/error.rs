use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Network(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("token entry #{index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl WatcherError {
    /// 网络层错误（超时、连接被拒绝、DNS 失败等）
    pub fn is_network(&self) -> bool {
        matches!(self, WatcherError::Http(_) | WatcherError::Network(_))
    }

    /// 响应体无法解析为扫描结果
    pub fn is_parse(&self) -> bool {
        matches!(self, WatcherError::Json(_) | WatcherError::InvalidResponse(_))
    }
}

pub type Result<T> = std::result::Result<T, WatcherError>;
