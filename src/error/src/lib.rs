//! 肖像程序错误处理模块
//!
//! 覆盖数据加载、配置解析和 IO 过程中可能出现的错误。

use thiserror::Error;

/// 加载房间数据或配置时可能出现的错误类型
#[derive(Debug, Error)]
pub enum PortraitError {
    /// IO操作错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV 解析错误
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 配置文件解析错误
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// 缺少必需的数据列
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// 数据文件中没有可用的房间
    #[error("No usable rooms in {0}")]
    EmptyDataset(String),
}

impl PortraitError {
    /// 错误是否来自数据文件内容本身（而不是文件系统或配置）
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            PortraitError::Csv(_) | PortraitError::MissingColumn(_) | PortraitError::EmptyDataset(_)
        )
    }
}

/// 把错误转换为适合在界面上显示的短消息
pub fn handle_error(error: &PortraitError) -> String {
    match error {
        PortraitError::Io(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "data file not found".to_string(),
            std::io::ErrorKind::PermissionDenied => "no permission to read data file".to_string(),
            _ => format!("IO error: {}", e),
        },
        PortraitError::MissingColumn(column) => format!("data file has no '{}' column", column),
        PortraitError::EmptyDataset(_) => "data file has no usable rooms".to_string(),
        _ => error.to_string(),
    }
}
