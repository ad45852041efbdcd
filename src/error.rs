//! # 错误类型
//!
//! - `StoreError` - store 端（前端侧）观察到的错误：远程调用被拒绝，或 JSON 边界的编解码失败
//! - `RegistryError` - 宿主端项目注册表的错误：路径校验、持久化失败等
//! - `AppError` - 组装本地 store 时两者的合集
//!
//! 宿主端命令在桥接边界上统一转换为 `String` 拒绝信息（与 Tauri command 的
//! `Result<T, String>` 约定一致），store 端再将其包装为 `StoreError::Rejected`。

use std::path::PathBuf;

/// store 端错误
///
/// 无论哪一种，store 内部的项目列表都保持不变，也不会通知任何订阅者。
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 远程调用被宿主端拒绝，`message` 原样保留宿主端的拒绝信息
    #[error("命令 `{command}` 调用失败: {message}")]
    Rejected { command: String, message: String },

    /// 调用参数无法序列化为 JSON
    #[error("命令 `{command}` 参数序列化失败: {source}")]
    Arguments {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// 宿主端返回值与声明的类型不符
    #[error("命令 `{command}` 返回值解析失败: {source}")]
    Response {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// 出错的命令名
    pub fn command(&self) -> &str {
        match self {
            StoreError::Rejected { command, .. }
            | StoreError::Arguments { command, .. }
            | StoreError::Response { command, .. } => command,
        }
    }
}

/// 宿主端项目注册表错误
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("项目路径不能为空")]
    EmptyPath,

    #[error("路径不存在: {0}")]
    PathNotFound(String),

    #[error("路径不是目录: {0}")]
    NotADirectory(String),

    #[error("路径不是 git 仓库: {0}")]
    NotAGitRepository(String),

    #[error("项目已存在: {0}")]
    AlreadyExists(String),

    #[error("无法获取本地数据目录")]
    NoDataDir,

    #[error("读写 {} 失败: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析 {} 失败: {}", path.display(), source)]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("序列化 {} 失败: {}", path.display(), source)]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 组装本地 store 时的错误
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_error_is_reported_as_write_failure() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RegistryError::Serialize {
            path: PathBuf::from("projects.json"),
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("序列化 projects.json 失败"));
        assert!(!message.contains("解析"));
    }
}
