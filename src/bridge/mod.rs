//! # 命令桥接层
//!
//! 将「向宿主端发起命令调用」抽象为一个只有一个方法的 trait：
//! `invoke(命令名, 参数) -> 最终得到 JSON 结果或拒绝信息`。
//!
//! store 只依赖这个 trait，不关心实际的传输方式（Tauri IPC、HTTP、进程内调用均可）。
//! 每个请求至多得到一个响应。
//!
//! - `in_process` - 进程内实现：按命令名注册异步处理函数

pub mod in_process;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;

pub use in_process::InProcessBridge;

/// 异步命令桥接
///
/// 拒绝信息使用 `String`，与 Tauri 前端 `invoke()` 收到的拒绝值一致。
#[async_trait]
pub trait CommandBridge: Send + Sync {
    /// 调用名为 `command` 的宿主端命令
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, String>;
}

/// 类型化的命令调用
///
/// 将参数序列化为 JSON，经由桥接调用，再把结果解析为 `T`。
///
/// # 错误
/// - 参数序列化失败：`StoreError::Arguments`
/// - 宿主端拒绝：`StoreError::Rejected`（拒绝信息原样保留）
/// - 返回值不符合 `T`：`StoreError::Response`
pub async fn invoke<A, T>(
    bridge: &dyn CommandBridge,
    command: &str,
    args: &A,
) -> Result<T, StoreError>
where
    A: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let args = serde_json::to_value(args).map_err(|source| StoreError::Arguments {
        command: command.to_string(),
        source,
    })?;

    let value = bridge
        .invoke(command, args)
        .await
        .map_err(|message| StoreError::Rejected {
            command: command.to_string(),
            message,
        })?;

    serde_json::from_value(value).map_err(|source| StoreError::Response {
        command: command.to_string(),
        source,
    })
}

/// 无参数命令的参数对象，序列化为 `{}`
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoArgs {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::Project;

    #[tokio::test]
    async fn test_invoke_decodes_typed_result() {
        let bridge = InProcessBridge::new();
        bridge.register("echo", |args: Value| async move { Ok(args) });

        let project = Project::new("1", "Alpha", "/a");
        let echoed: Project = invoke(&bridge, "echo", &project).await.unwrap();
        assert_eq!(echoed, project);
    }

    #[tokio::test]
    async fn test_invoke_keeps_rejection_message() {
        let bridge = InProcessBridge::new();
        bridge.register("fail", |_args: Value| async move {
            Err::<Value, _>("boom".to_string())
        });

        let err = invoke::<_, Value>(&bridge, "fail", &NoArgs {})
            .await
            .unwrap_err();
        match err {
            StoreError::Rejected { command, message } => {
                assert_eq!(command, "fail");
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invoke_reports_shape_mismatch() {
        let bridge = InProcessBridge::new();
        bridge.register("number", |_args: Value| async move {
            Ok(serde_json::json!(42))
        });

        let err = invoke::<_, Project>(&bridge, "number", &NoArgs {})
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Response { .. }));
        assert_eq!(err.command(), "number");
    }

    #[test]
    fn test_no_args_serializes_to_empty_object() {
        assert_eq!(serde_json::to_value(NoArgs {}).unwrap(), serde_json::json!({}));
    }
}
