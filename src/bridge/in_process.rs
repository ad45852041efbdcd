//! # 进程内命令桥接
//!
//! 按命令名注册异步处理函数，相当于进程内的 `invoke_handler`：
//! store 通过 `CommandBridge::invoke` 发起调用，由这里分发到对应的处理函数。
//!
//! 主要用于命令行入口和测试；处理函数与 Tauri command 一样返回 `Result<T, String>`。

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::CommandBridge;

/// 类型擦除后的命令处理函数
type Handler = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, String>> + Send + Sync>;

/// 进程内命令桥接
///
/// 内部使用 `RwLock` 保存处理函数表：调用时只读并立即释放锁，
/// 处理函数的执行不持有任何锁。
#[derive(Default)]
pub struct InProcessBridge {
    handlers: RwLock<HashMap<String, Handler>>,
}

impl InProcessBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册原始 JSON 处理函数
    ///
    /// 同名命令重复注册时，新的处理函数替换旧的。
    pub fn register<F, Fut>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + Send + 'static,
    {
        let name = name.into();
        let handler: Handler = Arc::new(move |args| handler(args).boxed());

        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if handlers.insert(name.clone(), handler).is_some() {
            log::debug!("命令 `{}` 的处理函数已被替换", name);
        }
    }

    /// 注册类型化处理函数
    ///
    /// 框架负责将 JSON 参数解析为 `A`、将返回值序列化为 JSON；
    /// 参数解析失败时以拒绝信息返回，不会调用处理函数。
    pub fn register_typed<A, T, F, Fut>(&self, name: impl Into<String>, handler: F)
    where
        A: DeserializeOwned + Send + 'static,
        T: Serialize + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, String>> + Send + 'static,
    {
        let name = name.into();
        let command = name.clone();
        let handler = Arc::new(handler);

        self.register(name, move |args: Value| {
            let handler = Arc::clone(&handler);
            let command = command.clone();
            async move {
                let args: A = serde_json::from_value(args)
                    .map_err(|e| format!("命令 `{}` 参数无效: {}", command, e))?;
                let output = handler(args).await?;
                serde_json::to_value(output)
                    .map_err(|e| format!("命令 `{}` 返回值序列化失败: {}", command, e))
            }
        });
    }

    /// 已注册的命令名，按字母序排列
    pub fn commands(&self) -> Vec<String> {
        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = handlers.keys().cloned().collect();
        names.sort();
        names
    }

    fn handler(&self, command: &str) -> Option<Handler> {
        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        handlers.get(command).cloned()
    }
}

#[async_trait]
impl CommandBridge for InProcessBridge {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, String> {
        let handler = self
            .handler(command)
            .ok_or_else(|| format!("未注册的命令: {}", command))?;
        handler(args).await
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Greet {
        name: String,
    }

    #[tokio::test]
    async fn test_unknown_command_is_rejected() {
        let bridge = InProcessBridge::new();
        let err = bridge
            .invoke("missing", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.contains("missing"));
    }

    #[tokio::test]
    async fn test_typed_handler_round_trip() {
        let bridge = InProcessBridge::new();
        bridge.register_typed("greet", |args: Greet| async move {
            Ok::<_, String>(format!("hello {}", args.name))
        });

        let value = bridge
            .invoke("greet", serde_json::json!({ "name": "alpha" }))
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!("hello alpha"));
    }

    #[tokio::test]
    async fn test_typed_handler_rejects_bad_args() {
        let bridge = InProcessBridge::new();
        bridge.register_typed("greet", |args: Greet| async move {
            Ok::<_, String>(args.name)
        });

        let err = bridge
            .invoke("greet", serde_json::json!({ "nom": 1 }))
            .await
            .unwrap_err();
        assert!(err.contains("greet"));
    }

    #[tokio::test]
    async fn test_register_replaces_existing_handler() {
        let bridge = InProcessBridge::new();
        bridge.register("version", |_args: Value| async move { Ok(serde_json::json!(1)) });
        bridge.register("version", |_args: Value| async move { Ok(serde_json::json!(2)) });

        let value = bridge.invoke("version", Value::Null).await.unwrap();
        assert_eq!(value, serde_json::json!(2));
        assert_eq!(bridge.commands(), vec!["version".to_string()]);
    }
}
