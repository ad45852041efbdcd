//! # Project Store
//!
//! 桌面应用「项目列表」的响应式数据仓库，以及它背后的宿主端命令。
//!
//! ## 架构说明
//! ```text
//! UI ──subscribe/add──▶ ProjectStore ──invoke──▶ CommandBridge ──▶ 宿主端命令
//!                                                               (ProjectRegistry)
//! ```
//! store 只依赖 `CommandBridge` trait；宿主端可以在同一进程（`InProcessBridge`），
//! 也可以在 Tauri 等其他进程中。
//!
//! ## 模块结构
//! - `bridge/` - 命令桥接抽象及进程内实现
//! - `commands/` - 宿主端命令处理函数
//! - `models/` - 数据模型
//! - `services/` - store、宿主端注册表和持久化
//! - `utils/` - 通用工具函数

pub mod bridge;
pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

pub use bridge::{CommandBridge, InProcessBridge};
pub use error::{AppError, RegistryError, StoreError};
pub use models::config::HostConfig;
pub use models::project::{AddProjectParams, Project};
pub use services::project_store::{ProjectStore, Subscription};
pub use services::registry::ProjectRegistry;

/// 在当前进程内组装一个完整的 store
///
/// 1. 按配置打开宿主端项目注册表
/// 2. 将项目命令注册到进程内桥接
/// 3. 通过桥接创建 store（拉取初始列表）
///
/// # 错误
/// 注册表无法打开或初始列表拉取失败时返回错误
pub async fn open_local(config: HostConfig) -> Result<ProjectStore, AppError> {
    let registry = Arc::new(ProjectRegistry::open(config).await?);

    let bridge = Arc::new(InProcessBridge::new());
    commands::projects::install(&bridge, registry);

    Ok(ProjectStore::create(bridge).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_local_reads_persisted_projects() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = dir.path().join("gamma");
        std::fs::create_dir(&workspace).unwrap();
        let config = HostConfig::new(dir.path().join("data"));

        let first = open_local(config.clone()).await.unwrap();
        let added = first
            .add(AddProjectParams::new(workspace.to_string_lossy()))
            .await
            .unwrap();

        let second = open_local(config).await.unwrap();
        assert_eq!(*second.projects(), vec![added]);
    }

    #[tokio::test]
    async fn test_open_local_fails_on_corrupted_storage() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("projects.json"), "{").unwrap();

        let result = open_local(HostConfig::new(dir.path())).await;
        assert!(matches!(
            result,
            Err(AppError::Registry(RegistryError::Corrupted { .. }))
        ));
    }
}
