//! # 项目 Commands
//!
//! 宿主端的两个项目命令处理函数：
//! - `list_projects` - 返回全部项目
//! - `add_project` - 新增一个项目
//!
//! 处理函数与 Tauri command 一样返回 `Result<T, String>`，错误在这里被扁平化为拒绝信息。
//! `install` 将它们以命令名注册到进程内桥接；启用 `tauri` feature 时，
//! `tauri_commands` 子模块提供可直接放入 `generate_handler!` 的版本。

use std::sync::Arc;

use crate::bridge::InProcessBridge;
use crate::models::project::{AddProjectParams, Project};
use crate::services::project_store::{ADD_PROJECT, LIST_PROJECTS};
use crate::services::registry::ProjectRegistry;

/// 返回全部项目，按添加顺序排列
pub async fn list_projects(registry: &ProjectRegistry) -> Result<Vec<Project>, String> {
    Ok(registry.list().await)
}

/// 新增项目
///
/// # 错误
/// 路径为空、不存在、不是目录、不是 git 仓库（按配置）、已存在，
/// 或写盘失败时返回错误信息
pub async fn add_project(
    registry: &ProjectRegistry,
    params: AddProjectParams,
) -> Result<Project, String> {
    registry.add(&params.path).await.map_err(|e| e.to_string())
}

/// 将项目命令注册到进程内桥接
pub fn install(bridge: &InProcessBridge, registry: Arc<ProjectRegistry>) {
    let list_registry = Arc::clone(&registry);
    bridge.register_typed(LIST_PROJECTS, move |_: serde_json::Value| {
        let registry = Arc::clone(&list_registry);
        async move { list_projects(&registry).await }
    });

    bridge.register_typed(ADD_PROJECT, move |params: AddProjectParams| {
        let registry = Arc::clone(&registry);
        async move { add_project(&registry, params).await }
    });
}

/// Tauri command 版本
///
/// 注册方式：
/// ```ignore
/// tauri::Builder::default()
///     .manage(registry)
///     .invoke_handler(tauri::generate_handler![
///         project_store::commands::projects::tauri_commands::list_projects,
///         project_store::commands::projects::tauri_commands::add_project,
///     ])
/// ```
#[cfg(feature = "tauri")]
pub mod tauri_commands {
    use tauri::State;

    use crate::models::project::{AddProjectParams, Project};
    use crate::services::registry::ProjectRegistry;

    #[tauri::command]
    pub async fn list_projects(
        registry: State<'_, ProjectRegistry>,
    ) -> Result<Vec<Project>, String> {
        super::list_projects(&registry).await
    }

    /// 前端以 `invoke("add_project", { path })` 调用
    #[tauri::command]
    pub async fn add_project(
        path: String,
        registry: State<'_, ProjectRegistry>,
    ) -> Result<Project, String> {
        super::add_project(&registry, AddProjectParams { path }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::HostConfig;
    use crate::services::project_store::ProjectStore;

    #[tokio::test]
    async fn test_store_over_installed_commands() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = dir.path().join("beta");
        std::fs::create_dir(&workspace).unwrap();

        let registry = Arc::new(
            ProjectRegistry::open(HostConfig::new(dir.path().join("data")))
                .await
                .unwrap(),
        );
        let bridge = Arc::new(InProcessBridge::new());
        install(&bridge, Arc::clone(&registry));
        assert_eq!(
            bridge.commands(),
            vec![ADD_PROJECT.to_string(), LIST_PROJECTS.to_string()]
        );

        let store = ProjectStore::create(bridge).await.unwrap();
        assert!(store.is_empty());

        let project = store
            .add(AddProjectParams::new(workspace.to_string_lossy()))
            .await
            .unwrap();
        assert_eq!(project.title, "beta");
        assert_eq!(*store.projects(), registry.list().await);

        let err = store
            .add(AddProjectParams::new(workspace.to_string_lossy()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("项目已存在"));
        assert_eq!(store.len(), 1);
    }
}
