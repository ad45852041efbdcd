//! # 宿主端项目注册表
//!
//! `list_projects` / `add_project` 两个命令在宿主端的实际实现：
//! 维护已添加项目的列表，负责路径校验、ID 分配和持久化。
//!
//! ## 新增项目的校验顺序
//! 1. 去除首尾空白后不能为空
//! 2. 路径必须存在，解析为规范化的绝对路径
//! 3. 必须是目录
//! 4. 配置要求时，目录下必须有 `.git`
//! 5. 不能与已有项目路径重复
//!
//! ## 并发
//! 所有新增操作通过 `tokio::sync::Mutex` 串行化，校验、追加和写盘在同一把锁内完成；
//! 写盘失败时回滚内存中的追加。

use std::path::Path;

use tokio::sync::Mutex;

use crate::error::RegistryError;
use crate::models::config::HostConfig;
use crate::models::project::Project;
use crate::services::storage::ProjectStorage;
use crate::utils::path::project_title;

/// 宿主端项目注册表
pub struct ProjectRegistry {
    config: HostConfig,
    storage: ProjectStorage,
    projects: Mutex<Vec<Project>>,
}

impl ProjectRegistry {
    /// 打开注册表，加载已持久化的项目
    ///
    /// # 错误
    /// 项目列表文件存在但无法读取或解析时返回错误
    pub async fn open(config: HostConfig) -> Result<Self, RegistryError> {
        let storage = ProjectStorage::new(config.data_dir());
        let projects = storage.load().await?;

        log::info!(
            "已从 {} 加载 {} 个项目",
            storage.file_path().display(),
            projects.len()
        );

        Ok(Self {
            config,
            storage,
            projects: Mutex::new(projects),
        })
    }

    /// 所有项目，按添加顺序排列
    pub async fn list(&self) -> Vec<Project> {
        self.projects.lock().await.clone()
    }

    /// 新增项目
    ///
    /// # 参数
    /// - `path` - 项目目录路径，可以是相对路径或包含 `..`，保存时使用规范化后的绝对路径
    ///
    /// # 返回值
    /// 新建的项目：随机 UUID 作为 ID，目录名作为标题
    ///
    /// # 错误
    /// 校验失败或写盘失败时返回错误，此时注册表内容不变
    pub async fn add(&self, path: &str) -> Result<Project, RegistryError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::EmptyPath);
        }

        let canonical = match tokio::fs::canonicalize(trimmed).await {
            Ok(canonical) => canonical,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RegistryError::PathNotFound(trimmed.to_string()));
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: trimmed.into(),
                    source,
                });
            }
        };
        let display_path = canonical.to_string_lossy().to_string();

        let metadata = tokio::fs::metadata(&canonical)
            .await
            .map_err(|source| RegistryError::Io {
                path: canonical.clone(),
                source,
            })?;
        if !metadata.is_dir() {
            return Err(RegistryError::NotADirectory(display_path));
        }

        if self.config.require_git_repository && !is_git_repository(&canonical) {
            return Err(RegistryError::NotAGitRepository(display_path));
        }

        let mut projects = self.projects.lock().await;
        if projects.iter().any(|project| project.path == display_path) {
            return Err(RegistryError::AlreadyExists(display_path));
        }

        let project = Project {
            id: uuid::Uuid::new_v4().to_string(),
            title: project_title(&canonical),
            path: display_path,
        };

        projects.push(project.clone());
        if let Err(e) = self.storage.save(&projects).await {
            projects.pop();
            log::error!("保存项目列表失败: {}", e);
            return Err(e);
        }

        log::info!("已注册项目 {} -> {}", project.id, project.path);
        Ok(project)
    }
}

fn is_git_repository(path: &Path) -> bool {
    path.join(".git").exists()
}
