//! # 项目列表持久化
//!
//! 宿主端将项目列表以 JSON 数组形式保存在 `<数据目录>/projects.json`。
//!
//! - 文件不存在：视为空列表（首次启动）
//! - 文件存在但无法解析：返回错误，不会用空列表覆盖用户数据
//! - 写入：先写临时文件再重命名，避免写到一半时进程退出导致文件损坏

use std::path::{Path, PathBuf};

use crate::error::RegistryError;
use crate::models::project::Project;

/// 项目列表文件名
pub const PROJECTS_FILE_NAME: &str = "projects.json";

/// 项目列表文件读写
#[derive(Debug, Clone)]
pub struct ProjectStorage {
    file_path: PathBuf,
}

impl ProjectStorage {
    /// 在指定数据目录下创建存储
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(PROJECTS_FILE_NAME),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// 读取所有已保存的项目
    ///
    /// # 错误
    /// 文件存在但无法读取或 JSON 解析失败时返回错误
    pub async fn load(&self) -> Result<Vec<Project>, RegistryError> {
        if !self.file_path.exists() {
            return Ok(vec![]);
        }

        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(|source| RegistryError::Io {
                path: self.file_path.clone(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| RegistryError::Corrupted {
            path: self.file_path.clone(),
            source,
        })
    }

    /// 覆盖保存完整的项目列表
    ///
    /// 数据目录不存在时会递归创建。
    pub async fn save(&self, projects: &[Project]) -> Result<(), RegistryError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| RegistryError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        let content =
            serde_json::to_string_pretty(projects).map_err(|source| RegistryError::Serialize {
                path: self.file_path.clone(),
                source,
            })?;

        let temp_path = self.file_path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|source| RegistryError::Io {
                path: temp_path.clone(),
                source,
            })?;

        tokio::fs::rename(&temp_path, &self.file_path)
            .await
            .map_err(|source| RegistryError::Io {
                path: self.file_path.clone(),
                source,
            })
    }
}
