//! # 宿主端配置数据模型
//!
//! 定义宿主端项目注册表（ProjectRegistry）的运行配置 `HostConfig`。
//!
//! 配置来源按优先级：
//! 1. 数据目录：调用方显式传入，否则使用 `<本地数据目录>/project-store`
//! 2. 数据目录下的 `config.json`（可选），字段使用 camelCase 命名
//!
//! 配置文件不存在时使用默认值；文件存在但无法解析时返回错误。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::utils::path;

/// 配置文件名：位于数据目录下
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 宿主端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// 数据目录：`projects.json` 和 `config.json` 所在目录
    pub data_dir: PathBuf,

    /// 是否要求新增的项目目录必须是 git 仓库（包含 `.git`）
    pub require_git_repository: bool,
}

/// `config.json` 的文件内容
///
/// 所有字段可选，缺省字段保持默认值。
///
/// ```json
/// { "requireGitRepository": true }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    require_git_repository: Option<bool>,
}

impl HostConfig {
    /// 以指定数据目录创建默认配置
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            require_git_repository: false,
        }
    }

    /// 加载配置
    ///
    /// # 参数
    /// - `data_dir` - 数据目录；为 `None` 时使用平台默认数据目录
    ///
    /// # 错误
    /// 无法确定默认数据目录，或 `config.json` 存在但无法读取/解析时返回错误
    pub async fn load(data_dir: Option<PathBuf>) -> Result<Self, RegistryError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => path::get_app_data_path()?,
        };

        let mut config = Self::new(data_dir);
        let config_path = config.config_file();

        // 配置文件不存在时使用默认值
        if !config_path.exists() {
            log::debug!("未找到配置文件 {}，使用默认配置", config_path.display());
            return Ok(config);
        }

        let content = tokio::fs::read_to_string(&config_path)
            .await
            .map_err(|source| RegistryError::Io {
                path: config_path.clone(),
                source,
            })?;
        let file: ConfigFile =
            serde_json::from_str(&content).map_err(|source| RegistryError::Corrupted {
                path: config_path.clone(),
                source,
            })?;

        if let Some(require_git) = file.require_git_repository {
            config.require_git_repository = require_git;
        }

        Ok(config)
    }

    /// 配置文件的完整路径
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
