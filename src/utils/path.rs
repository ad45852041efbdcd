//! # 路径工具函数
//!
//! 提供与文件路径相关的工具函数，包括：
//! - 获取应用数据目录路径（`<本地数据目录>/project-store`）
//! - 从项目路径推导项目标题

use std::path::{Path, PathBuf};

use crate::error::RegistryError;

/// 应用数据目录名
const APP_DIR_NAME: &str = "project-store";

/// 获取应用数据目录的绝对路径
///
/// 使用 `dirs` crate 获取跨平台的本地数据目录。
///
/// # 错误
/// 如果无法确定本地数据目录（极端情况，如无 HOME 环境变量），返回错误。
///
/// # 示例
/// - Windows: `C:\Users\username\AppData\Local\project-store`
/// - Linux: `/home/username/.local/share/project-store`
/// - macOS: `/Users/username/Library/Application Support/project-store`
pub fn get_app_data_path() -> Result<PathBuf, RegistryError> {
    let base = dirs::data_local_dir().ok_or(RegistryError::NoDataDir)?;
    Ok(base.join(APP_DIR_NAME))
}

/// 从项目路径推导项目标题
///
/// 取路径的最后一个组成部分（目录名）；对于 `/` 或 `C:\` 这类没有目录名的路径，
/// 退回为完整路径字符串。
pub fn project_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_title_uses_last_component() {
        let path = Path::new("/home/user/projects/myapp");
        assert_eq!(project_title(path), "myapp");
    }

    #[test]
    fn test_project_title_falls_back_to_full_path() {
        assert_eq!(project_title(Path::new("/")), "/");
    }

    #[test]
    fn test_app_data_path_ends_with_app_dir() {
        if let Ok(path) = get_app_data_path() {
            assert!(path.ends_with(APP_DIR_NAME));
        }
    }
}
