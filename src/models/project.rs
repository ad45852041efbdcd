//! # 项目数据模型
//!
//! 定义了项目（Project）及新增项目参数（AddProjectParams）的 Rust 结构体，
//! 对应前端 TypeScript 中的 `Project` 类型和 `add` 的参数对象。
//!
//! 这些结构体通过 `serde` 的 Serialize/Deserialize 特征实现：
//! - 命令桥接序列化：以 JSON 形式在 store 与宿主端命令之间传输
//! - 文件系统读写：宿主端以 JSON 数组形式持久化到 `projects.json`

use serde::{Deserialize, Serialize};

/// 项目数据结构
///
/// 表示一个被追踪的文件系统位置。一旦被添加即不可变。
///
/// 对应前端 TypeScript 类型：
/// ```typescript
/// type Project = {
///   id: string;
///   title: string;
///   path: string;
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    /// 项目 ID：由宿主端分配的不透明唯一标识（store 端从不自行生成）
    pub id: String,

    /// 项目标题：显示名称，内容任意
    pub title: String,

    /// 项目路径：文件系统路径字符串，语义由宿主端决定
    pub path: String,
}

impl Project {
    pub fn new(id: impl Into<String>, title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: path.into(),
        }
    }
}

/// 新增项目的参数
///
/// 对应前端的 `{ path: string }`。store 端不做任何校验，
/// 路径是否为空、是否存在均由宿主端判断。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProjectParams {
    /// 要添加为项目的文件系统路径
    pub path: String,
}

impl AddProjectParams {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}
