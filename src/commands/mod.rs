//! # Command 处理模块
//!
//! 宿主端命令处理函数，按功能域划分：
//! - `projects` - 项目列表和新增项目

pub mod projects;
