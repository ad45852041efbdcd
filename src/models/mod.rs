//! # 数据模型模块
//!
//! 所有结构体均派生 `Serialize` 和 `Deserialize`，用于命令桥接传输和 JSON 文件读写。
//! - `project` - 项目和新增项目参数
//! - `config` - 宿主端配置

pub mod config;
pub mod project;
