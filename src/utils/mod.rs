//! # 通用工具模块
//! - `path` - 数据目录定位、项目标题推导

pub mod path;
