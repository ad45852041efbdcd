//! # 业务逻辑服务模块
//!
//! - `project_store` - 前端侧的响应式项目列表仓库
//! - `registry` - 宿主端项目注册表：校验、ID 分配
//! - `storage` - 宿主端项目列表的 JSON 持久化

pub mod project_store;
pub mod registry;
pub mod storage;
