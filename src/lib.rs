//! # 产品 REST 服务
//!
//! 通过 HTTP 暴露 MongoDB 中的产品和职位集合：
//! - 列出集合中的全部文档
//! - 按 ObjectId 查询单个产品
//! - 创建产品（必填字段校验）

pub mod app;
pub mod core;
pub mod infrastructure;
pub mod server;

pub use app::{router, AppState};
pub use infrastructure::config::AppConfig;
