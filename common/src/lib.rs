//! 房屋租赁服务公共模块
//!
//! 提供各服务共享的基础设施：
//! - 配置加载
//! - 统一错误类型与响应格式
//! - 领域模型
//! - 中间件（请求 ID、令牌认证）

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod utils;
