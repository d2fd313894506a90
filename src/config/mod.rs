//! 配置管理
//!
//! 分层加载：config.toml -> config.{APP_ENV}.toml -> LMS_* 环境变量 -> 显式覆盖。
//! 加载后补全工作线程数并校验取值。

mod r#impl;
mod structs;

pub use structs::*;
