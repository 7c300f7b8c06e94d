//! # DRS Core
//!
//! 糖尿病视网膜病变(DR)筛查演示平台的核心模块，提供基础数据结构、错误定义和通用工具。
//!
//! 注意：本平台的全部“分析”结果均为随机模拟的演示数据，不具备任何诊断价值。

pub mod error;
pub mod models;
pub mod utils;

pub use error::{DrsError, Result};
pub use models::*;
