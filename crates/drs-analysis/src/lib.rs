//! # DRS Analysis
//!
//! 视网膜图像“分析”引擎：特征模拟、严重度分期、风险判定、进展风险与处置建议。
//!
//! 重要说明：本引擎不包含任何真实的图像处理或机器学习流程。
//! 全部特征均为随机采样的演示数据，分期与风险值只是对这些随机输入的
//! 确定性加权计算，仅用于界面演示，绝不可用于临床判断。

pub mod features;
pub mod quality;
pub mod scoring;

pub use features::FeatureSimulator;
pub use quality::{assess_image_quality, grade_for};
pub use scoring::ScoringEngine;
