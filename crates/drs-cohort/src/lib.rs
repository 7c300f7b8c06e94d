//! # DRS Cohort
//!
//! 合成患者队列：随机生成、过滤、统计分析与人群风险预测。
//! 患者档案为每次请求重新生成的虚构数据，队列内风险相关性由统一的
//! 加权风险公式保证，不对应任何真实人群。

pub mod analytics;
pub mod filter;
pub mod generator;
pub mod predict;

pub use analytics::{correlation_matrix, stage_distribution, summarize, CohortSummary, CorrelationMatrix};
pub use filter::{CohortFilter, RiskBand};
pub use generator::{risk_profile, CohortGenerator};
pub use predict::{predict_progression_risk, predict_treatment_outcome, TreatmentKind};
