//! # DRS Knowledge
//!
//! DR知识库静态目录：分期元数据、治疗方案、预防策略与临床筛查指南。
//! 全部内容为进程级常量表，演示用虚构资料，不作为临床依据。

pub mod guidelines;
pub mod stages;
pub mod treatments;

pub use guidelines::{GuidelineCatalog, GuidelineItem, GuidelineSection, PreventionStrategy, SymptomGroup};
pub use stages::{progression_timeline, ProgressionPoint, StageCatalog};
pub use treatments::{TreatmentBand, TreatmentCatalog, TreatmentEffectiveness};
