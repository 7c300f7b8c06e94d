//! DR分期静态元数据
//!
//! 国际临床分级 0（无病变）到 4（增殖期）的五级目录

use drs_core::DrStageInfo;
use serde::{Deserialize, Serialize};

/// DR分期目录
///
/// 进程级常量表，键为分期编号 0-4
#[derive(Debug, Clone)]
pub struct StageCatalog {
    stages: Vec<DrStageInfo>,
}

impl StageCatalog {
    /// 创建分期目录实例
    pub fn new() -> Self {
        let stages = vec![
            DrStageInfo {
                stage: 0,
                name: "No Diabetic Retinopathy".to_string(),
                description: "No visible retinal abnormalities".to_string(),
                risk_label: "Low".to_string(),
                follow_up: "Annual screening".to_string(),
                color: "#2ecc71".to_string(),
            },
            DrStageInfo {
                stage: 1,
                name: "Mild Non-Proliferative DR".to_string(),
                description: "Microaneurysms only".to_string(),
                risk_label: "Low to Moderate".to_string(),
                follow_up: "6-12 month follow-up".to_string(),
                color: "#f39c12".to_string(),
            },
            DrStageInfo {
                stage: 2,
                name: "Moderate Non-Proliferative DR".to_string(),
                description: "More than just microaneurysms but less than severe NPDR"
                    .to_string(),
                risk_label: "Moderate".to_string(),
                follow_up: "3-6 month follow-up".to_string(),
                color: "#e67e22".to_string(),
            },
            DrStageInfo {
                stage: 3,
                name: "Severe Non-Proliferative DR".to_string(),
                description:
                    "Any of the following with no signs of PDR: 20+ intraretinal hemorrhages, venous beading, IRMA"
                        .to_string(),
                risk_label: "High".to_string(),
                follow_up: "Prompt referral to ophthalmologist".to_string(),
                color: "#e74c3c".to_string(),
            },
            DrStageInfo {
                stage: 4,
                name: "Proliferative DR".to_string(),
                description: "Neovascularization and/or vitreous/preretinal hemorrhage"
                    .to_string(),
                risk_label: "Very High".to_string(),
                follow_up: "Immediate treatment required".to_string(),
                color: "#c0392b".to_string(),
            },
        ];

        Self { stages }
    }

    /// 按分期编号查询元数据
    pub fn stage_info(&self, stage: u8) -> Option<&DrStageInfo> {
        self.stages.get(stage as usize)
    }

    /// 按分期编号查询，越界时截断到最高有效分期
    pub fn stage_info_saturating(&self, stage: u8) -> &DrStageInfo {
        let index = (stage as usize).min(self.stages.len() - 1);
        &self.stages[index]
    }

    /// 获取全部分期
    pub fn all(&self) -> &[DrStageInfo] {
        &self.stages
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// 病程进展时间线上的一个节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionPoint {
    pub stage_name: String,
    pub months: u32,
    pub risk_percent: f64,
}

/// 疾病进展时间线静态数据集（图表用）
pub fn progression_timeline() -> Vec<ProgressionPoint> {
    let stages = ["No DR", "Mild NPDR", "Moderate NPDR", "Severe NPDR", "PDR"];
    let months = [0, 24, 48, 72, 96];
    let risks = [5.0, 20.0, 45.0, 75.0, 90.0];

    stages
        .iter()
        .zip(months.iter())
        .zip(risks.iter())
        .map(|((name, m), r)| ProgressionPoint {
            stage_name: name.to_string(),
            months: *m,
            risk_percent: *r,
        })
        .collect()
}
