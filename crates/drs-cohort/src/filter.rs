//! 队列过滤
//!
//! 患者管理页面的筛选条件：年龄区间、分期集合、HbA1c区间与风险档位

use drs_core::PatientRecord;
use serde::{Deserialize, Serialize};

/// 风险档位，映射到DR分期集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskBand {
    /// 该档位覆盖的分期
    pub fn stages(&self) -> &'static [u8] {
        match self {
            RiskBand::Low => &[0, 1],
            RiskBand::Moderate => &[2],
            RiskBand::High => &[3],
            RiskBand::VeryHigh => &[4],
        }
    }
}

/// 队列过滤器，所有条件可选且相互叠加
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortFilter {
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub stages: Option<Vec<u8>>,
    pub hba1c_min: Option<f64>,
    pub hba1c_max: Option<f64>,
    pub risk_band: Option<RiskBand>,
}

impl Default for CohortFilter {
    fn default() -> Self {
        Self {
            age_min: None,
            age_max: None,
            stages: None,
            hba1c_min: None,
            hba1c_max: None,
            risk_band: None,
        }
    }
}

impl CohortFilter {
    /// 应用过滤条件，返回符合的患者副本
    pub fn apply(&self, patients: &[PatientRecord]) -> Vec<PatientRecord> {
        let mut selected: Vec<&PatientRecord> = patients.iter().collect();

        if let Some(age_min) = self.age_min {
            selected.retain(|p| p.age >= age_min);
        }

        if let Some(age_max) = self.age_max {
            selected.retain(|p| p.age <= age_max);
        }

        if let Some(stages) = &self.stages {
            selected.retain(|p| stages.contains(&p.dr_stage));
        }

        if let Some(hba1c_min) = self.hba1c_min {
            selected.retain(|p| p.hba1c >= hba1c_min);
        }

        if let Some(hba1c_max) = self.hba1c_max {
            selected.retain(|p| p.hba1c <= hba1c_max);
        }

        if let Some(band) = self.risk_band {
            selected.retain(|p| band.stages().contains(&p.dr_stage));
        }

        selected.into_iter().cloned().collect()
    }
}
