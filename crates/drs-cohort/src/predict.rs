//! 人群风险预测
//!
//! 预测分析页面的两个确定性小模型：一年进展风险与治疗结局预估。
//! 与评分引擎同为演示公式，不是经过验证的临床模型

use serde::{Deserialize, Serialize};

/// 治疗方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentKind {
    LaserTherapy,
    AntiVegf,
    Combination,
    Observation,
}

impl TreatmentKind {
    /// 基准成功率（百分比）
    pub fn base_success_rate(&self) -> f64 {
        match self {
            TreatmentKind::LaserTherapy => 65.0,
            TreatmentKind::AntiVegf => 78.0,
            TreatmentKind::Combination => 85.0,
            TreatmentKind::Observation => 30.0,
        }
    }
}

/// 一年进展风险预测（百分比）
///
/// 当前分期贡献 stage*0.2，病程/30、(HbA1c-5.5)/6.5、年龄/80 分别
/// 截断到1后加权 0.3/0.3/0.2，合计乘100
pub fn predict_progression_risk(age: u32, duration_years: u32, hba1c: f64, current_stage: u8) -> f64 {
    let base_risk = current_stage as f64 * 0.2;
    let duration_risk = (duration_years as f64 / 30.0).min(1.0) * 0.3;
    let hba1c_risk = ((hba1c - 5.5) / 6.5).min(1.0) * 0.3;
    let age_risk = (age as f64 / 80.0).min(1.0) * 0.2;

    (base_risk + duration_risk + hba1c_risk + age_risk) * 100.0
}

/// 治疗结局预估（成功率百分比）
///
/// 基准成功率按患者风险评分衰减：base * (1 - risk_score/200)
pub fn predict_treatment_outcome(treatment: TreatmentKind, risk_score: f64) -> f64 {
    treatment.base_success_rate() * (1.0 - risk_score / 200.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progression_risk_literal_formula() {
        let expected = 2.0 * 0.2
            + (10.0_f64 / 30.0).min(1.0) * 0.3
            + ((7.5 - 5.5) / 6.5_f64).min(1.0) * 0.3
            + (55.0_f64 / 80.0).min(1.0) * 0.2;
        let predicted = predict_progression_risk(55, 10, 7.5, 2);
        assert!((predicted - expected * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_progression_risk_zero_baseline() {
        // 分期0、最短病程、最低HbA1c时只剩年龄与病程贡献
        let predicted = predict_progression_risk(25, 1, 5.5, 0);
        let expected = (1.0 / 30.0) * 0.3 * 100.0 + (25.0 / 80.0) * 0.2 * 100.0;
        assert!((predicted - expected).abs() < 1e-9);
    }

    #[test]
    fn test_progression_risk_monotonic_in_stage() {
        let mut previous = -1.0;
        for stage in 0..=3 {
            let predicted = predict_progression_risk(55, 10, 7.5, stage);
            assert!(predicted > previous);
            previous = predicted;
        }
    }

    #[test]
    fn test_treatment_outcome_scaling() {
        // 风险0时保持基准成功率
        assert_eq!(
            predict_treatment_outcome(TreatmentKind::Combination, 0.0),
            85.0
        );

        // 风险100时衰减一半
        assert_eq!(
            predict_treatment_outcome(TreatmentKind::Observation, 100.0),
            15.0
        );

        // 中间值
        let outcome = predict_treatment_outcome(TreatmentKind::AntiVegf, 65.0);
        assert!((outcome - 78.0 * (1.0 - 65.0 / 200.0)).abs() < 1e-9);
    }

    #[test]
    fn test_base_success_rates() {
        assert_eq!(TreatmentKind::LaserTherapy.base_success_rate(), 65.0);
        assert_eq!(TreatmentKind::AntiVegf.base_success_rate(), 78.0);
        assert_eq!(TreatmentKind::Combination.base_success_rate(), 85.0);
        assert_eq!(TreatmentKind::Observation.base_success_rate(), 30.0);
    }
}
