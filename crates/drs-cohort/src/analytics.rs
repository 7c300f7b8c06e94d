//! 队列统计分析
//!
//! 仪表盘与分析页面用到的聚合指标：概览统计、分期分布与风险因子相关性矩阵

use drs_core::PatientRecord;
use serde::{Deserialize, Serialize};

/// 队列概览统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortSummary {
    pub total_patients: usize,
    pub high_risk_cases: usize,           // dr_stage >= 3
    pub progression_cases: usize,         // dr_stage >= 2
    pub high_risk_score_patients: usize,  // risk_score > 70
    pub average_hba1c: f64,
    pub average_duration_years: f64,
}

/// 计算队列概览统计
pub fn summarize(patients: &[PatientRecord]) -> CohortSummary {
    let total = patients.len();

    let (hba1c_sum, duration_sum) = patients.iter().fold((0.0, 0.0), |(h, d), p| {
        (h + p.hba1c, d + p.diabetes_duration_years as f64)
    });

    CohortSummary {
        total_patients: total,
        high_risk_cases: patients.iter().filter(|p| p.dr_stage >= 3).count(),
        progression_cases: patients.iter().filter(|p| p.dr_stage >= 2).count(),
        high_risk_score_patients: patients.iter().filter(|p| p.risk_score > 70.0).count(),
        average_hba1c: if total > 0 { hba1c_sum / total as f64 } else { 0.0 },
        average_duration_years: if total > 0 {
            duration_sum / total as f64
        } else {
            0.0
        },
    }
}

/// 各DR分期的患者数（索引即分期）
pub fn stage_distribution(patients: &[PatientRecord]) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for patient in patients {
        let stage = (patient.dr_stage as usize).min(4);
        counts[stage] += 1;
    }
    counts
}

/// 风险因子相关性矩阵
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<String>,
    pub values: Vec<Vec<f64>>, // 按variables顺序的皮尔逊相关系数
}

/// 计算 (age, duration, hba1c, bp_systolic, risk_score) 的皮尔逊相关性矩阵
pub fn correlation_matrix(patients: &[PatientRecord]) -> CorrelationMatrix {
    let variables = vec![
        "age".to_string(),
        "diabetes_duration_years".to_string(),
        "hba1c".to_string(),
        "bp_systolic".to_string(),
        "risk_score".to_string(),
    ];

    let series: Vec<Vec<f64>> = vec![
        patients.iter().map(|p| p.age as f64).collect(),
        patients
            .iter()
            .map(|p| p.diabetes_duration_years as f64)
            .collect(),
        patients.iter().map(|p| p.hba1c).collect(),
        patients.iter().map(|p| p.bp_systolic as f64).collect(),
        patients.iter().map(|p| p.risk_score).collect(),
    ];

    let values = series
        .iter()
        .map(|xs| series.iter().map(|ys| pearson(xs, ys)).collect())
        .collect();

    CorrelationMatrix { variables, values }
}

/// 皮尔逊相关系数；样本不足或方差为零时返回 0
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    covariance / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drs_core::{DiabetesType, Gender};

    fn make_patient(age: u32, duration: u32, hba1c: f64, stage: u8, risk: f64) -> PatientRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PatientRecord {
            patient_id: "P10000".to_string(),
            name: "Test Patient".to_string(),
            age,
            gender: Gender::Male,
            diabetes_type: DiabetesType::Type1,
            diabetes_duration_years: duration,
            hba1c,
            bp_systolic: 100 + age,
            bp_diastolic: 80,
            dr_stage: stage,
            risk_score: risk,
            last_screening: date,
            next_appointment: date,
        }
    }

    #[test]
    fn test_summary_counters() {
        let patients = vec![
            make_patient(30, 5, 6.0, 0, 20.0),
            make_patient(50, 10, 7.5, 2, 50.0),
            make_patient(60, 20, 9.0, 3, 75.0),
            make_patient(70, 28, 11.0, 4, 90.0),
        ];

        let summary = summarize(&patients);
        assert_eq!(summary.total_patients, 4);
        assert_eq!(summary.high_risk_cases, 2);
        assert_eq!(summary.progression_cases, 3);
        assert_eq!(summary.high_risk_score_patients, 2);
        assert!((summary.average_hba1c - 8.375).abs() < 1e-12);
        assert!((summary.average_duration_years - 15.75).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_empty_cohort() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_patients, 0);
        assert_eq!(summary.average_hba1c, 0.0);
        assert_eq!(summary.average_duration_years, 0.0);
    }

    #[test]
    fn test_stage_distribution_counts() {
        let patients = vec![
            make_patient(30, 5, 6.0, 0, 10.0),
            make_patient(40, 8, 6.5, 0, 15.0),
            make_patient(50, 10, 7.5, 2, 50.0),
            make_patient(70, 28, 11.0, 4, 90.0),
        ];

        assert_eq!(stage_distribution(&patients), [2, 0, 1, 0, 1]);
    }

    #[test]
    fn test_correlation_matrix_shape() {
        let patients: Vec<PatientRecord> = (0..20)
            .map(|i| make_patient(25 + i, 1 + i, 6.0 + i as f64 * 0.2, 1, 10.0 + i as f64))
            .collect();

        let matrix = correlation_matrix(&patients);
        assert_eq!(matrix.variables.len(), 5);
        assert_eq!(matrix.values.len(), 5);

        for (i, row) in matrix.values.iter().enumerate() {
            assert_eq!(row.len(), 5);
            // 对角线为 1，矩阵对称
            assert!((row[i] - 1.0).abs() < 1e-9);
            for (j, value) in row.iter().enumerate() {
                assert!((value - matrix.values[j][i]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_perfectly_linear_variables_correlate_to_one() {
        // age 与 risk_score 严格线性相关
        let patients: Vec<PatientRecord> = (0..10)
            .map(|i| make_patient(30 + i, 10, 7.0, 1, (30 + i) as f64 * 2.0))
            .collect();

        let matrix = correlation_matrix(&patients);
        let age_idx = 0;
        let risk_idx = 4;
        assert!((matrix.values[age_idx][risk_idx] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_variable_yields_zero() {
        // hba1c 恒定，方差为零
        let patients: Vec<PatientRecord> = (0..10)
            .map(|i| make_patient(30 + i, 1 + i, 7.0, 1, 10.0 + i as f64))
            .collect();

        let matrix = correlation_matrix(&patients);
        let hba1c_idx = 2;
        assert_eq!(matrix.values[hba1c_idx][0], 0.0);
        assert_eq!(matrix.values[hba1c_idx][hba1c_idx], 0.0);
    }
}
