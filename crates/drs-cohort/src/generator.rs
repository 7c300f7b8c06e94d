//! 患者队列生成
//!
//! 在文档化区间内均匀采样人口学指标，并用统一加权公式导出DR分期与风险评分，
//! 保证 dr_stage 与 risk_score 永远来自同一次风险计算

use chrono::{Duration, Utc};
use drs_core::utils::{clamp_unit, format_patient_id, round1};
use drs_core::{DiabetesType, Gender, PatientRecord};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// 虚构姓名表（演示数据）
const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas",
    "Sarah", "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
];

/// 人口学风险公式
///
/// 四项归一化子风险的加权和：年龄/80 权重0.2、病程/30截断到1 权重0.3、
/// (HbA1c-5.5)/6.5截断到1 权重0.3、(收缩压-110)/70截断到1 权重0.2。
/// 结果最终截断到 [0,1]
pub fn risk_profile(age: u32, duration_years: u32, hba1c: f64, bp_systolic: u32) -> f64 {
    let age_risk = age as f64 / 80.0 * 0.2;
    let duration_risk = (duration_years as f64 / 30.0).min(1.0) * 0.3;
    let hba1c_risk = ((hba1c - 5.5) / 6.5).min(1.0) * 0.3;
    let bp_risk = ((bp_systolic as f64 - 110.0) / 70.0).min(1.0) * 0.2;

    clamp_unit(age_risk + duration_risk + hba1c_risk + bp_risk)
}

/// 患者队列生成器
///
/// 无共享可变状态，随机源由调用方注入，每次调用从头生成
#[derive(Debug, Clone, Default)]
pub struct CohortGenerator;

impl CohortGenerator {
    /// 创建新的队列生成器
    pub fn new() -> Self {
        Self
    }

    /// 生成 count 名患者的有序队列
    pub fn generate(&self, count: usize, rng: &mut impl Rng) -> Vec<PatientRecord> {
        let today = Utc::now().date_naive();
        let mut patients = Vec::with_capacity(count);

        for i in 0..count {
            // 1. 采样人口学指标
            let age = rng.gen_range(25..=80);
            let diabetes_duration_years = rng.gen_range(1..=30);
            let hba1c = round1(rng.gen_range(5.5..=12.0));
            let bp_systolic = rng.gen_range(110..=180);
            let bp_diastolic = rng.gen_range(70..=110);

            // 2. 由同一次风险计算导出分期与评分
            let base_risk = risk_profile(age, diabetes_duration_years, hba1c, bp_systolic);
            let dr_stage = ((base_risk * 4.0) as u8).min(4);
            let risk_score = round1(base_risk * 100.0);

            // 3. 虚构身份与日程
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
            let gender = if rng.gen_bool(0.5) {
                Gender::Male
            } else {
                Gender::Female
            };
            let diabetes_type = if rng.gen_bool(0.5) {
                DiabetesType::Type1
            } else {
                DiabetesType::Type2
            };

            let last_screening = today - Duration::days(rng.gen_range(0..=730));
            let next_appointment = today + Duration::days(rng.gen_range(1..=180));

            patients.push(PatientRecord {
                patient_id: format_patient_id(i),
                name: format!("{} {}", first, last),
                age,
                gender,
                diabetes_type,
                diabetes_duration_years,
                hba1c,
                bp_systolic,
                bp_diastolic,
                dr_stage,
                risk_score,
                last_screening,
                next_appointment,
            });
        }

        debug!("Generated synthetic cohort of {} patients", patients.len());
        patients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_zero_is_empty() {
        let generator = CohortGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generator.generate(0, &mut rng).is_empty());
    }

    #[test]
    fn test_generate_exact_count_and_ranges() {
        let generator = CohortGenerator::new();
        let mut rng = StdRng::seed_from_u64(2);

        let cohort = generator.generate(100, &mut rng);
        assert_eq!(cohort.len(), 100);

        for patient in &cohort {
            assert!((25..=80).contains(&patient.age));
            assert!((1..=30).contains(&patient.diabetes_duration_years));
            assert!(patient.hba1c >= 5.5 && patient.hba1c <= 12.0);
            assert!((110..=180).contains(&patient.bp_systolic));
            assert!((70..=110).contains(&patient.bp_diastolic));
            assert!(patient.dr_stage <= 4);
            assert!(patient.risk_score >= 0.0 && patient.risk_score <= 100.0);
            assert!(!patient.name.is_empty());
        }
    }

    #[test]
    fn test_patient_ids_are_sequential() {
        let generator = CohortGenerator::new();
        let mut rng = StdRng::seed_from_u64(3);

        let cohort = generator.generate(3, &mut rng);
        assert_eq!(cohort[0].patient_id, "P10000");
        assert_eq!(cohort[1].patient_id, "P10001");
        assert_eq!(cohort[2].patient_id, "P10002");
    }

    #[test]
    fn test_stage_and_score_share_one_risk_evaluation() {
        let generator = CohortGenerator::new();
        let mut rng = StdRng::seed_from_u64(4);

        for patient in generator.generate(200, &mut rng) {
            let base = risk_profile(
                patient.age,
                patient.diabetes_duration_years,
                patient.hba1c,
                patient.bp_systolic,
            );
            assert_eq!(patient.dr_stage, ((base * 4.0) as u8).min(4));
            assert_eq!(patient.risk_score, (base * 1000.0).round() / 10.0);
        }
    }

    #[test]
    fn test_risk_profile_literal_formula() {
        // 全部子风险饱和时恰好为 1
        assert_eq!(risk_profile(80, 30, 12.0, 180), 1.0);

        // 手算样例
        let expected = 55.0 / 80.0 * 0.2
            + (10.0_f64 / 30.0).min(1.0) * 0.3
            + ((7.5 - 5.5) / 6.5_f64).min(1.0) * 0.3
            + ((140.0 - 110.0) / 70.0_f64).min(1.0) * 0.2;
        assert!((risk_profile(55, 10, 7.5, 140) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_generation_reproducible_with_same_seed() {
        let generator = CohortGenerator::new();

        let mut rng_a = StdRng::seed_from_u64(77);
        let mut rng_b = StdRng::seed_from_u64(77);

        let cohort_a = generator.generate(20, &mut rng_a);
        let cohort_b = generator.generate(20, &mut rng_b);

        let json_a = serde_json::to_string(&cohort_a).unwrap();
        let json_b = serde_json::to_string(&cohort_b).unwrap();
        assert_eq!(json_a, json_b);
    }

    #[test]
    fn test_screening_dates_bracket_today() {
        let generator = CohortGenerator::new();
        let mut rng = StdRng::seed_from_u64(5);
        let today = Utc::now().date_naive();

        for patient in generator.generate(50, &mut rng) {
            assert!(patient.last_screening <= today);
            assert!(patient.next_appointment > today);
        }
    }
}
