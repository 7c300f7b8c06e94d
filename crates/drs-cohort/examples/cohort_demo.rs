//! 患者队列演示程序
//!
//! 展示队列生成、过滤与统计分析的完整流程

use drs_cohort::{
    correlation_matrix, predict_progression_risk, predict_treatment_outcome, stage_distribution,
    summarize, CohortFilter, CohortGenerator, RiskBand, TreatmentKind,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let generator = CohortGenerator::new();
    let mut rng = rand::thread_rng();

    println!("👥 患者队列演示\n");

    // 1. 生成队列
    let cohort = generator.generate(100, &mut rng);
    println!("✅ 生成了 {} 名虚构患者", cohort.len());

    // 2. 概览统计
    let summary = summarize(&cohort);
    println!("\n📊 队列概览:");
    println!("   总人数: {}", summary.total_patients);
    println!("   高风险病例 (分期>=3): {}", summary.high_risk_cases);
    println!("   进展病例 (分期>=2): {}", summary.progression_cases);
    println!("   平均HbA1c: {:.1}%", summary.average_hba1c);
    println!("   平均病程: {:.1} 年", summary.average_duration_years);

    // 3. 分期分布
    let distribution = stage_distribution(&cohort);
    println!("\n📈 分期分布:");
    for (stage, count) in distribution.iter().enumerate() {
        println!("   分期 {}: {} 人", stage, count);
    }

    // 4. 过滤示例：45-70岁的高风险患者
    let filter = CohortFilter {
        age_min: Some(45),
        age_max: Some(70),
        risk_band: Some(RiskBand::High),
        ..Default::default()
    };
    let filtered = filter.apply(&cohort);
    println!("\n🔎 45-70岁高风险患者: {} 人", filtered.len());
    for patient in filtered.iter().take(5) {
        println!(
            "   - {} {} ({}岁, HbA1c {:.1}%, 风险评分 {:.1})",
            patient.patient_id, patient.name, patient.age, patient.hba1c, patient.risk_score
        );
    }

    // 5. 相关性矩阵
    let matrix = correlation_matrix(&cohort);
    println!("\n🧮 风险因子与risk_score的相关性:");
    let risk_idx = matrix.variables.len() - 1;
    for (variable, row) in matrix.variables.iter().zip(matrix.values.iter()) {
        println!("   {} -> {:.3}", variable, row[risk_idx]);
    }

    // 6. 预测示例
    let progression = predict_progression_risk(55, 10, 7.5, 2);
    let outcome = predict_treatment_outcome(TreatmentKind::AntiVegf, 65.0);
    println!("\n🔮 预测示例:");
    println!("   55岁/病程10年/HbA1c 7.5/分期2 的一年进展风险: {:.1}%", progression);
    println!("   风险评分65接受Anti-VEGF的预估成功率: {:.1}%", outcome);

    println!("\n🎉 队列演示完成!");
    Ok(())
}
