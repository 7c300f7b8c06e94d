//! 筛查分析演示程序
//!
//! 展示特征模拟与评分引擎的完整流程：采样、分期、风险判定与处置建议

use drs_analysis::ScoringEngine;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let engine = ScoringEngine::new();
    let mut rng = rand::thread_rng();

    println!("🔬 DR 筛查分析演示\n");

    // 1. 模拟一次完整分析
    let result = engine.analyze(&mut rng, 512, 512);

    println!("📋 分析结果:");
    println!("   分期: {} ({})", result.severity_stage, result.stage_info.name);
    println!("   随访建议: {}", result.stage_info.follow_up);
    println!("   置信度: {:.1}%", result.confidence * 100.0);
    println!("   处理耗时: {:.2}s", result.processing_time_secs);
    println!("   进展风险: {:.1}%", result.progression_risk * 100.0);
    println!("   图像质量: {:?} ({:.2})", result.image_quality.grade, result.image_quality.score);

    // 2. 特征计数
    println!("\n🔍 检出特征:");
    println!("   微动脉瘤: {}", result.features.microaneurysms.count);
    println!("   出血点: {}", result.features.hemorrhages.count);
    println!("   渗出物: {}", result.features.exudates.count);
    println!("   棉絮斑: {}", result.features.cotton_wool_spots.count);

    // 3. 风险判定
    println!("\n⚠️  风险判定:");
    for risk in &result.risk_assessment {
        println!("   - {} ({})", risk.finding, risk.level);
    }

    // 4. 处置建议
    println!("\n💡 处置建议:");
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!("   {}. {}", i + 1, rec);
    }

    // 5. 完整JSON输出
    println!("\n📦 JSON 结果:");
    println!("{}", serde_json::to_string_pretty(&result)?);

    println!("\n🎉 分析演示完成!");
    Ok(())
}
