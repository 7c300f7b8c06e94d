//! 严重度评分引擎
//!
//! 对特征集合做确定性加权计算：分期、风险判定、进展风险与处置建议。
//! 分期是特征的纯函数，“严重度评分”与“分期”是同一个数值。

use drs_core::utils::clamp_unit;
use drs_core::{AnalysisResult, RetinalFeatureSet, RiskFinding, RiskLevel};
use drs_knowledge::StageCatalog;
use rand::Rng;
use tracing::debug;

use crate::features::FeatureSimulator;
use crate::quality::assess_image_quality;

/// 各特征组的饱和阈值：计数达到该值时该组贡献饱和
const MICROANEURYSM_SATURATION: f64 = 15.0;
const HEMORRHAGE_SATURATION: f64 = 10.0;
const EXUDATE_SATURATION: f64 = 12.0;
const COTTON_WOOL_SATURATION: f64 = 5.0;

/// 各特征组权重，合计 1.0
const MICROANEURYSM_WEIGHT: f64 = 0.20;
const HEMORRHAGE_WEIGHT: f64 = 0.30;
const EXUDATE_WEIGHT: f64 = 0.25;
const COTTON_WOOL_WEIGHT: f64 = 0.25;

/// 各分期的基础进展风险
const STAGE_BASE_RISK: [f64; 5] = [0.05, 0.15, 0.35, 0.65, 0.85];

/// 进展风险上限
const PROGRESSION_RISK_CAP: f64 = 0.95;

/// 严重度评分引擎
///
/// 协调特征模拟与各项评分计算，自身无可变状态
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    simulator: FeatureSimulator,
    stages: StageCatalog,
}

impl ScoringEngine {
    /// 创建新的评分引擎
    pub fn new() -> Self {
        Self {
            simulator: FeatureSimulator::new(),
            stages: StageCatalog::new(),
        }
    }

    /// 模拟一次完整的图像分析：采样特征并评分
    pub fn analyze(&self, rng: &mut impl Rng, width: u32, height: u32) -> AnalysisResult {
        let features = self.simulator.sample(rng, width, height);
        self.score(features, rng)
    }

    /// 对给定特征集合产出聚合分析结果
    pub fn score(&self, features: RetinalFeatureSet, rng: &mut impl Rng) -> AnalysisResult {
        // 1. 分期：确定性加权公式
        let stage = self.severity_stage(&features);

        // 2. 风险判定与进展风险
        let risk_assessment = self.assess_risk(&features, stage);
        let progression_risk = self.progression_risk(stage, &features);

        // 3. 处置建议
        let recommendations = self.recommendations(stage, &features);

        // 4. 演示用随机占位指标
        let confidence = rng.gen_range(0.88..0.99);
        let processing_time_secs = rng.gen_range(1.5..3.5);
        let image_quality = assess_image_quality(rng);

        debug!(
            "Scored synthetic feature set: stage {} progression risk {:.3}",
            stage, progression_risk
        );

        AnalysisResult {
            stage_info: self.stages.stage_info_saturating(stage).clone(),
            features,
            severity_stage: stage,
            confidence,
            processing_time_secs,
            image_quality,
            risk_assessment,
            recommendations,
            progression_risk,
        }
    }

    /// 计算DR分期
    ///
    /// 各组计数对其饱和阈值归一并截断到 [0,1]，加权求和后乘4取整，截断到 [0,4]
    pub fn severity_stage(&self, features: &RetinalFeatureSet) -> u8 {
        let ma_score = clamp_unit(features.microaneurysms.count as f64 / MICROANEURYSM_SATURATION)
            * MICROANEURYSM_WEIGHT;
        let he_score = clamp_unit(features.hemorrhages.count as f64 / HEMORRHAGE_SATURATION)
            * HEMORRHAGE_WEIGHT;
        let ex_score =
            clamp_unit(features.exudates.count as f64 / EXUDATE_SATURATION) * EXUDATE_WEIGHT;
        let cws_score = clamp_unit(features.cotton_wool_spots.count as f64 / COTTON_WOOL_SATURATION)
            * COTTON_WOOL_WEIGHT;

        let total_score = (ma_score + he_score + ex_score + cws_score) * 4.0;

        (total_score as u8).min(4)
    }

    /// 风险判定规则集
    ///
    /// 规则彼此独立，命中的全部收集；无命中时给出单条低风险结论
    pub fn assess_risk(&self, features: &RetinalFeatureSet, stage: u8) -> Vec<RiskFinding> {
        let mut risks = Vec::new();

        if features.microaneurysms.count > 25 {
            risks.push(RiskFinding::new(
                "High microaneurysm density",
                RiskLevel::Moderate,
            ));
        }

        if features.hemorrhages.count > 15 {
            risks.push(RiskFinding::new("Multiple hemorrhages", RiskLevel::High));
        }

        if features.exudates.macular_involvement {
            risks.push(RiskFinding::new("Macular edema risk", RiskLevel::High));
        }

        if features.cotton_wool_spots.count > 8 {
            risks.push(RiskFinding::new("Significant ischemia", RiskLevel::High));
        }

        if stage >= 3 {
            risks.push(RiskFinding::new(
                "Advanced disease stage",
                RiskLevel::VeryHigh,
            ));
        }

        if risks.is_empty() {
            risks.push(RiskFinding::new("Low risk profile", RiskLevel::Low));
        }

        risks
    }

    /// 计算进展到下一分期的风险
    pub fn progression_risk(&self, stage: u8, features: &RetinalFeatureSet) -> f64 {
        let base_risk = STAGE_BASE_RISK[(stage as usize).min(STAGE_BASE_RISK.len() - 1)];

        let feature_modifier = features.microaneurysms.count as f64 * 0.002
            + features.hemorrhages.count as f64 * 0.005
            + features.exudates.count as f64 * 0.003
            + features.cotton_wool_spots.count as f64 * 0.01;

        (base_risk + feature_modifier).min(PROGRESSION_RISK_CAP)
    }

    /// 生成处置建议
    ///
    /// 先给出分期固定建议，再按特征追加条件建议，顺序固定
    pub fn recommendations(&self, stage: u8, features: &RetinalFeatureSet) -> Vec<String> {
        let mut recommendations: Vec<String> = stage_recommendations(stage)
            .iter()
            .map(|r| r.to_string())
            .collect();

        if features.exudates.macular_involvement {
            recommendations.push("Macular edema assessment required".to_string());
        }

        if features.hemorrhages.count > 20 {
            recommendations.push("Consider anti-VEGF therapy evaluation".to_string());
        }

        recommendations
    }

    /// 获取分期目录实例
    pub fn stage_catalog(&self) -> &StageCatalog {
        &self.stages
    }
}

/// 各分期的固定建议列表
fn stage_recommendations(stage: u8) -> &'static [&'static str] {
    match stage.min(4) {
        0 => &["Continue annual screening", "Maintain optimal glucose control"],
        1 => &[
            "6-12 month follow-up",
            "Tighten glucose control",
            "Monitor blood pressure",
        ],
        2 => &[
            "3-6 month follow-up",
            "Consider ophthalmology referral",
            "Aggressive risk factor management",
        ],
        3 => &[
            "Immediate ophthalmology consultation",
            "Laser treatment evaluation",
            "Frequent monitoring",
        ],
        _ => &[
            "Urgent treatment initiation",
            "Surgical evaluation",
            "Close follow-up care",
        ],
    }
}
