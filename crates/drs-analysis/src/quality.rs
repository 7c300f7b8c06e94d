//! 图像质量评估（模拟）
//!
//! 四个独立随机因子的均值，不读取任何真实像素内容，仅保证评级阈值可测试

use drs_core::{ImageQuality, QualityFactors, QualityGrade};
use rand::Rng;

/// 采样一次图像质量评估
pub fn assess_image_quality(rng: &mut impl Rng) -> ImageQuality {
    let factors = QualityFactors {
        focus: rng.gen_range(0.70..0.98),
        illumination: rng.gen_range(0.60..0.95),
        contrast: rng.gen_range(0.50..0.90),
        artifact_level: rng.gen_range(0.10..0.40),
    };

    // 伪影水平取反后与其余因子平均
    let score = (factors.focus + factors.illumination + factors.contrast
        + (1.0 - factors.artifact_level))
        / 4.0;

    ImageQuality {
        score,
        factors,
        grade: grade_for(score),
    }
}

/// 综合得分到评级的映射
pub fn grade_for(score: f64) -> QualityGrade {
    if score > 0.8 {
        QualityGrade::Excellent
    } else if score > 0.6 {
        QualityGrade::Good
    } else {
        QualityGrade::Acceptable
    }
}
