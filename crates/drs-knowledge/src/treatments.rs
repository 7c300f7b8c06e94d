//! 治疗方案目录
//!
//! 按严重度分档的治疗选项及疗效对比静态数据集

use serde::{Deserialize, Serialize};

/// 一个严重度档位的治疗选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentBand {
    pub band: String,
    pub treatments: Vec<String>,
}

/// 疗效对比数据（图表用，百分比）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentEffectiveness {
    pub treatment: String,
    pub success_rate: f64,
    pub side_effect_rate: f64,
}

/// 治疗方案目录
#[derive(Debug, Clone)]
pub struct TreatmentCatalog {
    bands: Vec<TreatmentBand>,
    effectiveness: Vec<TreatmentEffectiveness>,
}

impl TreatmentCatalog {
    /// 创建治疗方案目录实例
    pub fn new() -> Self {
        let bands = vec![
            TreatmentBand {
                band: "Mild".to_string(),
                treatments: vec![
                    "Blood sugar control".to_string(),
                    "Annual eye exams".to_string(),
                    "Lifestyle modifications".to_string(),
                ],
            },
            TreatmentBand {
                band: "Moderate".to_string(),
                treatments: vec![
                    "Laser photocoagulation".to_string(),
                    "Anti-VEGF injections".to_string(),
                    "Frequent monitoring".to_string(),
                ],
            },
            TreatmentBand {
                band: "Severe".to_string(),
                treatments: vec![
                    "Pan-retinal photocoagulation".to_string(),
                    "Anti-VEGF therapy".to_string(),
                    "Surgical consultation".to_string(),
                ],
            },
            TreatmentBand {
                band: "PDR".to_string(),
                treatments: vec![
                    "Vitrectomy".to_string(),
                    "Retinal laser".to_string(),
                    "Intravitreal injections".to_string(),
                    "Regular follow-ups".to_string(),
                ],
            },
        ];

        let effectiveness = vec![
            TreatmentEffectiveness {
                treatment: "Laser Therapy".to_string(),
                success_rate: 65.0,
                side_effect_rate: 15.0,
            },
            TreatmentEffectiveness {
                treatment: "Anti-VEGF".to_string(),
                success_rate: 78.0,
                side_effect_rate: 12.0,
            },
            TreatmentEffectiveness {
                treatment: "Vitrectomy".to_string(),
                success_rate: 72.0,
                side_effect_rate: 25.0,
            },
            TreatmentEffectiveness {
                treatment: "Combination".to_string(),
                success_rate: 85.0,
                side_effect_rate: 18.0,
            },
        ];

        Self {
            bands,
            effectiveness,
        }
    }

    /// 按档位名称查询治疗选项
    pub fn band(&self, name: &str) -> Option<&TreatmentBand> {
        self.bands.iter().find(|b| b.band == name)
    }

    /// 获取全部档位
    pub fn all_bands(&self) -> &[TreatmentBand] {
        &self.bands
    }

    /// 获取疗效对比数据集
    pub fn effectiveness(&self) -> &[TreatmentEffectiveness] {
        &self.effectiveness
    }
}

impl Default for TreatmentCatalog {
    fn default() -> Self {
        Self::new()
    }
}
