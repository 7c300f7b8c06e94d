//! 临床知识库内容
//!
//! 症状、预防策略与筛查指南的静态条目，供知识库页面展示

use serde::{Deserialize, Serialize};

/// 某一病程阶段的典型症状
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomGroup {
    pub band: String,
    pub symptoms: Vec<String>,
}

/// 预防策略条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreventionStrategy {
    pub title: String,
    pub description: String,
}

/// 指南条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelineItem {
    pub title: String,
    pub description: String,
}

/// 指南分类
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelineSection {
    pub category: String,
    pub items: Vec<GuidelineItem>,
}

/// 知识库目录
#[derive(Debug, Clone)]
pub struct GuidelineCatalog {
    symptoms: Vec<SymptomGroup>,
    prevention: Vec<PreventionStrategy>,
    guidelines: Vec<GuidelineSection>,
}

impl GuidelineCatalog {
    /// 创建知识库目录实例
    pub fn new() -> Self {
        let symptoms = vec![
            SymptomGroup {
                band: "Early Stage".to_string(),
                symptoms: vec![
                    "Often asymptomatic".to_string(),
                    "Mild vision fluctuations".to_string(),
                    "Microaneurysms visible on imaging".to_string(),
                ],
            },
            SymptomGroup {
                band: "Moderate Stage".to_string(),
                symptoms: vec![
                    "Blurred vision".to_string(),
                    "Difficulty reading".to_string(),
                    "Retinal hemorrhages".to_string(),
                    "Cotton wool spots".to_string(),
                ],
            },
            SymptomGroup {
                band: "Advanced Stage".to_string(),
                symptoms: vec![
                    "Significant vision loss".to_string(),
                    "Floaters".to_string(),
                    "Dark spots".to_string(),
                    "Impaired color vision".to_string(),
                    "Macular edema".to_string(),
                ],
            },
            SymptomGroup {
                band: "Proliferative Stage".to_string(),
                symptoms: vec![
                    "Severe vision loss".to_string(),
                    "Vitreous hemorrhage".to_string(),
                    "Retinal detachment".to_string(),
                    "Neovascularization".to_string(),
                ],
            },
        ];

        let prevention = vec![
            PreventionStrategy {
                title: "Blood Sugar Control".to_string(),
                description: "Maintain HbA1c below 7% through medication, diet, and exercise"
                    .to_string(),
            },
            PreventionStrategy {
                title: "Regular Screening".to_string(),
                description:
                    "Annual eye exams for all diabetic patients, more frequent if DR detected"
                        .to_string(),
            },
            PreventionStrategy {
                title: "Blood Pressure Management".to_string(),
                description: "Keep BP below 130/80 mmHg with medication and lifestyle changes"
                    .to_string(),
            },
            PreventionStrategy {
                title: "Healthy Lifestyle".to_string(),
                description:
                    "Balanced diet, regular exercise, weight management, smoking cessation"
                        .to_string(),
            },
            PreventionStrategy {
                title: "Cholesterol Control".to_string(),
                description: "Manage lipid levels through diet and medication if needed"
                    .to_string(),
            },
            PreventionStrategy {
                title: "Early Detection".to_string(),
                description:
                    "Use AI screening tools for regular monitoring and early intervention"
                        .to_string(),
            },
        ];

        let guidelines = vec![
            GuidelineSection {
                category: "Screening Frequency".to_string(),
                items: vec![
                    GuidelineItem {
                        title: "Type 1 Diabetes".to_string(),
                        description: "Annual screening starting 5 years after diagnosis"
                            .to_string(),
                    },
                    GuidelineItem {
                        title: "Type 2 Diabetes".to_string(),
                        description: "Annual screening from time of diagnosis".to_string(),
                    },
                    GuidelineItem {
                        title: "Pregnancy".to_string(),
                        description:
                            "First trimester and close monitoring throughout pregnancy"
                                .to_string(),
                    },
                    GuidelineItem {
                        title: "Established DR".to_string(),
                        description: "3-12 months based on severity".to_string(),
                    },
                ],
            },
            GuidelineSection {
                category: "Referral Criteria".to_string(),
                items: vec![
                    GuidelineItem {
                        title: "Urgent Referral".to_string(),
                        description: "PDR, vitreous hemorrhage, retinal detachment".to_string(),
                    },
                    GuidelineItem {
                        title: "Early Referral".to_string(),
                        description: "Severe NPDR, clinically significant macular edema"
                            .to_string(),
                    },
                    GuidelineItem {
                        title: "Routine Referral".to_string(),
                        description: "Moderate NPDR with poor risk factor control".to_string(),
                    },
                ],
            },
            GuidelineSection {
                category: "Monitoring Parameters".to_string(),
                items: vec![
                    GuidelineItem {
                        title: "Metabolic".to_string(),
                        description: "HbA1c every 3-6 months, target <7%".to_string(),
                    },
                    GuidelineItem {
                        title: "Ocular".to_string(),
                        description: "Visual acuity, retinal imaging, OCT when indicated"
                            .to_string(),
                    },
                    GuidelineItem {
                        title: "Systemic".to_string(),
                        description: "Blood pressure, lipid profile, renal function".to_string(),
                    },
                ],
            },
        ];

        Self {
            symptoms,
            prevention,
            guidelines,
        }
    }

    /// 按病程阶段列出症状
    pub fn symptoms(&self) -> &[SymptomGroup] {
        &self.symptoms
    }

    /// 预防策略列表
    pub fn prevention(&self) -> &[PreventionStrategy] {
        &self.prevention
    }

    /// 筛查指南分类列表
    pub fn guidelines(&self) -> &[GuidelineSection] {
        &self.guidelines
    }
}

impl Default for GuidelineCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_groups() {
        let catalog = GuidelineCatalog::new();
        assert_eq!(catalog.symptoms().len(), 4);
        assert_eq!(catalog.symptoms()[0].band, "Early Stage");
        assert!(catalog
            .symptoms()
            .iter()
            .all(|g| !g.symptoms.is_empty()));
    }

    #[test]
    fn test_six_prevention_strategies() {
        let catalog = GuidelineCatalog::new();
        assert_eq!(catalog.prevention().len(), 6);
    }

    #[test]
    fn test_guideline_sections() {
        let catalog = GuidelineCatalog::new();
        let sections = catalog.guidelines();
        assert_eq!(sections.len(), 3);

        let screening = sections
            .iter()
            .find(|s| s.category == "Screening Frequency")
            .unwrap();
        assert_eq!(screening.items.len(), 4);
    }
}
