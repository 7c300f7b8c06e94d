//! 核心数据模型定义

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 患者档案（合成数据，每次请求重新生成）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String, // 队列内患者编号 (P10000 起)
    pub name: String,
    pub age: u32,                     // 25-80
    pub gender: Gender,               // 性别
    pub diabetes_type: DiabetesType,  // 糖尿病类型
    pub diabetes_duration_years: u32, // 病程 1-30年
    pub hba1c: f64,                   // 糖化血红蛋白 5.5-12.0%
    pub bp_systolic: u32,             // 收缩压 110-180
    pub bp_diastolic: u32,            // 舒张压 70-110
    pub dr_stage: u8,                 // DR分期 0-4，由风险公式导出
    pub risk_score: f64,              // 风险评分 0-100，与dr_stage同源
    pub last_screening: NaiveDate,    // 上次筛查日期
    pub next_appointment: NaiveDate,  // 下次复诊日期
}

/// 性别枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// 糖尿病类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiabetesType {
    Type1,
    Type2,
}

impl std::fmt::Display for DiabetesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiabetesType::Type1 => write!(f, "Type 1"),
            DiabetesType::Type2 => write!(f, "Type 2"),
        }
    }
}

/// 图像内的二维坐标点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// 微动脉瘤特征组
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicroaneurysmGroup {
    pub count: u32,  // 0-60
    pub density: f64, // 0-1
    pub locations: Vec<Point>,
}

/// 出血点特征组
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HemorrhageGroup {
    pub count: u32,         // 0-35
    pub size_variance: f64, // 0.1-2.0
    pub locations: Vec<Point>,
}

/// 渗出物特征组
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExudateGroup {
    pub count: u32,    // 0-45
    pub intensity: f64, // 0-1
    pub macular_involvement: bool, // 是否累及黄斑
    pub locations: Vec<Point>,
}

/// 棉絮斑分布形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotDistribution {
    Focal,
    Scattered,
    Clustered,
}

/// 棉絮斑特征组
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CottonWoolGroup {
    pub count: u32, // 0-15
    pub distribution: SpotDistribution,
    pub locations: Vec<Point>,
}

/// 一次模拟检测产生的全部视网膜特征
///
/// 所有计数与修饰值都落在文档化区间内；坐标点严格位于图像边缘50像素留白以内。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetinalFeatureSet {
    pub microaneurysms: MicroaneurysmGroup,
    pub hemorrhages: HemorrhageGroup,
    pub exudates: ExudateGroup,
    pub cotton_wool_spots: CottonWoolGroup,
}

/// 风险等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

impl RiskLevel {
    /// 展示用标签
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 单条风险判定结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFinding {
    pub finding: String,
    pub level: RiskLevel,
}

impl RiskFinding {
    pub fn new(finding: &str, level: RiskLevel) -> Self {
        Self {
            finding: finding.to_string(),
            level,
        }
    }
}

/// 图像质量评估因子（演示用随机占位值）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityFactors {
    pub focus: f64,          // 0.70-0.98
    pub illumination: f64,   // 0.60-0.95
    pub contrast: f64,       // 0.50-0.90
    pub artifact_level: f64, // 0.10-0.40
}

/// 图像质量等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    Excellent, // 综合得分 > 0.8
    Good,      // 综合得分 > 0.6
    Acceptable,
}

/// 图像质量评估结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageQuality {
    pub score: f64,
    pub factors: QualityFactors,
    pub grade: QualityGrade,
}

/// DR分期静态元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrStageInfo {
    pub stage: u8,
    pub name: String,
    pub description: String,
    pub risk_label: String,
    pub follow_up: String,
    pub color: String, // 前端展示用十六进制色值
}

/// 一次完整分析的聚合结果
///
/// severity_stage 是特征集合的纯函数，创建后不再变更。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub features: RetinalFeatureSet,
    pub severity_stage: u8, // 0-4，与“严重度评分”同一数值
    pub stage_info: DrStageInfo,
    pub confidence: f64,            // 0.88-0.99
    pub processing_time_secs: f64,  // 1.5-3.5，模拟耗时
    pub image_quality: ImageQuality,
    pub risk_assessment: Vec<RiskFinding>,
    pub recommendations: Vec<String>,
    pub progression_risk: f64, // 0-0.95
}

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// 单条对话记录，按追加顺序构成会话全文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(message: &str) -> Self {
        Self {
            role: ChatRole::User,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(message: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}
