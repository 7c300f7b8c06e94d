//! HTTP处理器

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use drs_analysis::ScoringEngine;
use drs_chat::{ChatResponder, SessionManager};
use drs_cohort::{
    correlation_matrix, predict_progression_risk, predict_treatment_outcome, stage_distribution,
    summarize, CohortFilter, CohortGenerator, RiskBand, TreatmentKind,
};
use drs_core::DrsError;
use drs_knowledge::{progression_timeline, GuidelineCatalog, StageCatalog, TreatmentCatalog};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// 默认队列规模与上限
const DEFAULT_COHORT_SIZE: usize = 100;
const MAX_COHORT_SIZE: usize = 1000;

/// 默认图像尺寸（演示值）
const DEFAULT_IMAGE_DIM: u32 = 512;

/// 应用状态
///
/// 所有服务对象显式构造后挂在状态上，经axum State注入处理器，无全局单例；
/// 会话管理器是唯一的可变部分，由读写锁保护
pub struct AppState {
    pub engine: ScoringEngine,
    pub generator: CohortGenerator,
    pub stages: StageCatalog,
    pub treatments: TreatmentCatalog,
    pub guidelines: GuidelineCatalog,
    pub sessions: RwLock<SessionManager>,
}

impl AppState {
    /// 构造完整应用状态
    pub fn new() -> Self {
        Self {
            engine: ScoringEngine::new(),
            generator: CohortGenerator::new(),
            stages: StageCatalog::new(),
            treatments: TreatmentCatalog::new(),
            guidelines: GuidelineCatalog::new(),
            sessions: RwLock::new(SessionManager::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// API根路径处理器
pub async fn api_root() -> impl IntoResponse {
    Json(json!({
        "service": "DRS Web API",
        "version": "1.0.0",
        "status": "running",
        "disclaimer": "All analysis output is randomly simulated demo data, not a diagnostic result",
        "endpoints": {
            "health": "/health",
            "api": "/api/v1"
        }
    }))
}

/// 健康检查处理器
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": "1.0.0"
    }))
}

// ---------------------------------------------------------------------------
// 图像分析
// ---------------------------------------------------------------------------

/// 分析请求参数
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default = "default_image_dim")]
    pub image_width: u32,
    #[serde(default = "default_image_dim")]
    pub image_height: u32,
}

fn default_image_dim() -> u32 {
    DEFAULT_IMAGE_DIM
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            image_width: DEFAULT_IMAGE_DIM,
            image_height: DEFAULT_IMAGE_DIM,
        }
    }
}

/// 图像分析处理器：采样一组合成特征并评分
pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    body: Option<Json<AnalysisRequest>>,
) -> ApiResult<impl IntoResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    info!(
        "Running simulated analysis for {}x{} image",
        request.image_width, request.image_height
    );

    let mut rng = rand::thread_rng();
    let result = state
        .engine
        .analyze(&mut rng, request.image_width, request.image_height);

    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// 患者队列
// ---------------------------------------------------------------------------

/// 患者查询参数
#[derive(Debug, Deserialize)]
pub struct PatientQueryParams {
    pub count: Option<usize>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub stages: Option<String>, // 逗号分隔的分期列表
    pub hba1c_min: Option<f64>,
    pub hba1c_max: Option<f64>,
    pub risk_level: Option<RiskBand>,
}

/// 患者查询处理器：重新生成队列并应用过滤条件
pub async fn get_patients(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PatientQueryParams>,
) -> ApiResult<impl IntoResponse> {
    info!("Generating patient cohort with query: {:?}", params);

    let count = cohort_size(params.count);
    let mut rng = rand::thread_rng();
    let cohort = state.generator.generate(count, &mut rng);

    let filter = CohortFilter {
        age_min: params.age_min,
        age_max: params.age_max,
        stages: parse_stage_list(params.stages.as_deref())?,
        hba1c_min: params.hba1c_min,
        hba1c_max: params.hba1c_max,
        risk_band: params.risk_level,
    };
    let patients = filter.apply(&cohort);

    Ok(Json(json!({
        "patients": patients,
        "total": patients.len(),
        "generated": count
    })))
}

/// 队列规模查询参数
#[derive(Debug, Deserialize)]
pub struct CohortSizeParams {
    pub count: Option<usize>,
}

/// 仪表盘概览处理器
pub async fn dashboard_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CohortSizeParams>,
) -> ApiResult<impl IntoResponse> {
    let count = cohort_size(params.count);
    let mut rng = rand::thread_rng();
    let cohort = state.generator.generate(count, &mut rng);

    Ok(Json(summarize(&cohort)))
}

/// 分期分布处理器
pub async fn get_stage_distribution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CohortSizeParams>,
) -> ApiResult<impl IntoResponse> {
    let count = cohort_size(params.count);
    let mut rng = rand::thread_rng();
    let cohort = state.generator.generate(count, &mut rng);
    let counts = stage_distribution(&cohort);

    Ok(Json(json!({
        "stages": [0, 1, 2, 3, 4],
        "counts": counts
    })))
}

/// 风险因子相关性处理器
pub async fn get_correlation_matrix(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CohortSizeParams>,
) -> ApiResult<impl IntoResponse> {
    let count = cohort_size(params.count);
    let mut rng = rand::thread_rng();
    let cohort = state.generator.generate(count, &mut rng);

    Ok(Json(correlation_matrix(&cohort)))
}

// ---------------------------------------------------------------------------
// 预测分析
// ---------------------------------------------------------------------------

/// 进展风险预测请求
#[derive(Debug, Deserialize)]
pub struct ProgressionPredictionRequest {
    pub age: u32,
    pub duration_years: u32,
    pub hba1c: f64,
    pub current_stage: u8,
}

/// 进展风险预测处理器
pub async fn predict_progression(
    Json(request): Json<ProgressionPredictionRequest>,
) -> ApiResult<impl IntoResponse> {
    // 分期越界时截断而不是报错
    let stage = request.current_stage.min(4);
    let risk_percent = predict_progression_risk(
        request.age,
        request.duration_years,
        request.hba1c,
        stage,
    );

    Ok(Json(json!({
        "progression_risk_percent": risk_percent
    })))
}

/// 治疗结局预测请求
#[derive(Debug, Deserialize)]
pub struct OutcomePredictionRequest {
    pub treatment: TreatmentKind,
    pub risk_score: f64,
}

/// 治疗结局预测处理器
pub async fn predict_outcome(
    Json(request): Json<OutcomePredictionRequest>,
) -> ApiResult<impl IntoResponse> {
    let risk_score = request.risk_score.clamp(0.0, 100.0);
    let success_percent = predict_treatment_outcome(request.treatment, risk_score);

    Ok(Json(json!({
        "treatment": request.treatment,
        "success_rate_percent": success_percent
    })))
}

// ---------------------------------------------------------------------------
// 咨询会话
// ---------------------------------------------------------------------------

/// 创建会话处理器
pub async fn create_chat_session(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let mut sessions = state.sessions.write().await;
    let mut rng = rand::thread_rng();
    let session = sessions.create_session(&mut rng);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "session_id": session.id(),
            "transcript": session.transcript()
        })),
    ))
}

/// 读取会话全文处理器
pub async fn get_chat_transcript(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let sessions = state.sessions.read().await;
    let transcript = sessions.transcript(session_id)?.to_vec();

    Ok(Json(json!({
        "session_id": session_id,
        "transcript": transcript
    })))
}

/// 聊天消息请求
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
}

/// 发送消息处理器
pub async fn send_chat_message(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ChatMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut sessions = state.sessions.write().await;
    let mut rng = rand::thread_rng();
    let reply = sessions.send_message(session_id, &request.message, &mut rng)?;

    Ok(Json(reply))
}

/// 关闭会话处理器
pub async fn delete_chat_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let mut sessions = state.sessions.write().await;
    sessions.remove(session_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// 推荐提问处理器
pub async fn get_chat_suggestions() -> impl IntoResponse {
    Json(json!({
        "questions": ChatResponder::suggested_questions()
    }))
}

// ---------------------------------------------------------------------------
// 知识库
// ---------------------------------------------------------------------------

/// 分期列表处理器
pub async fn list_stages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.stages.all().to_vec())
}

/// 单个分期处理器
pub async fn get_stage(
    State(state): State<Arc<AppState>>,
    Path(stage): Path<u8>,
) -> ApiResult<impl IntoResponse> {
    let info = state
        .stages
        .stage_info(stage)
        .ok_or_else(|| DrsError::NotFound(format!("DR stage {} not found", stage)))?;

    Ok(Json(info.clone()))
}

/// 治疗方案处理器
pub async fn list_treatments(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.treatments.all_bands().to_vec())
}

/// 疗效对比处理器
pub async fn get_treatment_effectiveness(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.treatments.effectiveness().to_vec())
}

/// 进展时间线处理器
pub async fn get_progression_timeline() -> impl IntoResponse {
    Json(progression_timeline())
}

/// 症状列表处理器
pub async fn list_symptoms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.guidelines.symptoms().to_vec())
}

/// 预防策略处理器
pub async fn list_prevention(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.guidelines.prevention().to_vec())
}

/// 筛查指南处理器
pub async fn list_guidelines(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.guidelines.guidelines().to_vec())
}

// ---------------------------------------------------------------------------
// 辅助函数与错误映射
// ---------------------------------------------------------------------------

/// 规整队列规模：缺省100，上限1000
fn cohort_size(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_COHORT_SIZE).min(MAX_COHORT_SIZE)
}

/// 解析逗号分隔的分期列表
fn parse_stage_list(raw: Option<&str>) -> drs_core::Result<Option<Vec<u8>>> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };

    let mut stages = Vec::new();
    for part in raw.split(',') {
        let stage: u8 = part
            .trim()
            .parse()
            .map_err(|_| DrsError::Validation(format!("Invalid DR stage: {}", part.trim())))?;
        if stage > 4 {
            return Err(DrsError::Validation(format!(
                "DR stage out of range: {}",
                stage
            )));
        }
        stages.push(stage);
    }

    Ok(Some(stages))
}

/// HTTP层错误包装
///
/// DrsError定义在核心 crate，孤儿规则不允许在这里直接为它实现 IntoResponse
#[derive(Debug)]
pub struct ApiError(DrsError);

impl From<DrsError> for ApiError {
    fn from(err: DrsError) -> Self {
        Self(err)
    }
}

/// HTTP处理器统一结果类型
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// 错误处理
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self.0 {
            DrsError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            DrsError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            DrsError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            DrsError::Serialization(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            DrsError::Network(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            DrsError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": true,
            "message": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stage_list() {
        assert_eq!(parse_stage_list(None).unwrap(), None);
        assert_eq!(parse_stage_list(Some("")).unwrap(), None);
        assert_eq!(
            parse_stage_list(Some("0,2, 4")).unwrap(),
            Some(vec![0, 2, 4])
        );
        assert!(parse_stage_list(Some("abc")).is_err());
        assert!(parse_stage_list(Some("7")).is_err());
    }

    #[test]
    fn test_cohort_size_defaults_and_cap() {
        assert_eq!(cohort_size(None), 100);
        assert_eq!(cohort_size(Some(50)), 50);
        assert_eq!(cohort_size(Some(5000)), 1000);
    }
}
