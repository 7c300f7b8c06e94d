//! Web服务器

use axum::{
    routing::{get, post},
    Router,
};
use drs_core::{DrsError, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::handlers::{
    analyze_image, api_root, create_chat_session, dashboard_summary, delete_chat_session,
    get_chat_suggestions, get_chat_transcript, get_correlation_matrix, get_patients,
    get_progression_timeline, get_stage, get_stage_distribution, get_treatment_effectiveness,
    health, list_guidelines, list_prevention, list_stages, list_symptoms, list_treatments,
    predict_outcome, predict_progression, send_chat_message, AppState,
};

pub struct WebServer {
    addr: SocketAddr,
    app: Router,
}

impl WebServer {
    pub fn new(addr: SocketAddr, state: Arc<AppState>) -> Self {
        let app = Self::create_app(state);

        Self { addr, app }
    }

    fn create_app(state: Arc<AppState>) -> Router {
        Router::new()
            // 根路径
            .route("/", get(api_root))
            // 健康检查
            .route("/health", get(health))
            // API路由
            .nest("/api/v1", api_routes())
            // 全局中间件
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(
                        CorsLayer::new()
                            .allow_origin(Any)
                            .allow_methods(Any)
                            .allow_headers(Any),
                    ),
            )
            .with_state(state)
    }

    pub async fn run(self) -> Result<()> {
        info!("Starting web server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.app)
            .await
            .map_err(|e| DrsError::Internal(format!("Failed to run web server: {}", e)))?;

        Ok(())
    }
}

/// API v1 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api_root))
        // 图像分析
        .route("/analysis", post(analyze_image))
        // 患者队列
        .route("/patients", get(get_patients))
        .route("/dashboard/summary", get(dashboard_summary))
        // 分析图表数据
        .route("/analytics/stage-distribution", get(get_stage_distribution))
        .route("/analytics/correlation", get(get_correlation_matrix))
        // 预测分析
        .route("/predict/progression", post(predict_progression))
        .route("/predict/outcome", post(predict_outcome))
        // 咨询会话
        .route("/chat/sessions", post(create_chat_session))
        .route(
            "/chat/sessions/:session_id",
            get(get_chat_transcript).delete(delete_chat_session),
        )
        .route("/chat/sessions/:session_id/messages", post(send_chat_message))
        .route("/chat/suggestions", get(get_chat_suggestions))
        // 知识库
        .route("/knowledge/stages", get(list_stages))
        .route("/knowledge/stages/:stage", get(get_stage))
        .route("/knowledge/treatments", get(list_treatments))
        .route(
            "/knowledge/treatment-effectiveness",
            get(get_treatment_effectiveness),
        )
        .route(
            "/knowledge/progression-timeline",
            get(get_progression_timeline),
        )
        .route("/knowledge/symptoms", get(list_symptoms))
        .route("/knowledge/prevention", get(list_prevention))
        .route("/knowledge/guidelines", get(list_guidelines))
}
