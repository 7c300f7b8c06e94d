//! # DRS Web
//!
//! 筛查演示平台的HTTP API层：把评分引擎、患者队列、咨询会话与知识库
//! 以JSON接口暴露给前端界面。渲染、上传与样式均由前端负责，本层只返回结构化数据。

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::WebServer;
