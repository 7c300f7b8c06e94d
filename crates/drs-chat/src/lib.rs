//! # DRS Chat
//!
//! DR咨询助手：关键词到预置回答的查表应答、会话全文与会话管理。
//! 应答内容是固定的科普话术，不接入任何语言模型或外部服务。

pub mod responder;
pub mod session;

pub use responder::{ChatResponder, ResponseCategory};
pub use session::{ChatSession, SessionManager};
