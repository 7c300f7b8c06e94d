//! 会话管理
//!
//! 每个会话持有一份只追加的对话全文和一个应答器实例；
//! 会话只存在于进程内存中，不做任何持久化

use drs_core::{ChatTurn, DrsError, Result};
use rand::Rng;
use std::collections::HashMap;
use uuid::Uuid;

use crate::responder::ChatResponder;

/// 单个咨询会话
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    transcript: Vec<ChatTurn>,
    responder: ChatResponder,
}

impl ChatSession {
    /// 创建新会话，开场自动写入一条问候
    pub fn new(rng: &mut impl Rng) -> Self {
        let responder = ChatResponder::new();
        let greeting = responder.greeting(rng);

        Self {
            id: Uuid::new_v4(),
            transcript: vec![ChatTurn::assistant(&greeting)],
            responder,
        }
    }

    /// 会话标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 对话全文（按追加顺序）
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// 发送一条用户消息并取得回复
    ///
    /// 先追加用户消息，再追加助手回复，返回回复内容
    pub fn send(&mut self, input: &str, rng: &mut impl Rng) -> ChatTurn {
        self.transcript.push(ChatTurn::user(input));

        let reply = self.responder.respond(input, rng);
        let turn = ChatTurn::assistant(&reply);
        self.transcript.push(turn.clone());

        turn
    }
}

/// 会话管理器
///
/// 进程内会话注册表，会话之间互不共享状态
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<Uuid, ChatSession>,
}

impl SessionManager {
    /// 创建新的会话管理器
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// 新建会话并登记
    pub fn create_session(&mut self, rng: &mut impl Rng) -> &ChatSession {
        let session = ChatSession::new(rng);
        let id = session.id();

        tracing::info!("Created chat session {}", id);
        self.sessions.entry(id).or_insert(session)
    }

    /// 查询会话
    pub fn get(&self, id: Uuid) -> Option<&ChatSession> {
        self.sessions.get(&id)
    }

    /// 读取会话全文
    pub fn transcript(&self, id: Uuid) -> Result<&[ChatTurn]> {
        self.sessions
            .get(&id)
            .map(|s| s.transcript())
            .ok_or_else(|| DrsError::NotFound(format!("Chat session {} not found", id)))
    }

    /// 向会话发送消息
    pub fn send_message(&mut self, id: Uuid, input: &str, rng: &mut impl Rng) -> Result<ChatTurn> {
        match self.sessions.get_mut(&id) {
            Some(session) => Ok(session.send(input, rng)),
            None => Err(DrsError::NotFound(format!(
                "Chat session {} not found",
                id
            ))),
        }
    }

    /// 关闭并移除会话
    pub fn remove(&mut self, id: Uuid) -> Result<()> {
        if self.sessions.remove(&id).is_some() {
            tracing::info!("Removed chat session {}", id);
            Ok(())
        } else {
            Err(DrsError::NotFound(format!("Chat session {} not found", id)))
        }
    }

    /// 当前活跃会话数
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::ResponseCategory;
    use drs_core::ChatRole;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_session_is_seeded_with_greeting() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = ChatSession::new(&mut rng);

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, ChatRole::Assistant);

        let responder = ChatResponder::new();
        let greetings = responder.canned_responses(ResponseCategory::Greeting);
        assert!(greetings.contains(&transcript[0].message.as_str()));
    }

    #[test]
    fn test_send_appends_user_then_assistant() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = ChatSession::new(&mut rng);

        let reply = session.send("What are the symptoms?", &mut rng);
        assert_eq!(reply.role, ChatRole::Assistant);

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, ChatRole::User);
        assert_eq!(transcript[1].message, "What are the symptoms?");
        assert_eq!(transcript[2].role, ChatRole::Assistant);
        assert_eq!(transcript[2].message, reply.message);
    }

    #[test]
    fn test_empty_message_still_answers_with_default() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = ChatSession::new(&mut rng);

        let reply = session.send("   ", &mut rng);

        let responder = ChatResponder::new();
        let defaults = responder.canned_responses(ResponseCategory::Default);
        assert!(defaults.contains(&reply.message.as_str()));
    }

    #[test]
    fn test_manager_create_and_lookup() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut manager = SessionManager::new();

        let id = manager.create_session(&mut rng).id();
        assert_eq!(manager.session_count(), 1);
        assert!(manager.get(id).is_some());
        assert_eq!(manager.transcript(id).unwrap().len(), 1);
    }

    #[test]
    fn test_manager_send_message() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut manager = SessionManager::new();

        let id = manager.create_session(&mut rng).id();
        let reply = manager.send_message(id, "hello", &mut rng).unwrap();
        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(manager.transcript(id).unwrap().len(), 3);
    }

    #[test]
    fn test_manager_unknown_session_is_not_found() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut manager = SessionManager::new();

        let unknown = Uuid::new_v4();
        assert!(matches!(
            manager.send_message(unknown, "hello", &mut rng),
            Err(DrsError::NotFound(_))
        ));
        assert!(matches!(
            manager.transcript(unknown),
            Err(DrsError::NotFound(_))
        ));
        assert!(matches!(manager.remove(unknown), Err(DrsError::NotFound(_))));
    }

    #[test]
    fn test_manager_remove_session() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut manager = SessionManager::new();

        let id = manager.create_session(&mut rng).id();
        manager.remove(id).unwrap();
        assert_eq!(manager.session_count(), 0);
        assert!(manager.get(id).is_none());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut manager = SessionManager::new();

        let a = manager.create_session(&mut rng).id();
        let b = manager.create_session(&mut rng).id();

        manager.send_message(a, "hello", &mut rng).unwrap();
        assert_eq!(manager.transcript(a).unwrap().len(), 3);
        assert_eq!(manager.transcript(b).unwrap().len(), 1);
    }
}
