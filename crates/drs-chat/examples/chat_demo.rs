//! 咨询助手演示程序
//!
//! 展示会话创建、关键词应答与对话全文

use drs_chat::{ChatResponder, SessionManager};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let mut manager = SessionManager::new();
    let mut rng = rand::thread_rng();

    println!("💬 DR 咨询助手演示\n");

    // 1. 创建会话（自动写入开场问候）
    let session_id = manager.create_session(&mut rng).id();
    println!("✅ 会话已创建: {}", session_id);

    // 2. 发送几条典型提问
    let questions = [
        "Hello, how are you?",
        "What are the early symptoms of diabetic retinopathy?",
        "How can I prevent it?",
        "asdasd",
    ];

    for question in questions {
        let reply = manager.send_message(session_id, question, &mut rng)?;
        println!("\n🙋 You: {}", question);
        println!("🤖 Assistant: {}", reply.message);
    }

    // 3. 推荐提问
    println!("\n💡 推荐提问:");
    for question in ChatResponder::suggested_questions() {
        println!("   - {}", question);
    }

    // 4. 对话全文
    let transcript = manager.transcript(session_id)?;
    println!("\n📜 对话全文共 {} 条消息", transcript.len());

    println!("\n🎉 咨询演示完成!");
    Ok(())
}
