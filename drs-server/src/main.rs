//! DRS服务器主程序

use clap::Parser;
use drs_web::{AppState, WebServer};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

mod settings;

use settings::ServerSettings;

/// DRS服务器命令行参数
#[derive(Parser, Debug)]
#[command(name = "drs-server")]
#[command(about = "糖尿病视网膜病变 (DR) 筛查演示平台服务器")]
struct Args {
    /// 监听主机
    #[arg(long)]
    host: Option<String>,

    /// 服务器端口
    #[arg(short, long)]
    port: Option<u16>,

    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,

    /// 日志级别
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 加载配置，命令行参数优先于配置文件与环境变量
    let mut settings = ServerSettings::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_level.as_str())
        .init();

    info!("启动DRS筛查演示服务器...");
    info!("DRS服务器配置:");
    info!("  监听地址: {}:{}", settings.host, settings.port);
    info!("  日志级别: {}", settings.log_level);
    info!("注意: 平台输出的全部分析结果均为随机模拟的演示数据");

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("无效的监听地址: {}", e))?;

    // 显式构造应用状态并启动Web服务器
    let state = Arc::new(AppState::new());
    let server = WebServer::new(addr, state);

    // 启动服务器
    if let Err(e) = server.run().await {
        error!("服务器启动失败: {}", e);
        return Err(e.into());
    }

    Ok(())
}
