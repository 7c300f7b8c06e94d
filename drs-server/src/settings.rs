//! 服务配置
//!
//! 可选TOML配置文件加上 DRS_ 前缀环境变量覆盖

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// 服务器设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// 监听主机
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 日志级别
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}

impl ServerSettings {
    /// 加载配置：可选文件 + 环境变量，两者都缺省时退回默认值
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix("DRS"))
            .build()
            .context("Failed to build configuration")?;

        let settings: ServerSettings = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::default();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let settings = ServerSettings::load(None).unwrap();
        assert_eq!(settings.port, ServerSettings::default().port);
    }
}
