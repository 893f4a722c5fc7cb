// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 兼容旧部署方式的环境变量：公开访问地址
pub const SERVER_URL_ENV: &str = "SERVER_URL";
/// 兼容旧部署方式的环境变量：Firecrawl API 密钥
pub const FIRECRAWL_API_KEY_ENV: &str = "FIRECRAWL_API_KEY";

/// 应用程序配置设置
///
/// 包含服务器、存储、Firecrawl、Webhook、爬取参数、指标和日志等配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// Firecrawl 配置
    pub firecrawl: FirecrawlSettings,
    /// Webhook 配置，没有任何取值时整个表可以缺省
    #[serde(default)]
    pub webhook: WebhookSettings,
    /// 爬取参数
    pub crawl: CrawlSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// JSON 存储文件路径
    pub path: String,
}

/// Firecrawl 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FirecrawlSettings {
    /// API 基础地址
    pub api_url: String,
    /// API 密钥，发起爬取和轮询时必需
    pub api_key: Option<String>,
    /// 出站请求超时时间（秒）
    pub timeout_secs: u64,
}

/// Webhook配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookSettings {
    /// 外部可访问的服务地址，用于拼接回调 URL
    pub public_base_url: Option<String>,
}

/// 爬取参数设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 单次爬取的最大页面数
    pub limit: u32,
    /// 是否允许跟随外部链接
    pub allow_external_links: bool,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 输出格式 (pretty, json)
    pub format: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CRAWLRELAY").separator("__"))
            // Plain variables used by existing deployments take precedence
            .set_override_option(
                "webhook.public_base_url",
                std::env::var(SERVER_URL_ENV).ok(),
            )?
            .set_override_option(
                "firecrawl.api_key",
                std::env::var(FIRECRAWL_API_KEY_ENV).ok(),
            )?
            .build()?
            .try_deserialize()
    }

    /// 仅包含默认值的配置构建器
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("storage.path", "server.json")?
            .set_default("firecrawl.api_url", "https://api.firecrawl.dev/v1")?
            .set_default("firecrawl.timeout_secs", 60)?
            .set_default("crawl.limit", 49)?
            .set_default("crawl.allow_external_links", false)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("log.format", "pretty")
    }

    /// 使用默认值构建配置，不读取文件和环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }
}
