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
use url::Url;

/// 公告中相对链接补全时使用的站点源
pub const DEFAULT_SITE_ORIGIN: &str = "http://www.gzcourt.gov.cn";

/// 送达公告列表页所在目录
pub const DEFAULT_LISTING_BASE: &str = "https://www.gzcourt.gov.cn/other/ck601/";

/// 默认 User-Agent 候选池
pub const DEFAULT_USER_AGENTS: [&str; 2] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
];

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// 应用程序配置设置
///
/// 包含服务器、目标站点、HTTP、搜索并发、渲染和存储等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 目标站点配置
    pub site: SiteSettings,
    /// HTTP请求配置
    pub http: HttpSettings,
    /// 搜索并发配置
    #[serde(default)]
    pub search: SearchSettings,
    /// PDF渲染配置
    #[serde(default)]
    pub renderer: RendererSettings,
    /// 存储配置
    pub storage: StorageSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 目标站点配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// 相对链接补全使用的站点源，例如 `http://www.gzcourt.gov.cn`
    pub origin: String,
    /// 列表页目录，第1页为 `{listing_base}index.html`
    pub listing_base: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            origin: DEFAULT_SITE_ORIGIN.to_string(),
            listing_base: DEFAULT_LISTING_BASE.to_string(),
        }
    }
}

/// HTTP请求配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 单次请求超时（秒），未设置时使用客户端默认行为
    pub timeout_secs: Option<u64>,
    /// User-Agent 候选池，每个搜索会话从中选取一个
    pub user_agents: Vec<String>,
    /// 固定的 Accept-Language 请求头
    pub accept_language: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// 搜索并发配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSettings {
    /// 同时进行的页面请求上限，未设置时按CPU数推导
    pub max_workers: Option<usize>,
}

impl SearchSettings {
    /// 实际使用的工作池大小
    ///
    /// 未配置时取 `min(32, CPU数 + 4)`
    pub fn effective_workers(&self) -> usize {
        match self.max_workers {
            Some(n) if n > 0 => n,
            _ => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1);
                (cpus + 4).min(32)
            }
        }
    }
}

/// PDF渲染配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RendererSettings {
    /// 是否启用浏览器渲染
    pub enabled: bool,
    /// 远程 Chrome 调试地址，未设置时本地启动浏览器
    pub remote_debugging_url: Option<String>,
    /// 浏览器请求超时（秒）
    pub request_timeout_secs: u64,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            remote_debugging_url: None,
            request_timeout_secs: 30,
        }
    }
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 生成文件的根目录，每次运行在其下创建独立子目录
    pub output_dir: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和 `NOTICES__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("site.origin", DEFAULT_SITE_ORIGIN)?
            .set_default("site.listing_base", DEFAULT_LISTING_BASE)?
            .set_default("http.user_agents", DEFAULT_USER_AGENTS.to_vec())?
            .set_default("http.accept_language", DEFAULT_ACCEPT_LANGUAGE)?
            .set_default("renderer.enabled", true)?
            .set_default("renderer.request_timeout_secs", 30)?
            .set_default("storage.output_dir", "./storage")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("NOTICES")
                    .separator("__")
                    .list_separator("|")
                    .with_list_parse_key("http.user_agents")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验配置的一致性
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.site.origin)
            .map_err(|e| ConfigError::Message(format!("invalid site.origin: {}", e)))?;
        Url::parse(&self.site.listing_base)
            .map_err(|e| ConfigError::Message(format!("invalid site.listing_base: {}", e)))?;
        if !self.site.listing_base.ends_with('/') {
            return Err(ConfigError::Message(
                "site.listing_base must end with '/'".to_string(),
            ));
        }
        if self.http.user_agents.is_empty() {
            return Err(ConfigError::Message(
                "http.user_agents must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
