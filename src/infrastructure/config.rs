//! 配置基础设施
//!
//! 所有配置都来自环境变量（启动时会先加载 `.env`）。

use std::net::SocketAddr;
use thiserror::Error;

/// 配置错误
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("缺少环境变量: {0}")]
    Missing(&'static str),
    #[error("无效的端口: {0}")]
    InvalidPort(String),
    #[error("无效的监听地址: {0}")]
    InvalidAddress(String),
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP 服务端口
    pub port: u16,
    /// 绑定地址
    pub bind_address: String,
    pub database: DatabaseConfig,
}

/// 数据库配置
#[derive(Clone)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    /// SRV 集群地址
    pub host: String,
    pub app_name: String,
    /// 完整连接串，设置后忽略 user/password/host
    pub uri_override: Option<String>,
    pub product_db: String,
    pub product_collection: String,
    pub job_db: String,
    pub job_collection: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            password: String::new(),
            host: "cluster0.dkwhsex.mongodb.net".to_string(),
            app_name: "Cluster0".to_string(),
            uri_override: None,
            product_db: "productDB".to_string(),
            product_collection: "products".to_string(),
            job_db: "jobDB".to_string(),
            job_collection: "jobs".to_string(),
        }
    }
}

impl AppConfig {
    /// 从进程环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过查找函数加载配置，空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(address) = get("BIND_ADDRESS") {
            config.bind_address = address;
        }

        let database = &mut config.database;
        if let Some(host) = get("DB_HOST") {
            database.host = host;
        }
        database.uri_override = get("MONGODB_URI");
        if database.uri_override.is_none() {
            database.user = get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
            database.password = get("DB_PASS").ok_or(ConfigError::Missing("DB_PASS"))?;
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = format!("{}:{}", self.bind_address, self.port);
        address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(address.clone()))
    }
}

impl DatabaseConfig {
    /// 构造 MongoDB 连接串
    pub fn connection_uri(&self) -> String {
        match &self.uri_override {
            Some(uri) => uri.clone(),
            None => format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName={}",
                self.user, self.password, self.host, self.app_name
            ),
        }
    }

    /// 用于日志输出的连接串，密码被隐藏
    pub fn redacted_uri(&self) -> String {
        redact_uri(&self.connection_uri())
    }
}

/// 隐藏连接串中的密码
///
/// 用户信息取 `://` 之后、查询串之前最后一个 `@` 之前的部分。
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let (scheme, rest) = uri.split_at(scheme_end + 3);
    let before_query = rest.split('?').next().unwrap_or(rest);
    let Some(at) = before_query.rfind('@') else {
        return uri.to_string();
    };

    let userinfo = &rest[..at];
    let host = &rest[at + 1..];
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{}{}:***@{}", scheme, user, host),
        None => format!("{}***@{}", scheme, host),
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &self.redacted_uri())
            .field("product_db", &self.product_db)
            .field("product_collection", &self.product_collection)
            .field("job_db", &self.job_db)
            .field("job_collection", &self.job_collection)
            .finish()
    }
}
