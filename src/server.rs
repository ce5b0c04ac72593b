//! 服务启动
//!
//! 先连接数据库，成功后才绑定端口开始服务；任何一步失败都返回错误。

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    app::{router, AppState},
    infrastructure::{config::AppConfig, database::DatabaseManager},
};

/// 连接数据库并构造应用状态
pub async fn connect_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let database = &config.database;
    let manager = DatabaseManager::connect(database)
        .await
        .context("无法连接到 MongoDB")?;

    let products = manager.store(&database.product_db, &database.product_collection);
    let jobs = manager.store(&database.job_db, &database.job_collection);

    Ok(AppState::new(Arc::new(products), Arc::new(jobs)))
}

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = connect_state(&config).await?;
    let addr = config.listen_addr()?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 服务运行在 http://{}", listener.local_addr()?);
    info!("   GET    /              - 问候");
    info!("   GET    /jobs          - 获取所有职位");
    info!("   GET    /products      - 获取所有产品");
    info!("   POST   /products      - 创建新产品");
    info!("   GET    /products/:id  - 获取特定产品");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpStream;

    fn config_with_uri(uri: &str, port: u16) -> AppConfig {
        let mut config = AppConfig::default();
        config.bind_address = "127.0.0.1".to_string();
        config.port = port;
        config.database.uri_override = Some(uri.to_string());
        config
    }

    fn free_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn test_unparsable_uri_fails_startup() {
        let err = connect_state(&config_with_uri("not-a-uri", 0))
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "无法连接到 MongoDB");
    }

    #[tokio::test]
    async fn test_unreachable_server_never_binds() {
        let port = free_port();
        let config = config_with_uri("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200", port);

        assert!(run(config).await.is_err());
        assert!(TcpStream::connect(("127.0.0.1", port)).is_err());
    }
}
