use product_api::{infrastructure::logger::Logger, server, AppConfig};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时直接使用进程环境变量
    dotenvy::dotenv().ok();

    Logger::init("info");
    info!("启动产品服务...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("配置错误: {}", e);
        e
    })?;

    server::run(config).await.map_err(|e| {
        error!("服务启动失败: {:#}", e);
        e
    })
}
