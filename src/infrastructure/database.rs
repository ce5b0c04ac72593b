//! 数据库基础设施

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    error::Error,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use tracing::info;

use super::{
    config::DatabaseConfig,
    store::{DocumentStore, StoreError},
};

/// MongoDB 客户端管理
///
/// 整个进程只持有一个 `Client`，各集合句柄共享它的连接。
#[derive(Clone)]
pub struct DatabaseManager {
    client: Client,
}

impl DatabaseManager {
    /// 连接数据库并用 `ping` 确认连接可用
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        info!("正在连接 MongoDB: {}", config.redacted_uri());

        let mut options = ClientOptions::parse(config.connection_uri()).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        let client = Client::with_options(options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("✅ 已连接到 MongoDB");
        Ok(Self { client })
    }

    pub fn store(&self, database: &str, collection: &str) -> MongoStore {
        MongoStore::new(self.client.database(database).collection(collection))
    }
}

/// 基于 MongoDB 集合的文档存储
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, doc: Document) -> Result<Bson, StoreError> {
        let result = self.collection.insert_one(doc).await?;
        Ok(result.inserted_id)
    }
}
