//! 文档存储抽象
//!
//! 处理器只依赖 [`DocumentStore`]，生产环境由 MongoDB 集合实现，
//! 测试使用 [`MemoryStore`]。

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use thiserror::Error;

/// 存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("数据库操作失败: {0}")]
    Driver(#[from] mongodb::error::Error),
    #[error("重复的 _id: {0}")]
    DuplicateId(Bson),
    #[error("存储不可用: {0}")]
    Unavailable(String),
}

/// 一个文档集合支持的操作
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 返回集合中的全部文档，顺序由存储决定
    async fn find_all(&self) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError>;

    /// 插入文档并返回其标识，文档没有 `_id` 时由存储生成 ObjectId
    async fn insert(&self, doc: Document) -> Result<Bson, StoreError>;
}

/// 内存文档存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<Vec<Document>>,
    queries: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用已有文档初始化，缺少 `_id` 的文档会补上
    pub fn with_documents(docs: impl IntoIterator<Item = Document>) -> Self {
        let docs = docs
            .into_iter()
            .map(|mut doc| {
                if !doc.contains_key("_id") {
                    doc.insert("_id", ObjectId::new());
                }
                doc
            })
            .collect();

        Self {
            docs: Mutex::new(docs),
            ..Self::default()
        }
    }

    /// 之后的每次操作都返回错误
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 已执行的存储操作次数
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.docs.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn begin(&self) -> Result<(), StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is failing".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Document>>, StoreError> {
        self.docs
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        self.begin()?;
        Ok(self.lock()?.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        self.begin()?;
        let docs = self.lock()?;
        Ok(docs
            .iter()
            .find(|doc| doc.get_object_id("_id").ok() == Some(id))
            .cloned())
    }

    async fn insert(&self, mut doc: Document) -> Result<Bson, StoreError> {
        self.begin()?;
        let id = match doc.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                doc.insert("_id", id.clone());
                id
            }
        };

        let mut docs = self.lock()?;
        if docs.iter().any(|existing| existing.get("_id") == Some(&id)) {
            return Err(StoreError::DuplicateId(id));
        }
        docs.push(doc);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_insert_generates_id() {
        let store = MemoryStore::new();
        let id = store.insert(doc! { "name": "Mug" }).await.unwrap();
        let id = id.as_object_id().unwrap();

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.get_object_id("_id").unwrap(), id);
        assert_eq!(found.get_str("name").unwrap(), "Mug");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = MemoryStore::with_documents(vec![doc! { "n": 1 }, doc! { "n": 2 }]);
        store.insert(doc! { "n": 3 }).await.unwrap();

        let all = store.find_all().await.unwrap();
        let ns: Vec<i32> = all.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(ns, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failing_store_counts_queries() {
        let store = MemoryStore::new();
        store.set_failing(true);

        assert!(store.find_all().await.is_err());
        assert!(store.find_by_id(ObjectId::new()).await.is_err());
        assert_eq!(store.queries(), 2);
    }

    #[tokio::test]
    async fn test_insert_keeps_client_id() {
        let store = MemoryStore::new();

        let id = store
            .insert(doc! { "_id": "custom-id-1", "name": "Mug" })
            .await
            .unwrap();
        assert_eq!(id, Bson::String("custom-id-1".to_string()));

        let err = store
            .insert(doc! { "_id": "custom-id-1", "name": "Cup" })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
        assert_eq!(store.len(), 1);
    }
}
