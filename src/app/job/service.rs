//! 职位业务服务

use std::sync::Arc;
use tracing::error;

use crate::{
    core::{document::StoredDocument, error::CoreError},
    infrastructure::store::DocumentStore,
};

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn DocumentStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_jobs(&self) -> Result<Vec<StoredDocument>, CoreError> {
        let docs = self.store.find_all().await.map_err(|e| {
            error!("获取职位列表失败: {}", e);
            CoreError::InternalServerError("Failed to fetch jobs".to_string())
        })?;

        Ok(docs.into_iter().map(StoredDocument::from).collect())
    }
}
