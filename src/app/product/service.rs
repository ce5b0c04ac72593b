//! 产品业务服务

use mongodb::bson::{oid::ObjectId, Bson};
use std::sync::Arc;
use tracing::{error, info};

use super::model::{NewProduct, Product};
use crate::{core::error::CoreError, infrastructure::store::DocumentStore};

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn DocumentStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        let docs = self.store.find_all().await.map_err(|e| {
            error!("获取产品列表失败: {}", e);
            CoreError::InternalServerError("Failed to fetch products".to_string())
        })?;

        Ok(docs.into_iter().map(Product::from).collect())
    }

    /// 按 id 查询产品，id 不合法时不会访问存储
    pub async fn get_product(&self, id: &str) -> Result<Product, CoreError> {
        let oid = ObjectId::parse_str(id)
            .map_err(|_| CoreError::BadRequest("Invalid product ID".to_string()))?;

        let doc = self.store.find_by_id(oid).await.map_err(|e| {
            error!("获取产品 {} 失败: {}", oid, e);
            CoreError::InternalServerError("Failed to fetch product".to_string())
        })?;

        doc.map(Product::from)
            .ok_or_else(|| CoreError::NotFound("Product not found".to_string()))
    }

    /// 校验并插入新产品，返回文档的 `_id`
    pub async fn create_product(&self, product: NewProduct) -> Result<Bson, CoreError> {
        product.validate()?;

        let id = self.store.insert(product.into_document()).await.map_err(|e| {
            error!("创建产品失败: {}", e);
            CoreError::InternalServerError("Failed to create product".to_string())
        })?;

        info!("已创建产品 {}", id);
        Ok(id)
    }
}
