//! 产品数据模型

use mongodb::bson::Document;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::{
    document::{json_to_bson, StoredDocument},
    error::CoreError,
};

/// 存储中的产品文档
pub type Product = StoredDocument;

/// 创建产品时必须存在且为真值的字段，按检查顺序排列
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "price", "image", "category", "description"];

/// 创建产品请求
///
/// 必填字段只检查真值，不检查类型；其余字段原样保存。
#[derive(Debug, Default, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub image: Value,
    #[serde(default)]
    pub category: Value,
    #[serde(default)]
    pub description: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON 真值判断：null、false、0 和空字符串为假
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl NewProduct {
    fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "name" => Some(&self.name),
            "price" => Some(&self.price),
            "image" => Some(&self.image),
            "category" => Some(&self.category),
            "description" => Some(&self.description),
            _ => self.extra.get(name),
        }
    }

    fn take_field(&mut self, name: &str) -> Value {
        match name {
            "name" => std::mem::take(&mut self.name),
            "price" => std::mem::take(&mut self.price),
            "image" => std::mem::take(&mut self.image),
            "category" => std::mem::take(&mut self.category),
            "description" => std::mem::take(&mut self.description),
            _ => self.extra.remove(name).unwrap_or_default(),
        }
    }

    /// 缺失或为假值的必填字段
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|field| !self.field(field).is_some_and(is_truthy))
            .collect()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::BadRequest(format!(
                "Missing fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// 转为待插入的 BSON 文档
    ///
    /// 客户端提供的非 null `_id` 原样保留，否则由存储生成。
    pub fn into_document(mut self) -> Document {
        let mut doc = Document::new();
        match self.extra.remove("_id") {
            Some(Value::Null) | None => {}
            Some(id) => {
                doc.insert("_id", json_to_bson(id));
            }
        }
        for field in REQUIRED_FIELDS {
            doc.insert(field, json_to_bson(self.take_field(field)));
        }
        for (key, value) in self.extra {
            doc.insert(key, json_to_bson(value));
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> NewProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_complete_product_is_valid() {
        let product = parse(json!({
            "name": "Mug",
            "price": 9.99,
            "image": "mug.png",
            "category": "kitchen",
            "description": "A mug",
        }));
        assert!(product.missing_fields().is_empty());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_missing_description() {
        let product = parse(json!({
            "name": "Mug",
            "price": 9.99,
            "image": "mug.png",
            "category": "kitchen",
        }));
        assert_eq!(
            product.validate(),
            Err(CoreError::BadRequest("Missing fields: description".to_string()))
        );
    }

    #[test]
    fn test_missing_fields_in_check_order() {
        let product = parse(json!({ "description": "x", "image": "", "price": 0 }));
        assert_eq!(
            product.missing_fields(),
            vec!["name", "price", "image", "category"]
        );
    }

    fn mug(extra: Value) -> NewProduct {
        let mut body = json!({
            "name": "Mug",
            "price": 9.99,
            "image": "mug.png",
            "category": "kitchen",
            "description": "A mug",
        });
        if let (Value::Object(body), Value::Object(extra)) = (&mut body, extra) {
            body.extend(extra);
        }
        parse(body)
    }

    #[test]
    fn test_extra_fields_kept() {
        let doc = mug(json!({ "stock": 12 })).into_document();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("name").unwrap(), "Mug");
        assert_eq!(doc.get_f64("price").unwrap(), 9.99);
        assert_eq!(doc.get_i32("stock").unwrap(), 12);
    }

    #[test]
    fn test_client_id_kept() {
        let doc = mug(json!({ "_id": "custom-id-1" })).into_document();
        assert_eq!(doc.get_str("_id").unwrap(), "custom-id-1");

        let doc = mug(json!({ "_id": null })).into_document();
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn test_huge_integer_stored_as_double() {
        let product = parse(json!({
            "name": "Mug",
            "price": u64::MAX,
            "image": "mug.png",
            "category": "kitchen",
            "description": "A mug",
        }));
        assert!(product.validate().is_ok());

        let doc = product.into_document();
        assert_eq!(doc.get_f64("price").unwrap(), u64::MAX as f64);
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert!(serde_json::from_value::<NewProduct>(json!(["Mug"])).is_err());
    }
}
