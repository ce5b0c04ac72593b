//! 文档存储形式与对外 JSON 形式
//!
//! 存储层只认识 BSON `Document`；接口层只输出 JSON。任意层级的 ObjectId
//! 都渲染为 24 位十六进制字符串，日期渲染为 RFC 3339 字符串，其余值按
//! relaxed extended JSON 输出。

use mongodb::bson::{Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};

/// 存储中的一条文档
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Bson,
    pub fields: Document,
}

impl From<Document> for StoredDocument {
    fn from(mut doc: Document) -> Self {
        let id = doc.remove("_id").unwrap_or(Bson::Null);
        Self { id, fields: doc }
    }
}

/// 返回给客户端的文档
#[derive(Debug, Serialize)]
pub struct DocumentView {
    #[serde(rename = "_id")]
    pub id: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<StoredDocument> for DocumentView {
    fn from(doc: StoredDocument) -> Self {
        Self {
            id: bson_to_json(doc.id),
            fields: document_to_json(doc.fields),
        }
    }
}

/// BSON 值转为对外 JSON
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => Value::Object(document_to_json(doc)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn document_to_json(doc: Document) -> Map<String, Value> {
    doc.into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// 请求体中的 JSON 值转为 BSON
///
/// 整数优先存为 Int32，其次 Int64；超出 i64 的整数存为 Double。
pub fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => match i32::try_from(i) {
                Ok(small) => Bson::Int32(small),
                Err(_) => Bson::Int64(i),
            },
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(
            map.into_iter()
                .map(|(key, value)| (key, json_to_bson(value)))
                .collect(),
        ),
    }
}
