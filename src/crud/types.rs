//! Request and response shapes.
//!
//! Two vocabularies meet here: the public schema spoken with callers
//! (keyed by `prefix`) and the storage schema spoken with the storage
//! service (keyed by the resolved `collection`).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A JSON object used as a filter or a document.
pub type Document = Map<String, Value>;

/// Field name to sort direction (1 ascending, -1 descending).
pub type SortSpec = BTreeMap<String, i32>;

/// Decode `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_false(value: &bool) -> bool {
    !*value
}

// --- Public requests ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub prefix: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadRequest {
    #[serde(default)]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub filter: Option<Document>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub upsert: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub filter: Option<Document>,
}

// --- Public responses ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub data: Vec<String>,
    pub created: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadResponse {
    pub data: Vec<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub data: Vec<String>,
    pub updated: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub data: Vec<String>,
    pub deleted: i64,
}

// --- Storage requests ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDocumentsRequest {
    pub collection: String,
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadDocumentsRequest {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocumentsRequest {
    pub collection: String,
    pub filter: Document,
    pub data: Value,
    #[serde(default, skip_serializing_if = "is_false")]
    pub upsert: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteDocumentsRequest {
    pub collection: String,
    pub filter: Document,
}

// --- Storage responses ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDocumentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<String>,
    #[serde(default)]
    pub created: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadDocumentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocumentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<String>,
    #[serde(default)]
    pub updated: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteDocumentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<String>,
    #[serde(default)]
    pub deleted: i64,
}

impl From<CreateDocumentsResponse> for CreateResponse {
    fn from(res: CreateDocumentsResponse) -> Self {
        Self {
            data: res.data,
            created: res.created,
        }
    }
}

impl From<ReadDocumentsResponse> for ReadResponse {
    fn from(res: ReadDocumentsResponse) -> Self {
        Self {
            data: res.data,
            total: res.total,
        }
    }
}

impl From<UpdateDocumentsResponse> for UpdateResponse {
    fn from(res: UpdateDocumentsResponse) -> Self {
        Self {
            data: res.data,
            updated: res.updated,
        }
    }
}

impl From<DeleteDocumentsResponse> for DeleteResponse {
    fn from(res: DeleteDocumentsResponse) -> Self {
        Self {
            data: res.data,
            deleted: res.deleted,
        }
    }
}
