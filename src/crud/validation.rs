//! Request validation.
//!
//! Checks run before any transformation; the first violated rule is
//! reported and the request is left untouched.

use thiserror::Error;

use crate::crud::types::{CreateRequest, DeleteRequest, Document, ReadRequest, UpdateRequest};

/// A violated request rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("prefix is required")]
    EmptyPrefix,

    #[error("data must contain at least one document")]
    EmptyData,

    #[error("data[{index}] must be a JSON object")]
    InvalidDocument { index: usize },

    #[error("limit must not be negative, got {0}")]
    NegativeLimit(i64),

    #[error("skip must not be negative, got {0}")]
    NegativeSkip(i64),

    #[error("filter is required and must not be empty")]
    MissingFilter,

    #[error("data is required")]
    MissingData,
}

/// A public request that can be checked before dispatch.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require_prefix(prefix: &str) -> Result<(), ValidationError> {
    if prefix.is_empty() {
        return Err(ValidationError::EmptyPrefix);
    }
    Ok(())
}

fn require_filter(filter: Option<&Document>) -> Result<(), ValidationError> {
    match filter {
        Some(f) if !f.is_empty() => Ok(()),
        _ => Err(ValidationError::MissingFilter),
    }
}

impl Validate for CreateRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_prefix(&self.prefix)?;
        if self.data.is_empty() {
            return Err(ValidationError::EmptyData);
        }
        if let Some(index) = self.data.iter().position(|doc| !doc.is_object()) {
            return Err(ValidationError::InvalidDocument { index });
        }
        Ok(())
    }
}

impl Validate for ReadRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_prefix(&self.prefix)?;
        if let Some(limit) = self.limit.filter(|l| *l < 0) {
            return Err(ValidationError::NegativeLimit(limit));
        }
        if let Some(skip) = self.skip.filter(|s| *s < 0) {
            return Err(ValidationError::NegativeSkip(skip));
        }
        Ok(())
    }
}

impl Validate for UpdateRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_prefix(&self.prefix)?;
        require_filter(self.filter.as_ref())?;
        match &self.data {
            Some(data) if !data.is_null() => Ok(()),
            _ => Err(ValidationError::MissingData),
        }
    }
}

impl Validate for DeleteRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_prefix(&self.prefix)?;
        require_filter(self.filter.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Option<Document> {
        value.as_object().cloned()
    }

    #[test]
    fn test_prefix_required_for_every_verb() {
        let create = CreateRequest { prefix: String::new(), data: vec![json!({"a": 1})] };
        let read = ReadRequest::default();
        let update = UpdateRequest {
            prefix: String::new(),
            filter: doc(json!({"a": 1})),
            data: Some(json!({"b": 2})),
            upsert: false,
        };
        let delete = DeleteRequest { prefix: String::new(), filter: doc(json!({"a": 1})) };

        assert_eq!(create.validate(), Err(ValidationError::EmptyPrefix));
        assert_eq!(read.validate(), Err(ValidationError::EmptyPrefix));
        assert_eq!(update.validate(), Err(ValidationError::EmptyPrefix));
        assert_eq!(delete.validate(), Err(ValidationError::EmptyPrefix));
    }

    #[test]
    fn test_create_rules() {
        let empty = CreateRequest { prefix: "t".into(), data: vec![] };
        assert_eq!(empty.validate(), Err(ValidationError::EmptyData));

        let scalar = CreateRequest { prefix: "t".into(), data: vec![json!({"a": 1}), json!(7)] };
        assert_eq!(scalar.validate(), Err(ValidationError::InvalidDocument { index: 1 }));

        let ok = CreateRequest { prefix: "t".into(), data: vec![json!({"a": 1}), json!({})] };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_read_rules() {
        let bare = ReadRequest { prefix: "t".into(), ..ReadRequest::default() };
        assert!(bare.validate().is_ok());

        let zero = ReadRequest { prefix: "t".into(), limit: Some(0), skip: Some(0), ..ReadRequest::default() };
        assert!(zero.validate().is_ok());

        let limit = ReadRequest { prefix: "t".into(), limit: Some(-1), ..ReadRequest::default() };
        assert_eq!(limit.validate(), Err(ValidationError::NegativeLimit(-1)));

        let skip = ReadRequest { prefix: "t".into(), skip: Some(-5), ..ReadRequest::default() };
        assert_eq!(skip.validate(), Err(ValidationError::NegativeSkip(-5)));
    }

    #[test]
    fn test_update_rules() {
        let mut req = UpdateRequest {
            prefix: "t".into(),
            filter: doc(json!({})),
            data: Some(json!({"b": 2})),
            upsert: false,
        };
        assert_eq!(req.validate(), Err(ValidationError::MissingFilter));

        req.filter = None;
        assert_eq!(req.validate(), Err(ValidationError::MissingFilter));

        req.filter = doc(json!({"a": 1}));
        req.data = None;
        assert_eq!(req.validate(), Err(ValidationError::MissingData));

        req.data = Some(Value::Null);
        assert_eq!(req.validate(), Err(ValidationError::MissingData));

        req.data = Some(json!({"b": 2}));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_delete_rules() {
        let empty = DeleteRequest { prefix: "t".into(), filter: doc(json!({})) };
        assert_eq!(empty.validate(), Err(ValidationError::MissingFilter));

        let ok = DeleteRequest { prefix: "t".into(), filter: doc(json!({"id": "1"})) };
        assert!(ok.validate().is_ok());
    }
}
