//! Record and collection metadata
//!
//! Metadata is a flat map from string keys to scalar values. Nested arrays and
//! objects are rejected at the boundary so that equality filtering stays a
//! simple per-field comparison.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scalar metadata value
///
/// Serialized untagged, so `{"source": "docs", "page": 3}` is valid metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (stored as f64)
    Number(f64),
    /// String value
    String(String),
}

impl MetadataValue {
    /// Equality used by filters.
    ///
    /// Numbers compare with an epsilon tolerance; all other kinds compare
    /// exactly and never match across kinds.
    pub fn matches(&self, other: &MetadataValue) -> bool {
        match (self, other) {
            (MetadataValue::Null, MetadataValue::Null) => true,
            (MetadataValue::Bool(a), MetadataValue::Bool(b)) => a == b,
            (MetadataValue::Number(a), MetadataValue::Number(b)) => (a - b).abs() < f64::EPSILON,
            (MetadataValue::String(a), MetadataValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Bool(v)
    }
}

impl From<i32> for MetadataValue {
    fn from(v: i32) -> Self {
        MetadataValue::Number(v as f64)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Number(v as f64)
    }
}

impl From<f32> for MetadataValue {
    fn from(v: f32) -> Self {
        MetadataValue::Number(v as f64)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Number(v)
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::String(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::String(v.to_string())
    }
}

/// Metadata map. `BTreeMap` keeps serialization deterministic.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Metadata filter for queries (equality only)
///
/// All conditions must match (AND semantics). An empty filter matches every
/// record, including records without metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFilter {
    /// Top-level field equality
    pub equals: BTreeMap<String, MetadataValue>,
}

impl MetadataFilter {
    /// Create an empty filter (matches all)
    pub fn new() -> Self {
        MetadataFilter {
            equals: BTreeMap::new(),
        }
    }

    /// Add an equality condition
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.equals.insert(field.into(), value.into());
        self
    }

    /// Check if metadata matches this filter
    ///
    /// Returns false if metadata is None and the filter is non-empty.
    pub fn matches(&self, metadata: Option<&Metadata>) -> bool {
        if self.equals.is_empty() {
            return true;
        }

        let Some(meta) = metadata else {
            return false;
        };

        self.equals.iter().all(|(key, expected)| {
            meta.get(key)
                .is_some_and(|actual| expected.matches(actual))
        })
    }

    /// Check if filter is empty (matches all)
    pub fn is_empty(&self) -> bool {
        self.equals.is_empty()
    }

    /// Get the number of conditions in the filter
    pub fn len(&self) -> usize {
        self.equals.len()
    }
}
