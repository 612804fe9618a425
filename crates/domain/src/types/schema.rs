//! `API_GetSchema` result types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decoded schema of an application or table
///
/// Application schemas carry `children`; table schemas carry `queries` and
/// `fields`. Collections the response omits are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub desc: String,
    pub id: String,
    pub app_id: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub next_record: Option<i64>,
    pub next_field: Option<i64>,
    pub next_query: Option<i64>,
    pub default_sort_fid: Option<i64>,
    pub default_sort_order: Option<i64>,
    /// Application variables by name
    pub variables: BTreeMap<String, VariableValue>,
    /// Child table ids keyed by their `chdbid` name
    pub children: BTreeMap<String, String>,
    /// Saved queries keyed by query id
    pub queries: BTreeMap<String, QueryInfo>,
    /// Field definitions keyed by field id
    pub fields: BTreeMap<String, FieldInfo>,
}

/// Value of an application variable
///
/// All-digit values are exposed as integers, everything else as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Integer(i64),
    Text(String),
}

impl VariableValue {
    /// Decode a raw variable value.
    pub fn from_text(text: &str) -> Self {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = text.parse() {
                return Self::Integer(value);
            }
        }
        Self::Text(text.to_string())
    }
}

/// Saved query (report) of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub query_type: String,
    pub desc: String,
    pub criteria: String,
    pub sort_list: String,
    pub options: String,
    pub columns: String,
}

/// Field definition of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub label: String,
    pub field_type: String,
    pub base_type: String,
    /// `formula`, `lookup`, `virtual` or empty for plain fields
    pub mode: String,
}
