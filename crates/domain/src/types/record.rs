//! Record operation results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `API_AddRecord` result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAdded {
    pub rid: Option<i64>,
    #[serde(rename = "updateId")]
    pub update_id: Option<i64>,
}

/// `API_EditRecord` result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEdited {
    pub rid: Option<i64>,
    pub num_fields_changed: Option<i64>,
    #[serde(rename = "updateId")]
    pub update_id: Option<i64>,
}

/// `API_CopyMasterDetail` result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyResult {
    pub parent_rid: Option<i64>,
    pub num_created: Option<i64>,
}

/// One record of a structured `API_DoQuery` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub rid: Option<i64>,
    #[serde(rename = "updateId")]
    pub update_id: Option<i64>,
    /// Field id -> value as sent by the server
    pub fields: BTreeMap<String, String>,
}

/// One field of an `API_GetRecordInfo` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    pub fid: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: String,
}

/// `API_GetRecordInfo` result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInfo {
    pub rid: Option<i64>,
    pub num_fields: Option<i64>,
    #[serde(rename = "updateId")]
    pub update_id: Option<i64>,
    pub fields: Vec<RecordField>,
}
