//! Application and table metadata results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `API_GetDBInfo` result
///
/// The `*_time` fields come from millisecond epoch values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbInfo {
    pub dbname: String,
    pub last_rec_mod_time: Option<DateTime<Utc>>,
    pub last_modified_time: Option<DateTime<Utc>>,
    pub created_time: Option<DateTime<Utc>>,
    pub num_records: Option<i64>,
    pub mgr_id: String,
    pub mgr_name: String,
    pub version: String,
    pub time_zone: String,
}

/// `API_GetAncestorInfo` result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorInfo {
    /// Application this one was copied from
    pub ancestor: String,
    /// First application in the copy chain
    pub oldest: String,
}

/// Modification times of one application or table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtmEntry {
    pub dbid: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_rec_modified: Option<DateTime<Utc>>,
}

/// `API_GetAppDTMInfo` result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDtmInfo {
    pub req_time: Option<DateTime<Utc>>,
    /// Earliest time the next delta request will be answered
    pub next_req_time: Option<DateTime<Utc>>,
    pub app: DtmEntry,
    pub tables: Vec<DtmEntry>,
}

/// `API_CreateDatabase` result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDatabase {
    /// Main table id of the new application
    pub dbid: String,
    pub appdbid: String,
    pub apptoken: String,
}

/// `API_ImportFromCSV` result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub input: Option<i64>,
    pub added: Option<i64>,
    pub updated: Option<i64>,
    /// Record ids touched by the import, in response order
    pub rids: Vec<i64>,
}
