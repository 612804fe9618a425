//! Decoded result types
//!
//! One struct per response shape returned by the QuickBase actions. Text the
//! response omits decodes to an empty string; numbers and dates the response
//! omits (or that fail to parse) decode to `None`. Nothing here is ever
//! filled with invented values.

pub mod app;
pub mod record;
pub mod schema;
pub mod user;

pub use app::{AncestorInfo, AppDtmInfo, CreatedDatabase, DbInfo, DtmEntry, ImportResult};
pub use record::{CopyResult, QueryRecord, RecordAdded, RecordEdited, RecordField, RecordInfo};
pub use schema::{FieldInfo, QueryInfo, TableSchema, VariableValue};
pub use user::{Role, RoleMap, UserInfo, UserRoles};
