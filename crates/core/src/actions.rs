//! Registered QuickBase actions
//!
//! One static per API call. Fixed parameters are sent unless the caller
//! sets the same name; see [`crate::options::merge`].

use qbase_domain::constants::{DEFAULT_TICKET_HOURS, ROOT_DBID};
use qbase_domain::types::{
    AncestorInfo, AppDtmInfo, CopyResult, CreatedDatabase, DbInfo, ImportResult, QueryRecord,
    RecordAdded, RecordEdited, RecordInfo, RoleMap, TableSchema, UserInfo, UserRoles,
};

use crate::decode::{self, app, auth, fields, records, schema, users};
use crate::registry::{Action, ActionSpec, Fixed, TargetRule};

const ROOT: TargetRule = TargetRule::Default(ROOT_DBID);

// Authentication

pub static AUTHENTICATE: Action<String> = Action::structured(
    ActionSpec::get("authenticate", "API_Authenticate")
        .target(ROOT)
        .defaults(&[("hours", Fixed::Int(DEFAULT_TICKET_HOURS))]),
    auth::ticket,
)
.with_effect(auth::store_ticket);

pub static SIGN_OUT: Action<()> =
    Action::structured(ActionSpec::get("sign_out", "API_SignOut").target(ROOT), decode::nothing)
        .with_effect(auth::clear_ticket);

// Application and table metadata

pub static DB_INFO: Action<DbInfo> =
    Action::structured(ActionSpec::get("db_info", "API_GetDBInfo"), app::db_info);

pub static FIND_DB_BY_NAME: Action<String> = Action::structured(
    ActionSpec::get("find_db_by_name", "API_FindDBByName")
        .defaults(&[("parentsOnly", Fixed::Int(1))]),
    app::dbid,
);

pub static ANCESTOR_INFO: Action<AncestorInfo> =
    Action::structured(ActionSpec::get("ancestor_info", "API_GetAncestorInfo"), app::ancestor_info);

pub static APP_DTM_INFO: Action<AppDtmInfo> = Action::structured(
    ActionSpec::get("app_dtm_info", "API_GetAppDTMInfo").target(TargetRule::Pinned(ROOT_DBID)),
    app::app_dtm_info,
);

pub static SCHEMA: Action<TableSchema> =
    Action::structured(ActionSpec::get("schema", "API_GetSchema"), schema::table_schema);

pub static USER_ROLES: Action<Vec<UserRoles>> =
    Action::structured(ActionSpec::get("user_roles", "API_UserRoles"), users::user_roles);

// Application operations

pub static CREATE_DATABASE: Action<CreatedDatabase> = Action::structured(
    ActionSpec::post("create_database", "API_CreateDatabase").target(ROOT).defaults(&[
        ("dbname", Fixed::Text("New Application")),
        ("dbdesc", Fixed::Text("My New QuickBase Application")),
        ("createapptoken", Fixed::Text("1")),
    ]),
    app::created_database,
);

pub static DELETE_DATABASE: Action<()> =
    Action::structured(ActionSpec::post("delete_database", "API_DeleteDatabase"), decode::nothing);

pub static CLONE_DATABASE: Action<String> =
    Action::structured(ActionSpec::post("clone_database", "API_CloneDatabase"), app::new_dbid);

pub static RENAME_APP: Action<()> =
    Action::structured(ActionSpec::post("rename_app", "API_RenameApp"), decode::nothing);

pub static GET_DB_VAR: Action<String> =
    Action::structured(ActionSpec::get("get_db_var", "API_GetDBVar"), app::var_value);

pub static SET_DB_VAR: Action<()> =
    Action::structured(ActionSpec::post("set_db_var", "API_SetDBVar"), decode::nothing);

pub static ADD_REPLACE_DB_PAGE: Action<Option<i64>> = Action::structured(
    ActionSpec::post("add_replace_db_page", "API_AddReplaceDBPage"),
    app::page_id,
);

pub static GET_DB_PAGE: Action<String> =
    Action::raw(ActionSpec::get("get_db_page", "API_GetDBPage"), decode::body);

pub static RUN_IMPORT: Action<String> =
    Action::structured(ActionSpec::get("run_import", "API_RunImport"), app::import_status);

pub static IMPORT_FROM_CSV: Action<ImportResult> =
    Action::structured(ActionSpec::post("import_from_csv", "API_ImportFromCSV"), app::csv_import);

// Field operations

pub static ADD_FIELD: Action<Option<i64>> = Action::structured(
    ActionSpec::post("add_field", "API_AddField")
        .defaults(&[("label", Fixed::Text("New Field")), ("type", Fixed::Text("text"))]),
    fields::fid,
);

pub static DELETE_FIELD: Action<()> =
    Action::structured(ActionSpec::post("delete_field", "API_DeleteField"), decode::nothing);

pub static SET_KEY_FIELD: Action<()> =
    Action::structured(ActionSpec::post("set_key_field", "API_SetKeyField"), decode::nothing);

pub static SET_FIELD_PROPERTIES: Action<()> = Action::structured(
    ActionSpec::post("set_field_properties", "API_SetFieldProperties"),
    decode::nothing,
);

pub static FIELD_ADD_CHOICES: Action<Option<i64>> = Action::structured(
    ActionSpec::post("field_add_choices", "API_FieldAddChoices"),
    fields::num_added,
);

pub static FIELD_REMOVE_CHOICES: Action<Option<i64>> = Action::structured(
    ActionSpec::post("field_remove_choices", "API_FieldRemoveChoices"),
    fields::num_removed,
);

// Record operations

pub static ADD_RECORD: Action<RecordAdded> =
    Action::structured(ActionSpec::post("add_record", "API_AddRecord"), records::record_added);

pub static GEN_ADD_RECORD_FORM: Action<String> =
    Action::raw(ActionSpec::post("gen_add_record_form", "API_GenAddRecordForm"), decode::body);

pub static CHANGE_RECORD_OWNER: Action<()> = Action::structured(
    ActionSpec::post("change_record_owner", "API_ChangeRecordOwner"),
    decode::nothing,
);

pub static COPY_MASTER_DETAIL: Action<CopyResult> = Action::structured(
    ActionSpec::post("copy_master_detail", "API_CopyMasterDetail"),
    records::copy_result,
);

pub static DELETE_RECORD: Action<()> =
    Action::structured(ActionSpec::post("delete_record", "API_DeleteRecord"), decode::nothing);

pub static EDIT_RECORD: Action<RecordEdited> =
    Action::structured(ActionSpec::post("edit_record", "API_EditRecord"), records::record_edited);

pub static DO_QUERY: Action<Vec<QueryRecord>> = Action::structured(
    ActionSpec::post("do_query", "API_DoQuery")
        .defaults(&[("fmt", Fixed::Text("structured")), ("includeRids", Fixed::Int(1))]),
    records::query_records,
);

pub static DO_QUERY_COUNT: Action<Option<i64>> =
    Action::structured(ActionSpec::get("do_query_count", "API_DoQueryCount"), records::num_matches);

pub static GEN_RESULTS_TABLE: Action<String> =
    Action::raw(ActionSpec::get("gen_results_table", "API_GenResultsTable"), decode::body);

pub static RECORD_AS_HTML: Action<String> =
    Action::raw(ActionSpec::get("record_as_html", "API_GetRecordAsHTML"), decode::body);

pub static RECORD_INFO: Action<RecordInfo> =
    Action::structured(ActionSpec::get("record_info", "API_GetRecordInfo"), records::record_info);

pub static NUM_RECORDS: Action<Option<i64>> =
    Action::structured(ActionSpec::get("num_records", "API_GetNumRecords"), records::num_records);

pub static PURGE_RECORDS: Action<Option<i64>> =
    Action::structured(ActionSpec::post("purge_records", "API_PurgeRecords"), records::num_deleted);

// User operations

pub static ADD_USER_TO_ROLE: Action<()> =
    Action::structured(ActionSpec::post("add_user_to_role", "API_AddUserToRole"), decode::nothing);

pub static CHANGE_USER_ROLE: Action<()> =
    Action::structured(ActionSpec::post("change_user_role", "API_ChangeUserRole"), decode::nothing);

pub static ROLE_INFO: Action<RoleMap> =
    Action::structured(ActionSpec::get("role_info", "API_GetRoleInfo"), users::role_info);

pub static USER_INFO: Action<UserInfo> =
    Action::structured(ActionSpec::get("user_info", "API_GetUserInfo"), users::user_info);

pub static USER_ROLE: Action<UserRoles> =
    Action::structured(ActionSpec::get("user_role", "API_GetUserRole"), users::user_role);

pub static PROVISION_USER: Action<String> =
    Action::structured(ActionSpec::post("provision_user", "API_ProvisionUser"), users::user_id);

pub static REMOVE_USER_FROM_ROLE: Action<()> = Action::structured(
    ActionSpec::post("remove_user_from_role", "API_RemoveUserFromRole"),
    decode::nothing,
);

pub static SEND_INVITATION: Action<()> =
    Action::structured(ActionSpec::post("send_invitation", "API_SendInvitation"), decode::nothing);
