//! Application and table metadata decoders

use qbase_domain::types::{AncestorInfo, AppDtmInfo, CreatedDatabase, DbInfo, DtmEntry, ImportResult};
use roxmltree::Node;

use crate::xml::{self, Envelope};

pub fn db_info(envelope: &Envelope<'_>) -> DbInfo {
    DbInfo {
        dbname: envelope.text("dbname"),
        last_rec_mod_time: envelope.date("lastRecModTime"),
        last_modified_time: envelope.date("lastModifiedTime"),
        created_time: envelope.date("createdTime"),
        num_records: envelope.int("numRecords"),
        mgr_id: envelope.text("mgrID"),
        mgr_name: envelope.text("mgrName"),
        version: envelope.text("version"),
        time_zone: envelope.text("time_zone"),
    }
}

/// `<dbid>` of `API_FindDBByName`.
pub fn dbid(envelope: &Envelope<'_>) -> String {
    envelope.text("dbid")
}

pub fn ancestor_info(envelope: &Envelope<'_>) -> AncestorInfo {
    AncestorInfo {
        ancestor: envelope.text("ancestorappid"),
        oldest: envelope.text("oldestancestorappid"),
    }
}

pub fn app_dtm_info(envelope: &Envelope<'_>) -> AppDtmInfo {
    AppDtmInfo {
        req_time: envelope.date("RequestTime"),
        next_req_time: envelope.date("RequestNextAllowedTime"),
        app: envelope.find("app").map(dtm_entry).unwrap_or_default(),
        tables: envelope.find_all("table").map(dtm_entry).collect(),
    }
}

fn dtm_entry(node: Node<'_, '_>) -> DtmEntry {
    let date = |tag| xml::child(node, tag).and_then(|n| xml::parse_millis(&xml::text(n)));
    DtmEntry {
        dbid: xml::attr(node, "id"),
        last_modified: date("lastModifiedTime"),
        last_rec_modified: date("lastRecModTime"),
    }
}

pub fn created_database(envelope: &Envelope<'_>) -> CreatedDatabase {
    CreatedDatabase {
        dbid: envelope.text("dbid"),
        appdbid: envelope.text("appdbid"),
        apptoken: envelope.text("apptoken"),
    }
}

/// `<newdbid>` of `API_CloneDatabase`.
pub fn new_dbid(envelope: &Envelope<'_>) -> String {
    envelope.text("newdbid")
}

/// `<value>` of `API_GetDBVar`.
pub fn var_value(envelope: &Envelope<'_>) -> String {
    envelope.text("value")
}

/// `<pageID>` of `API_AddReplaceDBPage`.
pub fn page_id(envelope: &Envelope<'_>) -> Option<i64> {
    envelope.int("pageID")
}

/// `<import_status>` of `API_RunImport`.
pub fn import_status(envelope: &Envelope<'_>) -> String {
    envelope.text("import_status")
}

pub fn csv_import(envelope: &Envelope<'_>) -> ImportResult {
    ImportResult {
        input: envelope.int("num_recs_input"),
        added: envelope.int("num_recs_added"),
        updated: envelope.int("num_recs_updated"),
        rids: envelope
            .find("rids")
            .map(|rids| {
                rids.children()
                    .filter(|n| n.has_tag_name("rid"))
                    .filter_map(|n| xml::parse_int(&xml::text(n)))
                    .collect()
            })
            .unwrap_or_default(),
    }
}
