//! Record operation decoders

use qbase_domain::types::{CopyResult, QueryRecord, RecordAdded, RecordEdited, RecordField, RecordInfo};

use crate::xml::{self, Envelope};

pub fn record_added(envelope: &Envelope<'_>) -> RecordAdded {
    RecordAdded { rid: envelope.int("rid"), update_id: envelope.int("update_id") }
}

pub fn record_edited(envelope: &Envelope<'_>) -> RecordEdited {
    RecordEdited {
        rid: envelope.int("rid"),
        num_fields_changed: envelope.int("num_fields_changed"),
        update_id: envelope.int("update_id"),
    }
}

pub fn copy_result(envelope: &Envelope<'_>) -> CopyResult {
    CopyResult { parent_rid: envelope.int("parentrid"), num_created: envelope.int("numCreated") }
}

/// Records of a structured `API_DoQuery` response.
///
/// The record id comes from the `rid` attribute (sent with `includeRids=1`)
/// and each `<f id="N">` becomes one field entry.
pub fn query_records(envelope: &Envelope<'_>) -> Vec<QueryRecord> {
    let Some(records) = envelope.find("records") else {
        return Vec::new();
    };
    records
        .children()
        .filter(|n| n.has_tag_name("record"))
        .map(|record| QueryRecord {
            rid: record
                .attribute("rid")
                .and_then(xml::parse_int)
                .or_else(|| xml::child(record, "rid").and_then(|n| xml::parse_int(&xml::text(n)))),
            update_id: xml::child(record, "update_id")
                .map(xml::text)
                .or_else(|| record.attribute("update_id").map(str::to_string))
                .and_then(|text| xml::parse_int(&text)),
            fields: record
                .children()
                .filter(|n| n.has_tag_name("f"))
                .map(|f| (xml::attr(f, "id"), xml::text(f)))
                .collect(),
        })
        .collect()
}

/// `<numMatches>` of `API_DoQueryCount`.
pub fn num_matches(envelope: &Envelope<'_>) -> Option<i64> {
    envelope.int("numMatches")
}

/// `<num_records>` of `API_GetNumRecords`.
pub fn num_records(envelope: &Envelope<'_>) -> Option<i64> {
    envelope.int("num_records")
}

/// `<num_records_deleted>` of `API_PurgeRecords`.
pub fn num_deleted(envelope: &Envelope<'_>) -> Option<i64> {
    envelope.int("num_records_deleted")
}

pub fn record_info(envelope: &Envelope<'_>) -> RecordInfo {
    RecordInfo {
        rid: envelope.int("rid"),
        num_fields: envelope.int("num_fields"),
        update_id: envelope.int("update_id"),
        fields: envelope
            .root()
            .children()
            .filter(|n| n.has_tag_name("field"))
            .map(|field| RecordField {
                fid: xml::parse_int(&xml::child_text(field, "fid")),
                name: xml::child_text(field, "name"),
                field_type: xml::child_text(field, "type"),
                value: xml::child_text(field, "value"),
            })
            .collect(),
    }
}
