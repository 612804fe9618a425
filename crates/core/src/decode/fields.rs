//! Field operation decoders

use crate::xml::Envelope;

/// `<fid>` of `API_AddField`.
pub fn fid(envelope: &Envelope<'_>) -> Option<i64> {
    envelope.int("fid")
}

/// `<numadded>` of `API_FieldAddChoices`.
pub fn num_added(envelope: &Envelope<'_>) -> Option<i64> {
    envelope.int("numadded")
}

/// `<numremoved>` of `API_FieldRemoveChoices`.
pub fn num_removed(envelope: &Envelope<'_>) -> Option<i64> {
    envelope.int("numremoved")
}
