//! Action registry
//!
//! Every QuickBase operation is one immutable [`Action`] value: its API
//! identifier, HTTP method, response format, target rule, fixed parameters,
//! the decoder for its response, and an optional effect on the session. The
//! statics live in [`crate::actions`]; this module holds the types, the
//! response translation step and the lookup table.

use std::fmt;

use qbase_domain::Result;
use serde_json::Value;

use crate::actions;
use crate::classify;
use crate::session::SessionState;
use crate::xml::Envelope;

/// HTTP method used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Query-string request
    Get,
    /// XML-bodied request
    Post,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a response body is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    /// XML envelope, classified and decoded
    Structured,
    /// Body returned unmodified, never classified
    Raw,
}

/// Which database id a call is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRule {
    /// Caller override, else the session dbid
    Session,
    /// Caller override, else this dbid
    Default(&'static str),
    /// Always this dbid. The caller's (or session's) dbid travels as the
    /// `dbid` parameter instead.
    Pinned(&'static str),
}

/// Fixed parameter value declared by an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixed {
    Text(&'static str),
    Int(i64),
}

impl Fixed {
    pub fn to_json(self) -> Value {
        match self {
            Self::Text(text) => Value::from(text),
            Self::Int(value) => Value::from(value),
        }
    }
}

/// Untyped description of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    /// Operation name, e.g. `add_record`
    pub name: &'static str,
    /// API identifier, e.g. `API_AddRecord`
    pub api: &'static str,
    pub method: HttpMethod,
    pub format: ResponseFormat,
    pub target: TargetRule,
    /// Parameters sent unless the caller overrides them, in order
    pub defaults: &'static [(&'static str, Fixed)],
}

impl ActionSpec {
    const fn new(name: &'static str, api: &'static str, method: HttpMethod) -> Self {
        Self {
            name,
            api,
            method,
            format: ResponseFormat::Structured,
            target: TargetRule::Session,
            defaults: &[],
        }
    }

    /// Query-string action addressed to the session dbid.
    pub const fn get(name: &'static str, api: &'static str) -> Self {
        Self::new(name, api, HttpMethod::Get)
    }

    /// XML-bodied action addressed to the session dbid.
    pub const fn post(name: &'static str, api: &'static str) -> Self {
        Self::new(name, api, HttpMethod::Post)
    }

    pub const fn target(mut self, target: TargetRule) -> Self {
        self.target = target;
        self
    }

    pub const fn defaults(mut self, defaults: &'static [(&'static str, Fixed)]) -> Self {
        self.defaults = defaults;
        self
    }
}

/// Response decoder of an action
pub enum Decoder<T> {
    Structured(fn(&Envelope<'_>) -> T),
    Raw(fn(String) -> T),
}

/// Session update applied after a successful decode
///
/// Returns `true` when the client should publish a ticket event.
pub type SessionEffect<T> = fn(&T, &mut SessionState) -> bool;

/// Typed action
pub struct Action<T> {
    pub spec: ActionSpec,
    pub decoder: Decoder<T>,
    pub effect: Option<SessionEffect<T>>,
}

impl<T> Action<T> {
    /// Action whose XML response is classified and decoded.
    pub const fn structured(spec: ActionSpec, decode: fn(&Envelope<'_>) -> T) -> Self {
        let spec = ActionSpec { format: ResponseFormat::Structured, ..spec };
        Self { spec, decoder: Decoder::Structured(decode), effect: None }
    }

    /// Action whose response body is passed through.
    pub const fn raw(spec: ActionSpec, decode: fn(String) -> T) -> Self {
        let spec = ActionSpec { format: ResponseFormat::Raw, ..spec };
        Self { spec, decoder: Decoder::Raw(decode), effect: None }
    }

    pub const fn with_effect(mut self, effect: SessionEffect<T>) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Turn a successful HTTP body into the decoded result.
    ///
    /// # Errors
    ///
    /// Structured actions fail with `MalformedResponse` when the body is not
    /// XML and with `Api` when the envelope carries a non-zero `errcode`.
    /// Raw actions never fail here.
    pub fn translate(&self, body: String) -> Result<T> {
        match self.decoder {
            Decoder::Raw(decode) => Ok(decode(body)),
            Decoder::Structured(decode) => {
                let envelope = Envelope::parse(&body)?;
                classify::check(&envelope)?;
                Ok(decode(&envelope))
            }
        }
    }
}

static ALL: [&ActionSpec; 45] = [
    &actions::AUTHENTICATE.spec,
    &actions::SIGN_OUT.spec,
    &actions::DB_INFO.spec,
    &actions::FIND_DB_BY_NAME.spec,
    &actions::ANCESTOR_INFO.spec,
    &actions::APP_DTM_INFO.spec,
    &actions::SCHEMA.spec,
    &actions::USER_ROLES.spec,
    &actions::CREATE_DATABASE.spec,
    &actions::DELETE_DATABASE.spec,
    &actions::CLONE_DATABASE.spec,
    &actions::RENAME_APP.spec,
    &actions::GET_DB_VAR.spec,
    &actions::SET_DB_VAR.spec,
    &actions::ADD_REPLACE_DB_PAGE.spec,
    &actions::GET_DB_PAGE.spec,
    &actions::RUN_IMPORT.spec,
    &actions::IMPORT_FROM_CSV.spec,
    &actions::ADD_FIELD.spec,
    &actions::DELETE_FIELD.spec,
    &actions::SET_KEY_FIELD.spec,
    &actions::SET_FIELD_PROPERTIES.spec,
    &actions::FIELD_ADD_CHOICES.spec,
    &actions::FIELD_REMOVE_CHOICES.spec,
    &actions::ADD_RECORD.spec,
    &actions::GEN_ADD_RECORD_FORM.spec,
    &actions::CHANGE_RECORD_OWNER.spec,
    &actions::COPY_MASTER_DETAIL.spec,
    &actions::DELETE_RECORD.spec,
    &actions::EDIT_RECORD.spec,
    &actions::DO_QUERY.spec,
    &actions::DO_QUERY_COUNT.spec,
    &actions::GEN_RESULTS_TABLE.spec,
    &actions::RECORD_AS_HTML.spec,
    &actions::RECORD_INFO.spec,
    &actions::NUM_RECORDS.spec,
    &actions::PURGE_RECORDS.spec,
    &actions::ADD_USER_TO_ROLE.spec,
    &actions::CHANGE_USER_ROLE.spec,
    &actions::ROLE_INFO.spec,
    &actions::USER_INFO.spec,
    &actions::USER_ROLE.spec,
    &actions::PROVISION_USER.spec,
    &actions::REMOVE_USER_FROM_ROLE.spec,
    &actions::SEND_INVITATION.spec,
];

/// Every registered action, in registry order.
pub fn all() -> &'static [&'static ActionSpec] {
    &ALL
}

/// Look an action up by operation name or API identifier.
pub fn lookup(name: &str) -> Option<&'static ActionSpec> {
    ALL.iter().copied().find(|spec| spec.name == name || spec.api.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_and_api_ids_are_unique() {
        let names: HashSet<_> = all().iter().map(|spec| spec.name).collect();
        let apis: HashSet<_> = all().iter().map(|spec| spec.api).collect();
        assert_eq!(names.len(), all().len());
        assert_eq!(apis.len(), all().len());
        assert!(all().iter().all(|spec| spec.api.starts_with("API_")));
    }

    #[test]
    fn test_lookup_by_name_or_api() {
        assert_eq!(lookup("add_record").map(|spec| spec.api), Some("API_AddRecord"));
        assert_eq!(lookup("API_DoQuery").map(|spec| spec.name), Some("do_query"));
        assert_eq!(lookup("api_getschema").map(|spec| spec.name), Some("schema"));
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn test_raw_actions() {
        let raw: Vec<_> = all()
            .iter()
            .filter(|spec| spec.format == ResponseFormat::Raw)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(raw, vec!["get_db_page", "gen_add_record_form", "gen_results_table", "record_as_html"]);
    }

    #[test]
    fn test_root_targets() {
        for name in ["authenticate", "sign_out", "create_database"] {
            assert_eq!(lookup(name).unwrap().target, TargetRule::Default("main"));
        }
        assert_eq!(lookup("app_dtm_info").unwrap().target, TargetRule::Pinned("main"));
    }

    #[test]
    fn test_raw_translation_skips_classification() {
        let body = "<qdbapi><errcode>85</errcode></qdbapi>".to_string();
        assert_eq!(actions::GET_DB_PAGE.translate(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_structured_translation_classifies_first() {
        let err = actions::DO_QUERY_COUNT
            .translate("<qdbapi><errcode>4</errcode><errtext>Bad ticket</errtext></qdbapi>".into())
            .unwrap_err();
        assert_eq!(err.to_string(), "QuickBase Error 4: Bad ticket");
    }
}
