//! Per-call options and the option merger
//!
//! [`merge`] combines an action's fixed values, the session defaults and the
//! caller's overrides into one [`CallDescriptor`]. Precedence is caller over
//! action over session, key by key. The merger does no validation of its
//! own; unencodable values are caught by the wire encoder.

use qbase_domain::constants::ROOT_DBID;
use serde_json::Value;

use crate::registry::{ActionSpec, HttpMethod, ResponseFormat, TargetRule};
use crate::session::{normalize_realm, SessionState};

/// Caller overrides for one call
///
/// Parameters and fields keep insertion order. Setting a name twice replaces
/// the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    dbid: Option<String>,
    apptoken: Option<String>,
    ticket: Option<String>,
    realm: Option<String>,
    params: Vec<(String, Value)>,
    fields: Vec<(String, Value)>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address this call to another database.
    pub fn dbid(mut self, dbid: impl Into<String>) -> Self {
        self.dbid = Some(dbid.into());
        self
    }

    pub fn apptoken(mut self, apptoken: impl Into<String>) -> Self {
        self.apptoken = Some(apptoken.into());
        self
    }

    pub fn ticket(mut self, ticket: impl Into<String>) -> Self {
        self.ticket = Some(ticket.into());
        self
    }

    /// Realm for this call only, normalized like the session realm.
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Set a scalar parameter (text, number, or a list of those).
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        upsert(&mut self.params, name.into(), value.into());
        self
    }

    /// Set a parameter only when a value is given.
    pub fn param_opt<V: Into<Value>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Set a record field by id (`"6"`) or name.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        upsert(&mut self.fields, key.into(), value.into());
        self
    }

    /// Set several record fields at once.
    pub fn fields<K, V, I>(self, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        fields.into_iter().fold(self, |options, (key, value)| options.field(key, value))
    }

    pub fn params(&self) -> &[(String, Value)] {
        &self.params
    }

    pub fn field_values(&self) -> &[(String, Value)] {
        &self.fields
    }
}

/// Fully resolved parameter set for one call
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    /// API identifier, e.g. `API_DoQuery`
    pub action: &'static str,
    pub method: HttpMethod,
    pub format: ResponseFormat,
    pub dbid: String,
    pub apptoken: String,
    pub ticket: String,
    pub realm: String,
    pub params: Vec<(String, Value)>,
    pub fields: Vec<(String, Value)>,
}

impl CallDescriptor {
    /// Whether this call targets the root pseudo-database.
    pub fn is_root(&self) -> bool {
        self.dbid == ROOT_DBID
    }

    /// `{realm}/db/{dbid}`
    pub fn url(&self) -> String {
        format!("{}/db/{}", self.realm.trim_end_matches('/'), self.dbid)
    }
}

/// Build the descriptor for one call.
///
/// The session is only read, so merging the same options twice against an
/// unchanged session yields identical descriptors. When the resolved target
/// is `main` the session application token is dropped; an explicit caller
/// token is kept here and stripped by the encoder.
pub fn merge(spec: &ActionSpec, session: &SessionState, options: &CallOptions) -> CallDescriptor {
    let mut params: Vec<(String, Value)> =
        spec.defaults.iter().map(|(name, value)| ((*name).to_string(), value.to_json())).collect();

    let caller_dbid = options.dbid.clone();
    let dbid = match spec.target {
        TargetRule::Session => caller_dbid.unwrap_or_else(|| session.dbid().to_string()),
        TargetRule::Default(dbid) => caller_dbid.unwrap_or_else(|| dbid.to_string()),
        TargetRule::Pinned(dbid) => {
            let forwarded = caller_dbid.unwrap_or_else(|| session.dbid().to_string());
            upsert(&mut params, "dbid".to_string(), Value::from(forwarded));
            dbid.to_string()
        }
    };

    for (name, value) in &options.params {
        upsert(&mut params, name.clone(), value.clone());
    }

    let apptoken = match &options.apptoken {
        Some(apptoken) => apptoken.clone(),
        None if dbid == ROOT_DBID => String::new(),
        None => session.apptoken().to_string(),
    };

    CallDescriptor {
        action: spec.api,
        method: spec.method,
        format: spec.format,
        dbid,
        apptoken,
        ticket: options.ticket.clone().unwrap_or_else(|| session.ticket().to_string()),
        realm: options
            .realm
            .as_deref()
            .map_or_else(|| session.realm().to_string(), normalize_realm),
        params,
        fields: options.fields.clone(),
    }
}

fn upsert(entries: &mut Vec<(String, Value)>, name: String, value: Value) {
    match entries.iter_mut().find(|(existing, _)| *existing == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name, value)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::actions;

    fn session() -> SessionState {
        let mut session = SessionState::new();
        session.set_dbid("bq8kx4ptm").set_apptoken("app-token").set_ticket("tkt").set_realm("acme");
        session
    }

    #[test]
    fn test_session_supplies_defaults() {
        let descriptor = merge(&actions::DB_INFO.spec, &session(), &CallOptions::new());
        assert_eq!(descriptor.action, "API_GetDBInfo");
        assert_eq!(descriptor.dbid, "bq8kx4ptm");
        assert_eq!(descriptor.apptoken, "app-token");
        assert_eq!(descriptor.ticket, "tkt");
        assert_eq!(descriptor.url(), "https://acme.quickbase.com/db/bq8kx4ptm");
    }

    #[test]
    fn test_caller_overrides_session_and_action() {
        let options = CallOptions::new()
            .dbid("other")
            .ticket("t2")
            .apptoken("a2")
            .realm("beta")
            .param("parentsOnly", 0)
            .param("dbname", "Projects");
        let descriptor = merge(&actions::FIND_DB_BY_NAME.spec, &session(), &options);

        assert_eq!(descriptor.dbid, "other");
        assert_eq!(descriptor.ticket, "t2");
        assert_eq!(descriptor.apptoken, "a2");
        assert_eq!(descriptor.realm, "https://beta.quickbase.com");
        assert_eq!(
            descriptor.params,
            vec![("parentsOnly".to_string(), json!(0)), ("dbname".to_string(), json!("Projects"))]
        );
    }

    #[test]
    fn test_action_defaults_apply_without_override() {
        let descriptor = merge(&actions::AUTHENTICATE.spec, &session(), &CallOptions::new());
        assert_eq!(descriptor.dbid, "main");
        assert_eq!(descriptor.params, vec![("hours".to_string(), json!(8))]);
    }

    #[test]
    fn test_root_target_drops_session_apptoken() {
        let descriptor = merge(&actions::CREATE_DATABASE.spec, &session(), &CallOptions::new());
        assert!(descriptor.is_root());
        assert_eq!(descriptor.apptoken, "");

        let mut root_session = session();
        root_session.set_dbid("main");
        let descriptor = merge(&actions::DB_INFO.spec, &root_session, &CallOptions::new());
        assert_eq!(descriptor.apptoken, "");
    }

    #[test]
    fn test_pinned_target_forwards_dbid_as_param() {
        let options = CallOptions::new().dbid("bq8kx4ptm");
        let descriptor = merge(&actions::APP_DTM_INFO.spec, &session(), &options);
        assert_eq!(descriptor.dbid, "main");
        assert_eq!(descriptor.params, vec![("dbid".to_string(), json!("bq8kx4ptm"))]);

        let descriptor = merge(&actions::APP_DTM_INFO.spec, &session(), &CallOptions::new());
        assert_eq!(descriptor.params, vec![("dbid".to_string(), json!("bq8kx4ptm"))]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let state = session();
        let options = CallOptions::new().param("rid", 7).field("6", "x");
        let first = merge(&actions::EDIT_RECORD.spec, &state, &options);
        let second = merge(&actions::EDIT_RECORD.spec, &state, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_setting_twice_replaces_in_place() {
        let options = CallOptions::new().param("a", 1).param("b", 2).param("a", 3).field("6", "x").field("6", "y");
        assert_eq!(options.params(), &[("a".to_string(), json!(3)), ("b".to_string(), json!(2))]);
        assert_eq!(options.field_values(), &[("6".to_string(), json!("y"))]);
    }
}
