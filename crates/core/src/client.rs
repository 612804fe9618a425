//! QuickBase client
//!
//! [`QuickBaseClient`] owns the session state, the notification channel and
//! a [`Transport`]. Every operation goes through [`QuickBaseClient::call`]:
//! merge, encode, send, classify, decode, apply the session effect.

use std::sync::Arc;

use parking_lot::RwLock;
use qbase_domain::constants::{EVENT_FAILURE, EVENT_REQUEST, EVENT_SUCCESS, EVENT_TICKET};
use qbase_domain::types::{
    AncestorInfo, AppDtmInfo, CopyResult, CreatedDatabase, DbInfo, ImportResult, QueryRecord,
    RecordAdded, RecordEdited, RecordInfo, RoleMap, TableSchema, UserInfo, UserRoles,
};
use qbase_domain::{ClientConfig, QuickBaseError, Result};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::actions;
use crate::events::{ClientEvent, EventEmitter, ListenerId};
use crate::options::{merge, CallOptions};
use crate::ports::Transport;
use crate::registry::Action;
use crate::session::SessionState;
use crate::wire;

type ErrorHandler = Arc<dyn Fn(&QuickBaseError) + Send + Sync>;

/// Client for the QuickBase XML API
pub struct QuickBaseClient {
    transport: Arc<dyn Transport>,
    session: RwLock<SessionState>,
    events: EventEmitter<ClientEvent>,
    error_handler: Option<ErrorHandler>,
}

impl std::fmt::Debug for QuickBaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.session.read();
        f.debug_struct("QuickBaseClient")
            .field("realm", &session.realm())
            .field("dbid", &session.dbid())
            .field("authenticated", &session.is_authenticated())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl QuickBaseClient {
    /// Create a client with default session values.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_session(transport, SessionState::default())
    }

    pub fn with_session(transport: Arc<dyn Transport>, session: SessionState) -> Self {
        Self {
            transport,
            session: RwLock::new(session),
            events: EventEmitter::new(),
            error_handler: None,
        }
    }

    /// Create a client whose session starts from `config`.
    pub fn from_config(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self::with_session(transport, SessionState::from(config))
    }

    /// Run `handler` on every error before it is returned.
    ///
    /// Pass [`qbase_domain::generic_error_handler`] to panic on API errors.
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&QuickBaseError) + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    // Session accessors

    /// Copy of the current session state.
    pub fn session(&self) -> SessionState {
        self.session.read().clone()
    }

    pub fn dbid(&self) -> String {
        self.session.read().dbid().to_string()
    }

    pub fn apptoken(&self) -> String {
        self.session.read().apptoken().to_string()
    }

    pub fn realm(&self) -> String {
        self.session.read().realm().to_string()
    }

    pub fn ticket(&self) -> String {
        self.session.read().ticket().to_string()
    }

    pub fn set_dbid(&self, dbid: impl Into<String>) -> &Self {
        self.session.write().set_dbid(dbid);
        self
    }

    pub fn set_apptoken(&self, apptoken: impl Into<String>) -> &Self {
        self.session.write().set_apptoken(apptoken);
        self
    }

    /// Set the realm. A bare subdomain becomes `https://<sub>.quickbase.com`.
    pub fn set_realm(&self, realm: &str) -> &Self {
        self.session.write().set_realm(realm);
        self
    }

    pub fn set_ticket(&self, ticket: impl Into<String>) -> &Self {
        let authenticated = {
            let mut session = self.session.write();
            session.set_ticket(ticket);
            session.is_authenticated()
        };
        self.events.emit(EVENT_TICKET, &ClientEvent::TicketChanged { authenticated });
        self
    }

    // Notifications

    /// Notification channel of this client.
    pub fn events(&self) -> &EventEmitter<ClientEvent> {
        &self.events
    }

    pub fn on<F>(&self, name: &str, callback: F) -> ListenerId
    where
        F: Fn(&ClientEvent) + Send + Sync + 'static,
    {
        self.events.on(name, callback)
    }

    pub fn once<F>(&self, name: &str, callback: F) -> ListenerId
    where
        F: Fn(&ClientEvent) + Send + Sync + 'static,
    {
        self.events.once(name, callback)
    }

    pub fn off(&self, name: &str, id: ListenerId) -> bool {
        self.events.off(name, id)
    }

    /// Publish an application-defined event.
    pub fn emit(&self, name: &str, payload: Value) -> bool {
        self.events.emit(name, &ClientEvent::Custom(payload))
    }

    // Dispatch

    /// Run any registered action.
    ///
    /// # Errors
    ///
    /// - `InvalidParameterType` when an option value cannot be encoded;
    ///   nothing is sent in that case
    /// - `Transport` when the request fails or the status is not 2xx
    /// - `MalformedResponse` when a structured body is not XML
    /// - `Api` when the response carries a non-zero `errcode`
    #[instrument(skip_all, fields(action = action.spec.name, dbid = tracing::field::Empty))]
    pub async fn call<T>(&self, action: &Action<T>, options: CallOptions) -> Result<T> {
        match self.dispatch(action, options).await {
            Ok(value) => {
                self.events.emit(EVENT_SUCCESS, &ClientEvent::Success { action: action.spec.api });
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, kind = err.label(), "QuickBase call failed");
                self.events.emit(
                    EVENT_FAILURE,
                    &ClientEvent::Failure { action: action.spec.api, error: err.clone() },
                );
                if let Some(handler) = &self.error_handler {
                    handler(&err);
                }
                Err(err)
            }
        }
    }

    async fn dispatch<T>(&self, action: &Action<T>, options: CallOptions) -> Result<T> {
        let descriptor = {
            let session = self.session.read();
            merge(&action.spec, &session, &options)
        };
        tracing::Span::current().record("dbid", descriptor.dbid.as_str());
        let request = wire::encode(&descriptor)?;

        debug!(method = %request.method, url = %request.url, api = descriptor.action, "Sending request");
        self.events.emit(
            EVENT_REQUEST,
            &ClientEvent::Request { action: action.spec.api, dbid: descriptor.dbid.clone() },
        );

        let response = self.transport.execute(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "Received response");
        if !response.is_success() {
            return Err(QuickBaseError::transport(
                Some(response.status),
                format!("HTTP {} from {}", response.status, descriptor.url()),
            ));
        }

        let value = action.translate(response.body)?;

        if let Some(effect) = action.effect {
            let (announce, authenticated) = {
                let mut session = self.session.write();
                let announce = effect(&value, &mut session);
                (announce, session.is_authenticated())
            };
            if announce {
                self.events.emit(EVENT_TICKET, &ClientEvent::TicketChanged { authenticated });
            }
        }

        info!(api = descriptor.action, "QuickBase call succeeded");
        Ok(value)
    }

    // Authentication

    /// Sign in and store the returned ticket in the session.
    ///
    /// The ticket lasts 8 hours unless `hours` is set in `options`.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        options: CallOptions,
    ) -> Result<String> {
        let options = options.param("username", username).param("password", password);
        self.call(&actions::AUTHENTICATE, options).await
    }

    /// Sign out and clear the session ticket.
    pub async fn sign_out(&self, options: CallOptions) -> Result<()> {
        self.call(&actions::SIGN_OUT, options).await
    }

    // Application and table metadata

    pub async fn db_info(&self, options: CallOptions) -> Result<DbInfo> {
        self.call(&actions::DB_INFO, options).await
    }

    /// Find an application id by name.
    pub async fn find_db_by_name(&self, dbname: &str, options: CallOptions) -> Result<String> {
        self.call(&actions::FIND_DB_BY_NAME, options.param("dbname", dbname)).await
    }

    pub async fn ancestor_info(&self, options: CallOptions) -> Result<AncestorInfo> {
        self.call(&actions::ANCESTOR_INFO, options).await
    }

    /// Modification times of an application and its tables.
    ///
    /// Always sent to `main`; the application id comes from
    /// `options.dbid(..)` or the session.
    pub async fn app_dtm_info(&self, options: CallOptions) -> Result<AppDtmInfo> {
        self.call(&actions::APP_DTM_INFO, options).await
    }

    pub async fn schema(&self, options: CallOptions) -> Result<TableSchema> {
        self.call(&actions::SCHEMA, options).await
    }

    pub async fn user_roles(&self, options: CallOptions) -> Result<Vec<UserRoles>> {
        self.call(&actions::USER_ROLES, options).await
    }

    // Application operations

    /// Create an application. Name and description have defaults.
    pub async fn create_database(
        &self,
        name: Option<&str>,
        description: Option<&str>,
        options: CallOptions,
    ) -> Result<CreatedDatabase> {
        let options = options.param_opt("dbname", name).param_opt("dbdesc", description);
        self.call(&actions::CREATE_DATABASE, options).await
    }

    pub async fn delete_database(&self, options: CallOptions) -> Result<()> {
        self.call(&actions::DELETE_DATABASE, options).await
    }

    /// Copy an application, returning the new application id.
    pub async fn clone_database(
        &self,
        name: &str,
        description: &str,
        keep_data: bool,
        options: CallOptions,
    ) -> Result<String> {
        let options = options
            .param("newdbname", name)
            .param("newdbdesc", description)
            .param("keepData", i32::from(keep_data));
        self.call(&actions::CLONE_DATABASE, options).await
    }

    pub async fn rename_app(&self, name: &str, options: CallOptions) -> Result<()> {
        self.call(&actions::RENAME_APP, options.param("newappname", name)).await
    }

    pub async fn get_db_var(&self, name: &str, options: CallOptions) -> Result<String> {
        self.call(&actions::GET_DB_VAR, options.param("varname", name)).await
    }

    pub async fn set_db_var(&self, name: &str, value: &str, options: CallOptions) -> Result<()> {
        let options = options.param("varname", name).param("value", value);
        self.call(&actions::SET_DB_VAR, options).await
    }

    /// Add a page, or replace it when `pageid` is set in `options`.
    pub async fn add_replace_db_page(
        &self,
        name: &str,
        page_type: i64,
        body: &str,
        options: CallOptions,
    ) -> Result<Option<i64>> {
        let options =
            options.param("pagename", name).param("pagetype", page_type).param("pagebody", body);
        self.call(&actions::ADD_REPLACE_DB_PAGE, options).await
    }

    /// Fetch a page by id or name. The body is returned unparsed.
    pub async fn get_db_page(&self, page: &str, options: CallOptions) -> Result<String> {
        self.call(&actions::GET_DB_PAGE, options.param("pageID", page)).await
    }

    pub async fn run_import(&self, import_id: i64, options: CallOptions) -> Result<String> {
        self.call(&actions::RUN_IMPORT, options.param("id", import_id)).await
    }

    /// Import CSV rows. `clist` maps CSV columns to field ids.
    pub async fn import_from_csv(
        &self,
        csv: &str,
        clist: &str,
        options: CallOptions,
    ) -> Result<ImportResult> {
        let options = options.param("records_csv", csv).param("clist", clist);
        self.call(&actions::IMPORT_FROM_CSV, options).await
    }

    // Field operations

    /// Add a field, returning its id. Label and type have defaults.
    pub async fn add_field(
        &self,
        label: Option<&str>,
        field_type: Option<&str>,
        options: CallOptions,
    ) -> Result<Option<i64>> {
        let options = options.param_opt("label", label).param_opt("type", field_type);
        self.call(&actions::ADD_FIELD, options).await
    }

    pub async fn delete_field(&self, fid: i64, options: CallOptions) -> Result<()> {
        self.call(&actions::DELETE_FIELD, options.param("fid", fid)).await
    }

    pub async fn set_key_field(&self, fid: i64, options: CallOptions) -> Result<()> {
        self.call(&actions::SET_KEY_FIELD, options.param("fid", fid)).await
    }

    /// Change field properties given as parameters in `options`.
    pub async fn set_field_properties(&self, fid: i64, options: CallOptions) -> Result<()> {
        self.call(&actions::SET_FIELD_PROPERTIES, options.param("fid", fid)).await
    }

    pub async fn field_add_choices(
        &self,
        fid: i64,
        choices: &[&str],
        options: CallOptions,
    ) -> Result<Option<i64>> {
        let options = options.param("fid", fid).param("choice", choices.to_vec());
        self.call(&actions::FIELD_ADD_CHOICES, options).await
    }

    pub async fn field_remove_choices(
        &self,
        fid: i64,
        choices: &[&str],
        options: CallOptions,
    ) -> Result<Option<i64>> {
        let options = options.param("fid", fid).param("choice", choices.to_vec());
        self.call(&actions::FIELD_REMOVE_CHOICES, options).await
    }

    // Record operations

    /// Add a record from the fields set in `options`.
    pub async fn add_record(&self, options: CallOptions) -> Result<RecordAdded> {
        self.call(&actions::ADD_RECORD, options).await
    }

    pub async fn gen_add_record_form(&self, options: CallOptions) -> Result<String> {
        self.call(&actions::GEN_ADD_RECORD_FORM, options).await
    }

    pub async fn change_record_owner(
        &self,
        rid: i64,
        new_owner: &str,
        options: CallOptions,
    ) -> Result<()> {
        let options = options.param("rid", rid).param("newowner", new_owner);
        self.call(&actions::CHANGE_RECORD_OWNER, options).await
    }

    /// Copy a master record and its details.
    ///
    /// A `dest_rid` of 0 creates a new master record.
    pub async fn copy_master_detail(
        &self,
        dest_rid: i64,
        source_rid: i64,
        options: CallOptions,
    ) -> Result<CopyResult> {
        let options = options.param("destrid", dest_rid).param("sourcerid", source_rid);
        self.call(&actions::COPY_MASTER_DETAIL, options).await
    }

    pub async fn delete_record(&self, rid: i64, options: CallOptions) -> Result<()> {
        self.call(&actions::DELETE_RECORD, options.param("rid", rid)).await
    }

    pub async fn edit_record(&self, rid: i64, options: CallOptions) -> Result<RecordEdited> {
        self.call(&actions::EDIT_RECORD, options.param("rid", rid)).await
    }

    /// Run a query. Criteria go in `options` (`query`, `qid` or `qname`).
    pub async fn do_query(&self, options: CallOptions) -> Result<Vec<QueryRecord>> {
        self.call(&actions::DO_QUERY, options).await
    }

    pub async fn do_query_count(&self, query: &str, options: CallOptions) -> Result<Option<i64>> {
        self.call(&actions::DO_QUERY_COUNT, options.param("query", query)).await
    }

    pub async fn gen_results_table(&self, options: CallOptions) -> Result<String> {
        self.call(&actions::GEN_RESULTS_TABLE, options).await
    }

    pub async fn record_as_html(&self, rid: i64, options: CallOptions) -> Result<String> {
        self.call(&actions::RECORD_AS_HTML, options.param("rid", rid)).await
    }

    pub async fn record_info(&self, rid: i64, options: CallOptions) -> Result<RecordInfo> {
        self.call(&actions::RECORD_INFO, options.param("rid", rid)).await
    }

    pub async fn num_records(&self, options: CallOptions) -> Result<Option<i64>> {
        self.call(&actions::NUM_RECORDS, options).await
    }

    /// Delete every record matching the criteria in `options`.
    pub async fn purge_records(&self, options: CallOptions) -> Result<Option<i64>> {
        self.call(&actions::PURGE_RECORDS, options).await
    }

    // User operations

    pub async fn add_user_to_role(
        &self,
        user_id: &str,
        role_id: i64,
        options: CallOptions,
    ) -> Result<()> {
        let options = options.param("userid", user_id).param("roleid", role_id);
        self.call(&actions::ADD_USER_TO_ROLE, options).await
    }

    /// Move a user to `new_role_id`, or disable access when it is `None`.
    pub async fn change_user_role(
        &self,
        user_id: &str,
        role_id: i64,
        new_role_id: Option<i64>,
        options: CallOptions,
    ) -> Result<()> {
        let options = options
            .param("userid", user_id)
            .param("roleid", role_id)
            .param("newroleid", new_role_id.map_or_else(String::new, |id| id.to_string()));
        self.call(&actions::CHANGE_USER_ROLE, options).await
    }

    pub async fn role_info(&self, options: CallOptions) -> Result<RoleMap> {
        self.call(&actions::ROLE_INFO, options).await
    }

    /// Look a user up by email, or the signed-in user when `None`.
    pub async fn user_info(&self, email: Option<&str>, options: CallOptions) -> Result<UserInfo> {
        self.call(&actions::USER_INFO, options.param_opt("email", email)).await
    }

    pub async fn user_role(&self, user_id: &str, options: CallOptions) -> Result<UserRoles> {
        self.call(&actions::USER_ROLE, options.param("userid", user_id)).await
    }

    /// Provision a new user, returning the user id.
    pub async fn provision_user(
        &self,
        email: &str,
        role_id: i64,
        first_name: &str,
        last_name: &str,
        options: CallOptions,
    ) -> Result<String> {
        let options = options
            .param("email", email)
            .param("roleid", role_id)
            .param("fname", first_name)
            .param("lname", last_name);
        self.call(&actions::PROVISION_USER, options).await
    }

    pub async fn remove_user_from_role(
        &self,
        user_id: &str,
        role_id: i64,
        options: CallOptions,
    ) -> Result<()> {
        let options = options.param("userid", user_id).param("roleid", role_id);
        self.call(&actions::REMOVE_USER_FROM_ROLE, options).await
    }

    pub async fn send_invitation(
        &self,
        user_id: &str,
        text: Option<&str>,
        options: CallOptions,
    ) -> Result<()> {
        let options = options.param("userid", user_id).param_opt("usertext", text);
        self.call(&actions::SEND_INVITATION, options).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use qbase_domain::ErrorCode;
    use serde_json::json;

    use super::*;
    use crate::ports::TransportResponse;
    use crate::registry::HttpMethod;
    use crate::testing::MockTransport;

    fn client(transport: &Arc<MockTransport>) -> QuickBaseClient {
        let client = QuickBaseClient::new(transport.clone());
        client.set_realm("acme").set_dbid("bq8kx4ptm").set_apptoken("app-token");
        client
    }

    #[tokio::test]
    async fn test_add_record_round_trip() {
        let transport = Arc::new(MockTransport::new());
        transport.push_body(
            "<qdbapi><action>API_AddRecord</action><errcode>0</errcode><errtext>No error</errtext>\
             <rid>100</rid><update_id>5</update_id></qdbapi>",
        );
        let client = client(&transport);

        let added = client
            .add_record(CallOptions::new().fields([("35", "Test"), ("36", "1")]))
            .await
            .unwrap();
        assert_eq!(added, RecordAdded { rid: Some(100), update_id: Some(5) });

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://acme.quickbase.com/db/bq8kx4ptm");
        assert_eq!(request.header("QUICKBASE-ACTION"), Some("API_AddRecord"));
        assert_eq!(
            request.body(),
            Some(
                "<qdbapi><apptoken>app-token</apptoken>\
                 <field fid=\"35\">Test</field><field fid=\"36\">1</field></qdbapi>"
            )
        );
    }

    #[tokio::test]
    async fn test_api_error_rejects_call() {
        let transport = Arc::new(MockTransport::new());
        transport.push_body("<qdbapi><errcode>85</errcode><errtext>X</errtext></qdbapi>");
        let client = client(&transport);

        let err = client.db_info(CallOptions::new()).await.unwrap_err();
        assert_eq!(err.api_code(), Some(&ErrorCode::Numeric(85)));
        assert_eq!(err.to_string(), "QuickBase Error 85: X");
    }

    #[tokio::test]
    async fn test_construction_error_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        let err = client
            .do_query(CallOptions::new().param("query", json!({ "nested": true })))
            .await
            .unwrap_err();
        assert!(matches!(err, QuickBaseError::InvalidParameterType { .. }));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(TransportResponse::new(502, "Bad Gateway"));
        let client = client(&transport);

        let err = client.num_records(CallOptions::new()).await.unwrap_err();
        assert!(matches!(err, QuickBaseError::Transport { status: Some(502), .. }));
    }

    #[tokio::test]
    async fn test_authenticate_stores_ticket_and_sign_out_clears_it() {
        let transport = Arc::new(MockTransport::new());
        transport.push_body("<qdbapi><errcode>0</errcode><ticket>T1</ticket></qdbapi>");
        transport.push_body("<qdbapi><errcode>0</errcode></qdbapi>");
        let client = client(&transport);
        let ticket_events = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticket_events);
        client.on(EVENT_TICKET, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let ticket = client.authenticate("user", "pw", CallOptions::new()).await.unwrap();
        assert_eq!(ticket, "T1");
        assert_eq!(client.ticket(), "T1");

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://acme.quickbase.com/db/main");
        assert!(sent.query().iter().all(|(key, _)| key != "apptoken"));
        assert!(sent.query().contains(&("hours".to_string(), "8".to_string())));

        client.sign_out(CallOptions::new()).await.unwrap();
        assert_eq!(client.ticket(), "");
        assert_eq!(ticket_events.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_ticket_event_follows_session_effect() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);
        let states = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let seen = Arc::clone(&states);
        client.on(EVENT_TICKET, move |event| {
            if let ClientEvent::TicketChanged { authenticated } = event {
                seen.lock().push(*authenticated);
            }
        });

        // Signing out without a ticket changes nothing and stays silent.
        client.sign_out(CallOptions::new()).await.unwrap();
        assert!(states.lock().is_empty());

        transport.push_body("<qdbapi><errcode>0</errcode><ticket>T1</ticket></qdbapi>");
        transport.push_body("<qdbapi><errcode>0</errcode><ticket>T1</ticket></qdbapi>");
        client.authenticate("user", "pw", CallOptions::new()).await.unwrap();
        client.authenticate("user", "pw", CallOptions::new()).await.unwrap();
        client.sign_out(CallOptions::new()).await.unwrap();

        assert_eq!(*states.lock(), vec![true, true, false]);
    }

    #[tokio::test]
    async fn test_silent_session_effect_publishes_nothing() {
        #[allow(clippy::ptr_arg)]
        fn remember_dbid(dbid: &String, session: &mut SessionState) -> bool {
            session.set_dbid(dbid.as_str());
            false
        }
        static CLONE_AND_SWITCH: Action<String> = Action::structured(
            crate::registry::ActionSpec::post("clone_and_switch", "API_CloneDatabase"),
            crate::decode::app::new_dbid,
        )
        .with_effect(remember_dbid);

        let transport = Arc::new(MockTransport::new());
        transport.push_body("<qdbapi><errcode>0</errcode><newdbid>bq7copy</newdbid></qdbapi>");
        let client = client(&transport);
        let ticket_events = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticket_events);
        client.on(EVENT_TICKET, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let dbid = client.call(&CLONE_AND_SWITCH, CallOptions::new()).await.unwrap();
        assert_eq!(dbid, "bq7copy");
        assert_eq!(client.dbid(), "bq7copy");
        assert_eq!(ticket_events.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_session_changes_apply_to_later_calls() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.num_records(CallOptions::new()).await.unwrap();
        client.set_ticket("T2").set_dbid("bq9zz");
        client.num_records(CallOptions::new()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://acme.quickbase.com/db/bq8kx4ptm");
        assert!(requests[0].query().iter().all(|(key, _)| key != "ticket"));
        assert_eq!(requests[1].url, "https://acme.quickbase.com/db/bq9zz");
        assert_eq!(requests[1].query()[1], ("ticket".to_string(), "T2".to_string()));
    }

    #[tokio::test]
    async fn test_lifecycle_events() {
        let transport = Arc::new(MockTransport::new());
        transport.push_body("<qdbapi><errcode>0</errcode><num_records>3</num_records></qdbapi>");
        transport.push_body("<qdbapi><errcode>24</errcode><errtext>Invalid</errtext></qdbapi>");
        let client = client(&transport);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        for name in [EVENT_REQUEST, EVENT_SUCCESS, EVENT_FAILURE] {
            let seen = Arc::clone(&seen);
            client.on(name, move |event| seen.lock().push(event.clone()));
        }

        assert_eq!(client.num_records(CallOptions::new()).await.unwrap(), Some(3));
        assert!(client.num_records(CallOptions::new()).await.is_err());

        let seen = seen.lock();
        assert_eq!(seen.len(), 4);
        assert_eq!(
            seen[0],
            ClientEvent::Request { action: "API_GetNumRecords", dbid: "bq8kx4ptm".into() }
        );
        assert_eq!(seen[1], ClientEvent::Success { action: "API_GetNumRecords" });
        assert!(matches!(seen[3], ClientEvent::Failure { action: "API_GetNumRecords", .. }));
    }

    #[tokio::test]
    async fn test_custom_events() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);
        assert!(!client.emit("custom", json!({ "n": 1 })));

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = client.once("custom", move |event| {
            assert_eq!(event, &ClientEvent::Custom(json!({ "n": 1 })));
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(client.emit("custom", json!({ "n": 1 })));
        assert!(!client.off("custom", id));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "QuickBase Error 85: X")]
    async fn test_generic_error_handler_panics() {
        let transport = Arc::new(MockTransport::new());
        transport.push_body("<qdbapi><errcode>85</errcode><errtext>X</errtext></qdbapi>");
        let client = client(&transport).with_error_handler(qbase_domain::generic_error_handler);
        let _ = client.schema(CallOptions::new()).await;
    }

    #[tokio::test]
    async fn test_raw_action_returns_body_unparsed() {
        let transport = Arc::new(MockTransport::new());
        transport.push_body("<html><body>not xml <br></body></html>");
        let client = client(&transport);

        let page = client.get_db_page("3", CallOptions::new()).await.unwrap();
        assert_eq!(page, "<html><body>not xml <br></body></html>");
        let request = transport.last_request().unwrap();
        assert_eq!(request.query()[0], ("act".to_string(), "API_GetDBPage".to_string()));
        assert!(request.query().contains(&("pageID".to_string(), "3".to_string())));
    }

    #[tokio::test]
    async fn test_field_choices_repeat_choice_element() {
        let transport = Arc::new(MockTransport::new());
        transport.push_body("<qdbapi><errcode>0</errcode><numadded>2</numadded></qdbapi>");
        let client = client(&transport);

        let added = client.field_add_choices(11, &["Red", "Blue"], CallOptions::new()).await.unwrap();
        assert_eq!(added, Some(2));
        assert_eq!(
            transport.last_request().unwrap().body(),
            Some(
                "<qdbapi><apptoken>app-token</apptoken><fid>11</fid>\
                 <choice>Red</choice><choice>Blue</choice></qdbapi>"
            )
        );
    }

    #[tokio::test]
    async fn test_app_dtm_info_targets_main() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.app_dtm_info(CallOptions::new()).await.unwrap();
        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://acme.quickbase.com/db/main");
        assert!(request.query().contains(&("dbid".to_string(), "bq8kx4ptm".to_string())));
    }
}
