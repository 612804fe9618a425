//! Integration tests for the HTTP transport against a mock QuickBase server
//!
//! **Coverage:**
//! - POST actions: XML body, `QUICKBASE-ACTION` header, decoded result
//! - GET actions: query string order, ticket handling
//! - API errors embedded in HTTP 200 responses
//! - Non-2xx statuses and unreachable hosts as transport errors
//! - Raw actions returning the body unmodified

use qbase_core::CallOptions;
use qbase_domain::{ClientConfig, ErrorCode, ErrorKind, QuickBaseError};
use qbase_infra::connect;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/xml")
        .set_body_string(format!("<?xml version=\"1.0\" ?>\n<qdbapi>{body}</qdbapi>"))
}

fn client_for(server: &MockServer) -> qbase_core::QuickBaseClient {
    let config = ClientConfig {
        realm: server.uri(),
        dbid: "bq8kx4ptm".into(),
        apptoken: "app-token".into(),
        ..ClientConfig::default()
    };
    connect(&config).expect("client")
}

#[tokio::test]
async fn add_record_posts_xml_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/db/bq8kx4ptm"))
        .and(header("QUICKBASE-ACTION", "API_AddRecord"))
        .and(header("content-type", "application/xml"))
        .and(body_string(
            "<qdbapi><apptoken>app-token</apptoken>\
             <field fid=\"35\">Test</field><field fid=\"36\">1</field></qdbapi>",
        ))
        .respond_with(xml(
            "<action>API_AddRecord</action><errcode>0</errcode><errtext>No error</errtext>\
             <rid>100</rid><update_id>5</update_id>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let added = client
        .add_record(CallOptions::new().fields([("35", "Test"), ("36", "1")]))
        .await
        .expect("record added");

    assert_eq!(added.rid, Some(100));
    assert_eq!(added.update_id, Some(5));
}

#[tokio::test]
async fn authenticate_uses_query_string_and_stores_ticket() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/db/main"))
        .and(query_param("act", "API_Authenticate"))
        .and(query_param("username", "ada@example.com"))
        .and(query_param("password", "p&ss word"))
        .and(query_param("hours", "8"))
        .respond_with(xml(
            "<action>API_Authenticate</action><errcode>0</errcode><errtext>No error</errtext>\
             <ticket>2_beeinrxmv_dpvx_b_crf8ttndjwyf9bui94rhciirqcs</ticket>\
             <userid>112245.efy7</userid>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ticket = client
        .authenticate("ada@example.com", "p&ss word", CallOptions::new())
        .await
        .expect("ticket");

    assert_eq!(ticket, "2_beeinrxmv_dpvx_b_crf8ttndjwyf9bui94rhciirqcs");
    assert_eq!(client.ticket(), ticket);

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.starts_with("act=API_Authenticate"), "unexpected query: {query}");
    assert!(!query.contains("apptoken"));
}

#[tokio::test]
async fn embedded_error_code_rejects_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("act", "API_GetSchema"))
        .respond_with(xml(
            "<action>API_GetSchema</action><errcode>24</errcode>\
             <errtext>Invalid Application Token</errtext>",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.schema(CallOptions::new()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.api_code(), Some(&ErrorCode::Numeric(24)));
    assert_eq!(err.to_string(), "QuickBase Error 24: Invalid Application Token");
}

#[tokio::test]
async fn http_error_status_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.db_info(CallOptions::new()).await.unwrap_err();

    assert!(matches!(err, QuickBaseError::Transport { status: Some(503), .. }));
}

#[tokio::test]
async fn unreachable_realm_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig { realm: format!("http://{addr}"), ..ClientConfig::default() };
    let client = connect(&config).expect("client");
    let err = client.num_records(CallOptions::new()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn raw_action_returns_body_verbatim() {
    let server = MockServer::start().await;
    let page = "<html><body><h1>Dashboard</h1><br></body></html>";
    Mock::given(method("GET"))
        .and(query_param("act", "API_GetDBPage"))
        .and(query_param("pageID", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client.get_db_page("6", CallOptions::new()).await.expect("page");
    assert_eq!(body, page);
}

#[tokio::test]
async fn construction_error_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(xml("<errcode>0</errcode>")).expect(0).mount(&server).await;

    let client = client_for(&server);
    let err = client
        .edit_record(3, CallOptions::new().field("6", serde_json::json!({ "bad": true })))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Construction);
}
