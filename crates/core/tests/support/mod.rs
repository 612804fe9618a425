//! Shared fixtures for `qbase-core` integration tests.

use std::sync::Arc;

use qbase_core::testing::MockTransport;
use qbase_core::QuickBaseClient;

/// Route `tracing` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Client over a fresh mock transport, pointed at the `acme` realm.
pub fn client_with_mock() -> (QuickBaseClient, Arc<MockTransport>) {
    init_tracing();
    let transport = Arc::new(MockTransport::new());
    let client = QuickBaseClient::new(transport.clone());
    client.set_realm("acme").set_dbid("bq8kx4ptm").set_apptoken("app-token");
    (client, transport)
}

/// Success envelope around `inner`.
pub fn ok_envelope(action: &str, inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\" ?><qdbapi><action>{action}</action><errcode>0</errcode>\
         <errtext>No error</errtext>{inner}</qdbapi>"
    )
}
