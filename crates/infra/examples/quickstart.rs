//! Example: signing in and reading a table
//!
//! Reads the client configuration from the environment (or a
//! `quickbase.toml` file), authenticates, prints the table schema and the
//! first records, then signs out.
//!
//! ```bash
//! export QUICKBASE_REALM=acme
//! export QUICKBASE_DBID=bq8kx4ptm
//! export QUICKBASE_APPTOKEN=...
//! export QUICKBASE_USERNAME=ada@example.com
//! export QUICKBASE_PASSWORD=...
//! cargo run -p qbase-infra --example quickstart
//! ```

use qbase_core::CallOptions;
use qbase_domain::constants::{EVENT_FAILURE, EVENT_TICKET};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("qbase=debug,info").init();

    let client = qbase_infra::connect_from_env()?;
    client.on(EVENT_TICKET, |event| tracing::info!(?event, "ticket changed"));
    client.on(EVENT_FAILURE, |event| tracing::warn!(?event, "call failed"));

    let username = std::env::var("QUICKBASE_USERNAME")?;
    let password = std::env::var("QUICKBASE_PASSWORD")?;
    client.authenticate(&username, &password, CallOptions::new()).await?;

    let schema = client.schema(CallOptions::new()).await?;
    println!("{} ({} fields, {} saved queries)", schema.name, schema.fields.len(), schema.queries.len());

    let records = client.do_query(CallOptions::new().param("options", "num-5")).await?;
    for record in records {
        println!("#{:?}: {:?}", record.rid, record.fields);
    }

    client.sign_out(CallOptions::new()).await?;
    Ok(())
}
