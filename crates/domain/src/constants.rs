//! Protocol constants
//!
//! Values fixed by the QuickBase legacy API or by the client's defaults.

/// Version of this client, reported in the default user agent.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved database id addressing account-level operations.
pub const ROOT_DBID: &str = "main";

/// Realm used when none is configured.
pub const DEFAULT_REALM: &str = "https://www.quickbase.com";

/// Domain appended to a bare realm subdomain (`acme` -> `https://acme.quickbase.com`).
pub const REALM_DOMAIN: &str = "quickbase.com";

/// Header carrying the API action on XML POST requests.
pub const ACTION_HEADER: &str = "QUICKBASE-ACTION";

/// Query parameter carrying the API action on GET requests.
pub const ACTION_QUERY_KEY: &str = "act";

/// Root element of every XML request body.
pub const REQUEST_ROOT: &str = "qdbapi";

/// Ticket lifetime requested by `authenticate` when the caller gives none.
pub const DEFAULT_TICKET_HOURS: i64 = 8;

/// Default timeout for the HTTP transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Lifecycle event names emitted by the client
pub const EVENT_REQUEST: &str = "request";
pub const EVENT_SUCCESS: &str = "success";
pub const EVENT_FAILURE: &str = "failure";
pub const EVENT_TICKET: &str = "ticket";
