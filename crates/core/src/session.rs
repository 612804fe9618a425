//! Session state shared by every call of one client
//!
//! Holds the four values that supply defaults to each call: target database
//! id, application token, realm base URL and authentication ticket.

use qbase_domain::constants::{DEFAULT_REALM, REALM_DOMAIN, ROOT_DBID};
use qbase_domain::ClientConfig;
use serde::{Deserialize, Serialize};

/// Session defaults for one client instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    dbid: String,
    apptoken: String,
    realm: String,
    ticket: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            dbid: ROOT_DBID.to_string(),
            apptoken: String::new(),
            realm: DEFAULT_REALM.to_string(),
            ticket: String::new(),
        }
    }
}

impl From<&ClientConfig> for SessionState {
    fn from(config: &ClientConfig) -> Self {
        Self {
            dbid: config.dbid.clone(),
            apptoken: config.apptoken.clone(),
            realm: normalize_realm(&config.realm),
            ticket: config.ticket.clone(),
        }
    }
}

impl SessionState {
    /// Create a session with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dbid(&self) -> &str {
        &self.dbid
    }

    pub fn apptoken(&self) -> &str {
        &self.apptoken
    }

    /// Absolute base URL, never a bare subdomain.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn ticket(&self) -> &str {
        &self.ticket
    }

    pub fn set_dbid(&mut self, dbid: impl Into<String>) -> &mut Self {
        self.dbid = dbid.into();
        self
    }

    pub fn set_apptoken(&mut self, apptoken: impl Into<String>) -> &mut Self {
        self.apptoken = apptoken.into();
        self
    }

    /// Set the realm, expanding a bare subdomain to its QuickBase URL.
    ///
    /// See [`normalize_realm`].
    pub fn set_realm(&mut self, realm: &str) -> &mut Self {
        self.realm = normalize_realm(realm);
        self
    }

    pub fn set_ticket(&mut self, ticket: impl Into<String>) -> &mut Self {
        self.ticket = ticket.into();
        self
    }

    /// Clear the ticket after sign-out.
    pub fn clear_ticket(&mut self) -> &mut Self {
        self.ticket.clear();
        self
    }

    /// Whether a ticket is currently held.
    pub fn is_authenticated(&self) -> bool {
        !self.ticket.is_empty()
    }
}

/// Turn a realm setting into an absolute base URL.
///
/// Values containing `://` are kept as given; anything else is treated as a
/// subdomain of `quickbase.com` served over HTTPS.
///
/// # Examples
///
/// ```
/// use qbase_core::session::normalize_realm;
///
/// assert_eq!(normalize_realm("acme"), "https://acme.quickbase.com");
/// assert_eq!(normalize_realm("http://localhost:8080"), "http://localhost:8080");
/// ```
pub fn normalize_realm(realm: &str) -> String {
    if realm.contains("://") {
        realm.to_string()
    } else {
        format!("https://{realm}.{REALM_DOMAIN}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let session = SessionState::new();
        assert_eq!(session.dbid(), "main");
        assert_eq!(session.apptoken(), "");
        assert_eq!(session.realm(), "https://www.quickbase.com");
        assert_eq!(session.ticket(), "");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_realm_normalization() {
        let mut session = SessionState::new();
        session.set_realm("acme");
        assert_eq!(session.realm(), "https://acme.quickbase.com");

        session.set_realm("https://acme.quickbase.com");
        assert_eq!(session.realm(), "https://acme.quickbase.com");

        session.set_realm("http://127.0.0.1:9000");
        assert_eq!(session.realm(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_setters_chain() {
        let mut session = SessionState::new();
        session.set_dbid("bdb5rjd6h").set_apptoken("token").set_ticket("tkt");
        assert_eq!(session.dbid(), "bdb5rjd6h");
        assert_eq!(session.apptoken(), "token");
        assert!(session.is_authenticated());

        session.clear_ticket();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_from_config_normalizes_realm() {
        let config = ClientConfig { realm: "acme".into(), ..ClientConfig::default() };
        let session = SessionState::from(&config);
        assert_eq!(session.realm(), "https://acme.quickbase.com");
        assert_eq!(session.dbid(), "main");
    }
}
