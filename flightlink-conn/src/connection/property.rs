//! Recognized connection properties and caller-supplied property sets.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Lowercased property name to property.
static LOOKUP: LazyLock<HashMap<String, ConnectionProperty>> = LazyLock::new(|| {
    ConnectionProperty::ALL
        .iter()
        .map(|p| (p.name().to_ascii_lowercase(), *p))
        .collect()
});

/// A connection property understood by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum ConnectionProperty {
    /// Server host.
    Host,
    /// Server port.
    Port,
    /// User name for basic authentication.
    User,
    /// Password for basic authentication.
    Password,
    /// Whether to connect over TLS.
    UseEncryption,
    /// Skip server certificate verification.
    DisableCertificateVerification,
    /// Path to a key store holding trusted certificates.
    TrustStore,
    /// Password of the trust store.
    TrustStorePassword,
    /// Trust the operating system's certificate store.
    UseSystemTrustStore,
    /// Path to PEM-encoded root certificates.
    TlsRootCerts,
    /// Path to a PEM-encoded client certificate for mutual TLS.
    ClientCertificate,
    /// Path to the private key of the client certificate.
    ClientKey,
    /// Size of the client's executor pool.
    ThreadPoolSize,
    /// Bearer token, used instead of user and password.
    Token,
    /// Keep cookies sent by the server between calls.
    RetainCookies,
    /// Reuse the authentication token for subsequent calls.
    RetainAuth,
    /// Default catalog for the session.
    Catalog,
}

impl ConnectionProperty {
    /// Every recognized property.
    pub const ALL: [Self; 17] = [
        Self::Host,
        Self::Port,
        Self::User,
        Self::Password,
        Self::UseEncryption,
        Self::DisableCertificateVerification,
        Self::TrustStore,
        Self::TrustStorePassword,
        Self::UseSystemTrustStore,
        Self::TlsRootCerts,
        Self::ClientCertificate,
        Self::ClientKey,
        Self::ThreadPoolSize,
        Self::Token,
        Self::RetainCookies,
        Self::RetainAuth,
        Self::Catalog,
    ];

    /// Get the canonical (camelCase) property name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Port => "port",
            Self::User => "user",
            Self::Password => "password",
            Self::UseEncryption => "useEncryption",
            Self::DisableCertificateVerification => "disableCertificateVerification",
            Self::TrustStore => "trustStore",
            Self::TrustStorePassword => "trustStorePassword",
            Self::UseSystemTrustStore => "useSystemTrustStore",
            Self::TlsRootCerts => "tlsRootCerts",
            Self::ClientCertificate => "clientCertificate",
            Self::ClientKey => "clientKey",
            Self::ThreadPoolSize => "threadPoolSize",
            Self::Token => "token",
            Self::RetainCookies => "retainCookies",
            Self::RetainAuth => "retainAuth",
            Self::Catalog => "catalog",
        }
    }

    /// Get the value used when the property is not set.
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            Self::UseEncryption => Some("true"),
            Self::DisableCertificateVerification => Some("false"),
            Self::UseSystemTrustStore => Some("true"),
            Self::ThreadPoolSize => Some("1"),
            Self::RetainCookies => Some("true"),
            Self::RetainAuth => Some("true"),
            _ => None,
        }
    }

    /// Host and port live in the URL authority.
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Host | Self::Port)
    }

    /// Values that must never be logged or printed.
    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            Self::Password | Self::Token | Self::TrustStorePassword
        )
    }

    /// Look up a property by name, ignoring case.
    ///
    /// ```rust
    /// use flightlink_conn::connection::ConnectionProperty;
    ///
    /// assert_eq!(ConnectionProperty::from_key("HOST"), Some(ConnectionProperty::Host));
    /// assert_eq!(
    ///     ConnectionProperty::from_key("useencryption"),
    ///     Some(ConnectionProperty::UseEncryption)
    /// );
    /// assert_eq!(ConnectionProperty::from_key("application"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        LOOKUP.get(key.to_ascii_lowercase().as_str()).copied()
    }
}

impl fmt::Display for ConnectionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<ConnectionProperty> for &'static str {
    fn from(p: ConnectionProperty) -> Self {
        p.name()
    }
}

/// An ordered set of string properties supplied alongside a URL.
///
/// Keys are stored as given. Lookups through [`Properties::get_property`]
/// ignore case for recognized properties.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Properties {
    entries: IndexMap<String, String>,
}

impl Properties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Insert a property, returning the previous value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get a property by exact key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Get a recognized property, matching its key in any casing.
    pub fn get_property(&self, property: ConnectionProperty) -> Option<&str> {
        self.get(property.name()).or_else(|| {
            self.entries
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(property.name()))
                .map(|(_, v)| v.as_str())
        })
    }

    /// Remove a property by exact key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| {
                let secret = ConnectionProperty::from_key(k).is_some_and(|p| p.is_secret());
                (k.as_str(), if secret { "***" } else { v.as_str() })
            }))
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        props.extend(iter);
        props
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Properties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.entries.insert(k.into(), v.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_round_trip_through_lookup() {
        for property in ConnectionProperty::ALL {
            assert_eq!(ConnectionProperty::from_key(property.name()), Some(property));
            assert_eq!(
                ConnectionProperty::from_key(&property.name().to_uppercase()),
                Some(property)
            );
        }
    }

    #[test]
    fn test_reserved_and_secret() {
        assert!(ConnectionProperty::Host.is_reserved());
        assert!(ConnectionProperty::Port.is_reserved());
        assert!(!ConnectionProperty::User.is_reserved());
        assert!(ConnectionProperty::Password.is_secret());
        assert!(ConnectionProperty::Token.is_secret());
        assert!(!ConnectionProperty::User.is_secret());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ConnectionProperty::UseEncryption.default_value(), Some("true"));
        assert_eq!(ConnectionProperty::ThreadPoolSize.default_value(), Some("1"));
        assert_eq!(ConnectionProperty::Host.default_value(), None);
    }

    #[test]
    fn test_properties_builder() {
        let props = Properties::new().set("user", "admin").set("password", "pw");
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("user"), Some("admin"));
        assert_eq!(props.get("USER"), None);
    }

    #[test]
    fn test_get_property_ignores_case() {
        let props = Properties::new().set("UseEncryption", "false");
        assert_eq!(props.get_property(ConnectionProperty::UseEncryption), Some("false"));
        assert_eq!(props.get_property(ConnectionProperty::User), None);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut props: Properties = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(props.remove("b"), Some("2".to_string()));
        let keys: Vec<_> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let props = Properties::new()
            .set("user", "admin")
            .set("Password", "hunter2")
            .set("token", "abc");
        let debug = format!("{:?}", props);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("abc"));
    }
}
