//! Validated Flight SQL connection configuration.

use super::parser::encode_component;
use super::{ConnectionError, ConnectionProperty, ConnectionResult, FlightScheme, Properties, UrlArgs};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// The URL shape reported when the host or port is missing.
pub const EXPECTED_URL_FORMAT: &str =
    "jdbc:arrow-flight-sql://<host>:<port>[/?param1=value1&param2=value2&(...)]";

/// A value that is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Get the underlying value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}

/// How the client authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Auth {
    /// No credentials.
    None,
    /// User name and optional password.
    Basic {
        /// User name.
        user: String,
        /// Password.
        password: Option<Secret>,
    },
    /// Bearer token.
    Token {
        /// Token value.
        token: Secret,
    },
}

impl Auth {
    /// Get the authentication method name.
    pub fn method(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Token { .. } => "token",
        }
    }

    /// Get the user name, for basic authentication.
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::Basic { user, .. } => Some(user),
            _ => None,
        }
    }
}

/// TLS settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TlsOptions {
    /// Connect over TLS.
    pub enabled: bool,
    /// Verify the server certificate.
    pub verify_certificates: bool,
    /// Trust store path.
    pub trust_store: Option<String>,
    /// Trust store password.
    pub trust_store_password: Option<Secret>,
    /// Trust the system certificate store.
    pub use_system_trust_store: bool,
    /// PEM root certificates path.
    pub root_certs: Option<String>,
    /// Client certificate path (mutual TLS).
    pub client_certificate: Option<String>,
    /// Client key path (mutual TLS).
    pub client_key: Option<String>,
}

impl TlsOptions {
    fn has_custom_material(&self) -> bool {
        self.trust_store.is_some()
            || self.root_certs.is_some()
            || self.client_certificate.is_some()
            || self.client_key.is_some()
    }
}

/// A validated connection configuration.
///
/// Built from URL arguments plus caller properties; URL arguments take
/// precedence. Recognized keys match in any casing, anything else is kept in
/// [`session_properties`](Self::session_properties).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightConnectionConfig {
    scheme: FlightScheme,
    host: String,
    port: u16,
    auth: Auth,
    tls: TlsOptions,
    thread_pool_size: u32,
    retain_cookies: bool,
    retain_auth: bool,
    catalog: Option<String>,
    session_properties: IndexMap<String, String>,
    warnings: Vec<String>,
}

impl FlightConnectionConfig {
    /// Resolve a configuration from parsed URL arguments and caller properties.
    ///
    /// # Errors
    ///
    /// - [`ConnectionError::MissingField`] when no host, or no numeric port, is given.
    /// - [`ConnectionError::InvalidOption`] for an out-of-range port, a
    ///   non-boolean flag, or a non-positive `threadPoolSize`.
    pub fn from_url_args(args: &UrlArgs, props: &Properties) -> ConnectionResult<Self> {
        let url_props = args.to_properties();
        let mut resolved = Resolved::default();

        for (key, value) in props.iter().chain(url_props.iter()) {
            match ConnectionProperty::from_key(key) {
                // an empty authority field does not hide a caller-supplied one
                Some(p) if p.is_reserved() && value.is_empty() => {}
                Some(p) => {
                    resolved.known.insert(p, value.to_string());
                }
                None => {
                    resolved
                        .session
                        .insert(key.to_string(), value.to_string());
                }
            }
        }

        let config = resolved.build(args.scheme())?;
        debug!(
            host = %config.host,
            port = config.port,
            auth = config.auth.method(),
            tls = config.tls.enabled,
            session_properties = config.session_properties.len(),
            "Connection configuration resolved"
        );
        Ok(config)
    }

    /// Get the scheme of the originating URL.
    pub fn scheme(&self) -> FlightScheme {
        self.scheme
    }

    /// Get the host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the authentication settings.
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Get the TLS settings.
    pub fn tls(&self) -> &TlsOptions {
        &self.tls
    }

    /// Get the client executor pool size.
    pub fn thread_pool_size(&self) -> u32 {
        self.thread_pool_size
    }

    /// Whether server cookies are kept between calls.
    pub fn retain_cookies(&self) -> bool {
        self.retain_cookies
    }

    /// Whether the authentication token is reused.
    pub fn retain_auth(&self) -> bool {
        self.retain_auth
    }

    /// Get the default catalog.
    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    /// Get properties the driver does not recognize, forwarded verbatim.
    pub fn session_properties(&self) -> &IndexMap<String, String> {
        &self.session_properties
    }

    /// Get warnings about settings that have no effect or weaken security.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get `host:port`, bracketing bare IPv6 hosts.
    pub fn authority(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Get the Flight location URI of the server.
    pub fn location(&self) -> String {
        let scheme = if self.tls.enabled { "grpc+tls" } else { "grpc+tcp" };
        format!("{}://{}", scheme, self.authority())
    }

    /// Convert back to a connection URL.
    ///
    /// Only settings that differ from their defaults are written, and secrets
    /// are left out.
    pub fn to_url(&self) -> String {
        let mut url = format!("{}{}", self.scheme.prefix(), self.authority());

        let params: Vec<_> = self
            .settings()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .chain(self.session_properties.iter().map(|(k, v)| (k.clone(), v.clone())))
            .map(|(k, v)| format!("{}={}", encode_component(&k), encode_component(&v)))
            .collect();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        url
    }

    fn settings(&self) -> Vec<(ConnectionProperty, String)> {
        let mut settings = Vec::new();
        if let Some(user) = self.auth.user() {
            settings.push((ConnectionProperty::User, user.to_string()));
        }
        if !self.tls.enabled {
            settings.push((ConnectionProperty::UseEncryption, "false".to_string()));
        }
        if !self.tls.verify_certificates {
            settings.push((
                ConnectionProperty::DisableCertificateVerification,
                "true".to_string(),
            ));
        }
        if !self.tls.use_system_trust_store {
            settings.push((ConnectionProperty::UseSystemTrustStore, "false".to_string()));
        }
        for (property, value) in [
            (ConnectionProperty::TrustStore, &self.tls.trust_store),
            (ConnectionProperty::TlsRootCerts, &self.tls.root_certs),
            (ConnectionProperty::ClientCertificate, &self.tls.client_certificate),
            (ConnectionProperty::ClientKey, &self.tls.client_key),
            (ConnectionProperty::Catalog, &self.catalog),
        ] {
            if let Some(value) = value {
                settings.push((property, value.clone()));
            }
        }
        if self.thread_pool_size != 1 {
            settings.push((
                ConnectionProperty::ThreadPoolSize,
                self.thread_pool_size.to_string(),
            ));
        }
        if !self.retain_cookies {
            settings.push((ConnectionProperty::RetainCookies, "false".to_string()));
        }
        if !self.retain_auth {
            settings.push((ConnectionProperty::RetainAuth, "false".to_string()));
        }
        settings
    }
}

impl fmt::Display for FlightConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location())?;
        match &self.auth {
            Auth::Basic { user, .. } => write!(f, " (user {})", user),
            Auth::Token { .. } => write!(f, " (token)"),
            Auth::None => Ok(()),
        }
    }
}

/// Merged property values, before validation.
#[derive(Default)]
struct Resolved {
    known: HashMap<ConnectionProperty, String>,
    session: IndexMap<String, String>,
}

impl Resolved {
    fn build(mut self, scheme: FlightScheme) -> ConnectionResult<FlightConnectionConfig> {
        let port_token = self.take(ConnectionProperty::Port).unwrap_or_default();
        // `32010:localhost`: the authority holds no host, only a port and junk
        let port_is_junk = !port_token.is_empty() && !is_decimal(&port_token);
        let host = self
            .take(ConnectionProperty::Host)
            .filter(|h| !h.is_empty() && !port_is_junk)
            .ok_or_else(|| ConnectionError::missing("host"))?;
        let port = parse_port(&port_token)?;

        let user = self.take(ConnectionProperty::User);
        let password = self.take(ConnectionProperty::Password);
        let token = self.take(ConnectionProperty::Token).filter(|t| !t.is_empty());

        let mut warnings = Vec::new();
        let auth = match (token, user) {
            (Some(token), user) => {
                if user.is_some() {
                    warnings.push("token is set; user and password are ignored".to_string());
                }
                Auth::Token {
                    token: Secret(token),
                }
            }
            (None, Some(user)) => Auth::Basic {
                user,
                password: password.map(Secret),
            },
            (None, None) => {
                if password.is_some() {
                    warnings.push("password is set without a user and is ignored".to_string());
                }
                Auth::None
            }
        };

        let tls = TlsOptions {
            enabled: self.flag(ConnectionProperty::UseEncryption)?,
            verify_certificates: !self.flag(ConnectionProperty::DisableCertificateVerification)?,
            trust_store: self.take(ConnectionProperty::TrustStore),
            trust_store_password: self.take(ConnectionProperty::TrustStorePassword).map(Secret),
            use_system_trust_store: self.flag(ConnectionProperty::UseSystemTrustStore)?,
            root_certs: self.take(ConnectionProperty::TlsRootCerts),
            client_certificate: self.take(ConnectionProperty::ClientCertificate),
            client_key: self.take(ConnectionProperty::ClientKey),
        };
        if !tls.enabled && (tls.has_custom_material() || !tls.verify_certificates) {
            warnings.push("TLS options are ignored because useEncryption is false".to_string());
        }
        if tls.enabled && !tls.verify_certificates {
            warnings.push("server certificate verification is disabled".to_string());
        }
        if tls.client_certificate.is_some() != tls.client_key.is_some() {
            warnings.push(
                "clientCertificate and clientKey must be set together for mutual TLS".to_string(),
            );
        }

        let thread_pool_size = self.thread_pool_size()?;
        let retain_cookies = self.flag(ConnectionProperty::RetainCookies)?;
        let retain_auth = self.flag(ConnectionProperty::RetainAuth)?;
        let catalog = self.take(ConnectionProperty::Catalog);

        Ok(FlightConnectionConfig {
            scheme,
            host,
            port,
            auth,
            tls,
            thread_pool_size,
            retain_cookies,
            retain_auth,
            catalog,
            session_properties: self.session,
            warnings,
        })
    }

    fn take(&mut self, property: ConnectionProperty) -> Option<String> {
        self.known.remove(&property)
    }

    fn value_or_default(&mut self, property: ConnectionProperty) -> Option<String> {
        self.take(property)
            .or_else(|| property.default_value().map(String::from))
    }

    fn flag(&mut self, property: ConnectionProperty) -> ConnectionResult<bool> {
        let value = self.value_or_default(property).unwrap_or_default();
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConnectionError::invalid_option(
                property.name(),
                format!("expected true or false, got '{}'", value),
            ))
        }
    }

    fn thread_pool_size(&mut self) -> ConnectionResult<u32> {
        let property = ConnectionProperty::ThreadPoolSize;
        let value = self.value_or_default(property).unwrap_or_default();
        match value.parse::<u32>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(ConnectionError::invalid_option(
                property.name(),
                format!("expected a positive integer, got '{}'", value),
            )),
        }
    }
}

fn is_decimal(token: &str) -> bool {
    token.bytes().all(|b| b.is_ascii_digit())
}

/// An empty token is a missing port; callers have already ruled out junk.
fn parse_port(token: &str) -> ConnectionResult<u16> {
    if token.is_empty() {
        return Err(ConnectionError::missing("port"));
    }
    token.parse::<u16>().map_err(|_| {
        ConnectionError::invalid_option("port", format!("{} is not a valid port number", token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::parse_url_args;
    use pretty_assertions::assert_eq;

    fn resolve(url: &str, props: &Properties) -> ConnectionResult<FlightConnectionConfig> {
        let args = parse_url_args(url).unwrap().expect("recognized scheme");
        FlightConnectionConfig::from_url_args(&args, props)
    }

    #[test]
    fn test_defaults() {
        let config = resolve("jdbc:arrow-flight-sql://localhost:32010", &Properties::new()).unwrap();
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 32010);
        assert_eq!(config.auth(), &Auth::None);
        assert!(config.tls().enabled);
        assert!(config.tls().verify_certificates);
        assert!(config.tls().use_system_trust_store);
        assert_eq!(config.thread_pool_size(), 1);
        assert!(config.retain_cookies());
        assert!(config.retain_auth());
        assert!(config.warnings().is_empty());
        assert_eq!(config.location(), "grpc+tls://localhost:32010");
    }

    #[test]
    fn test_missing_host() {
        let err = resolve("jdbc:arrow-flight://:2222", &Properties::new()).unwrap_err();
        assert_eq!(err, ConnectionError::missing("host"));
        assert!(err.to_string().starts_with("URL must have a host"));
    }

    #[test]
    fn test_missing_port() {
        let err = resolve("jdbc:arrow-flight://localhost", &Properties::new()).unwrap_err();
        assert_eq!(err, ConnectionError::missing("port"));
        assert!(err.to_string().starts_with("URL must have a port"));
        assert!(err.to_string().contains(EXPECTED_URL_FORMAT));
    }

    #[test]
    fn test_non_numeric_port_means_no_host() {
        for url in [
            "jdbc:arrow-flight://32010:localhost",
            "jdbc:arrow-flight-sql://32010:localhost",
            "jdbc:arrow-flight://localhost:abc",
        ] {
            let err = resolve(url, &Properties::new()).unwrap_err();
            assert_eq!(err, ConnectionError::missing("host"));
            assert!(err.to_string().starts_with("URL must have a host"));
        }
    }

    #[test]
    fn test_caller_host_does_not_rescue_junk_port() {
        let props = Properties::new().set("host", "db.internal");
        let err = resolve("jdbc:arrow-flight://32010:localhost", &props).unwrap_err();
        assert_eq!(err, ConnectionError::missing("host"));
    }

    #[test]
    fn test_port_out_of_range() {
        let err = resolve("jdbc:arrow-flight://localhost:70000", &Properties::new()).unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidOption { ref key, .. } if key == "port"));
    }

    #[test]
    fn test_caller_properties_fill_empty_authority() {
        let props = Properties::new().set("host", "db.internal");
        let config = resolve("jdbc:arrow-flight://:2222", &props).unwrap();
        assert_eq!(config.host(), "db.internal");
    }

    #[test]
    fn test_url_overrides_properties() {
        let props = Properties::new()
            .set("useEncryption", "true")
            .set("user", "props-user");
        let config = resolve(
            "jdbc:arrow-flight://localhost:2222?useEncryption=false&user=url-user",
            &props,
        )
        .unwrap();
        assert!(!config.tls().enabled);
        assert_eq!(config.auth().user(), Some("url-user"));
    }

    #[test]
    fn test_recognized_keys_ignore_case() {
        let props = Properties::new().set("USER", "admin").set("PassWord", "pw");
        let config = resolve("jdbc:arrow-flight://localhost:2222?USEENCRYPTION=FALSE", &props).unwrap();
        assert!(!config.tls().enabled);
        assert_eq!(
            config.auth(),
            &Auth::Basic {
                user: "admin".into(),
                password: Some(Secret("pw".into())),
            }
        );
    }

    #[test]
    fn test_token_beats_basic() {
        let props = Properties::new()
            .set("user", "admin")
            .set("password", "pw")
            .set("token", "t0k3n");
        let config = resolve("jdbc:arrow-flight://localhost:2222", &props).unwrap();
        assert_eq!(config.auth().method(), "token");
        assert_eq!(config.warnings().len(), 1);
    }

    #[test]
    fn test_unknown_keys_become_session_properties() {
        let config = resolve(
            "jdbc:arrow-flight://localhost:2222?application=reports&Schema=public",
            &Properties::new().set("traceId", "abc"),
        )
        .unwrap();
        let session: Vec<_> = config
            .session_properties()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            session,
            vec![("traceId", "abc"), ("application", "reports"), ("Schema", "public")]
        );
    }

    #[test]
    fn test_invalid_flag() {
        let err = resolve("jdbc:arrow-flight://localhost:2222?useEncryption=maybe", &Properties::new())
            .unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidOption { ref key, .. } if key == "useEncryption"));
    }

    #[test]
    fn test_invalid_thread_pool_size() {
        let err = resolve("jdbc:arrow-flight://localhost:2222?threadPoolSize=0", &Properties::new())
            .unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidOption { ref key, .. } if key == "threadPoolSize"));

        let config = resolve("jdbc:arrow-flight://localhost:2222?threadPoolSize=8", &Properties::new())
            .unwrap();
        assert_eq!(config.thread_pool_size(), 8);
    }

    #[test]
    fn test_tls_warnings() {
        let config = resolve(
            "jdbc:arrow-flight://localhost:2222?useEncryption=false&tlsRootCerts=/etc/ca.pem",
            &Properties::new(),
        )
        .unwrap();
        assert_eq!(
            config.warnings(),
            &["TLS options are ignored because useEncryption is false".to_string()]
        );

        let config = resolve(
            "jdbc:arrow-flight://localhost:2222?disableCertificateVerification=true",
            &Properties::new(),
        )
        .unwrap();
        assert_eq!(
            config.warnings(),
            &["server certificate verification is disabled".to_string()]
        );
    }

    #[test]
    fn test_location_follows_encryption() {
        let config = resolve(
            "jdbc:arrow-flight://127.0.0.1:50060?useEncryption=false",
            &Properties::new(),
        )
        .unwrap();
        assert_eq!(config.location(), "grpc+tcp://127.0.0.1:50060");
    }

    #[test]
    fn test_ipv6_authority() {
        let config = resolve("jdbc:arrow-flight://[::1]:2222", &Properties::new()).unwrap();
        assert_eq!(config.authority(), "[::1]:2222");

        let props = Properties::new().set("host", "::1");
        let config = resolve("jdbc:arrow-flight://:2222", &props).unwrap();
        assert_eq!(config.authority(), "[::1]:2222");
    }

    #[test]
    fn test_debug_and_display_hide_secrets() {
        let props = Properties::new().set("user", "admin").set("password", "hunter2");
        let config = resolve("jdbc:arrow-flight://localhost:2222", &props).unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
        assert_eq!(config.to_string(), "grpc+tls://localhost:2222 (user admin)");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"method\":\"basic\""));
    }

    #[test]
    fn test_to_url_writes_non_defaults_only() {
        let props = Properties::new().set("user", "admin").set("password", "pw");
        let config = resolve(
            "jdbc:arrow-flight-sql://localhost:2222?useEncryption=false&threadPoolSize=4&app=a%26b",
            &props,
        )
        .unwrap();
        assert_eq!(
            config.to_url(),
            "jdbc:arrow-flight-sql://localhost:2222?user=admin&useEncryption=false&threadPoolSize=4&app=a%26b"
        );
    }
}
