//! Connection URL argument parser.

use super::{ConnectionError, ConnectionProperty, ConnectionResult, Properties};
use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

/// Characters left unescaped when rendering a parameter key or value.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Recognized connection URL schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlightScheme {
    /// `jdbc:arrow-flight://`
    ArrowFlight,
    /// `jdbc:arrow-flight-sql://`
    ArrowFlightSql,
}

impl FlightScheme {
    /// Every recognized scheme.
    pub const ALL: [Self; 2] = [Self::ArrowFlight, Self::ArrowFlightSql];

    /// Get the full URL prefix, including `jdbc:` and `://`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::ArrowFlight => "jdbc:arrow-flight://",
            Self::ArrowFlightSql => "jdbc:arrow-flight-sql://",
        }
    }

    /// Get the scheme name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ArrowFlight => "arrow-flight",
            Self::ArrowFlightSql => "arrow-flight-sql",
        }
    }

    /// Split a recognized scheme prefix off a URL.
    pub fn strip(url: &str) -> Option<(Self, &str)> {
        Self::ALL
            .iter()
            .find_map(|scheme| url.strip_prefix(scheme.prefix()).map(|rest| (*scheme, rest)))
    }
}

impl fmt::Display for FlightScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A value in a parsed argument set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// A string value.
    Text(String),
    /// An integer value (only produced for the port).
    Integer(i64),
}

impl ArgValue {
    /// Get the value as a string, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Integer(_) => None,
        }
    }

    /// Get the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Check whether this is an empty text value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    fn port(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = token.parse() {
                return Self::Integer(n);
            }
        }
        Self::Text(token.to_string())
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

/// Arguments extracted from a connection URL.
///
/// Always holds `host` and `port`; every other entry comes from the
/// parameter tail, keyed exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlArgs {
    scheme: FlightScheme,
    args: IndexMap<String, ArgValue>,
}

impl UrlArgs {
    fn new(scheme: FlightScheme, host: &str, port: &str) -> Self {
        let mut args = IndexMap::with_capacity(2);
        args.insert(
            ConnectionProperty::Host.name().to_string(),
            ArgValue::Text(host.to_string()),
        );
        args.insert(ConnectionProperty::Port.name().to_string(), ArgValue::port(port));
        Self { scheme, args }
    }

    /// Get the scheme the URL was written with.
    pub fn scheme(&self) -> FlightScheme {
        self.scheme
    }

    /// Get the host, if one was given.
    pub fn host(&self) -> Option<&str> {
        self.get(ConnectionProperty::Host.name())
            .and_then(ArgValue::as_str)
            .filter(|host| !host.is_empty())
    }

    /// Get the port, if it is a valid port number.
    pub fn port(&self) -> Option<u16> {
        self.get(ConnectionProperty::Port.name())
            .and_then(ArgValue::as_integer)
            .and_then(|port| u16::try_from(port).ok())
    }

    /// Get an argument. Reserved keys match in any casing.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.args.get(canonical_key(key).as_ref())
    }

    /// Check whether an argument is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of arguments, `host` and `port` included.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Always false for a parsed URL.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Iterate over all arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over the arguments that are not `host` or `port`.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.iter().filter(|(k, _)| !is_reserved(k))
    }

    /// Render every argument as a string property.
    pub fn to_properties(&self) -> Properties {
        self.iter().map(|(k, v)| (k, v.to_string())).collect()
    }

    /// Convert back to a URL string in query style.
    ///
    /// A host or port that would not survive in the authority (it holds a
    /// delimiter) is written as a `host=`/`port=` parameter instead.
    pub fn to_url(&self) -> String {
        let mut url = String::from(self.scheme.prefix());
        let mut params = Vec::new();

        let render = |property: ConnectionProperty| {
            self.get(property.name())
                .map(ArgValue::to_string)
                .unwrap_or_default()
        };
        let host = render(ConnectionProperty::Host);
        let port = render(ConnectionProperty::Port);

        let port_inline = !port.contains([':', '/', '?', ';', '&']);
        if authority_holds_host(&host, port_inline && !port.is_empty()) {
            url.push_str(&host);
        } else {
            params.push(encode_pair(ConnectionProperty::Host.name(), &host));
        }
        if !port_inline {
            params.push(encode_pair(ConnectionProperty::Port.name(), &port));
        } else if !port.is_empty() {
            url.push(':');
            url.push_str(&port);
        }

        params.extend(self.extras().map(|(k, v)| encode_pair(k, &v.to_string())));
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        url
    }

    fn insert(&mut self, key: String, value: String) {
        match ConnectionProperty::from_key(&key).filter(ConnectionProperty::is_reserved) {
            Some(ConnectionProperty::Port) => {
                self.args
                    .insert(ConnectionProperty::Port.name().to_string(), ArgValue::port(&value));
            }
            Some(reserved) => {
                self.args
                    .insert(reserved.name().to_string(), ArgValue::Text(value));
            }
            None => {
                self.args.insert(key, ArgValue::Text(value));
            }
        }
    }
}

impl<'a> IntoIterator for &'a UrlArgs {
    type Item = (&'a String, &'a ArgValue);
    type IntoIter = indexmap::map::Iter<'a, String, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}

/// Parse a connection URL into its arguments.
///
/// Returns `Ok(None)` when the URL does not start with a recognized scheme,
/// so that callers can hand it to another driver. A missing or malformed host
/// or port is not rejected here; see
/// [`FlightConnectionConfig`](super::FlightConnectionConfig) for that.
///
/// # Examples
///
/// ```rust
/// use flightlink_conn::connection::parse_url_args;
///
/// let args = parse_url_args("jdbc:arrow-flight://localhost:2222/;key1=value1;key2=value2")
///     .unwrap()
///     .unwrap();
/// assert_eq!(args.len(), 4);
///
/// assert!(parse_url_args("jdbc:malformed-url-flight://localhost:2222").unwrap().is_none());
/// ```
pub fn parse_url_args(url: &str) -> ConnectionResult<Option<UrlArgs>> {
    let Some((scheme, rest)) = FlightScheme::strip(url) else {
        debug!(url_len = url.len(), "URL scheme not recognized");
        return Ok(None);
    };

    let (authority, tail) = split_authority(rest);
    let (host, port) = split_host_port(authority);
    let mut args = UrlArgs::new(scheme, host, port);

    if let Some(tail) = tail {
        for segment in tail.body.split(tail.separator) {
            if segment.is_empty() {
                continue;
            }
            let (key, value) = parse_pair(segment)?;
            args.insert(key, value);
        }
    }

    debug!(scheme = %scheme, host = ?args.host(), port = ?args.port(), args = args.len(), "URL parsed");
    Ok(Some(args))
}

/// The parameter block after the authority.
struct Tail<'a> {
    body: &'a str,
    separator: char,
}

fn split_authority(rest: &str) -> (&str, Option<Tail<'_>>) {
    let Some(pos) = rest.find(|c: char| c == '/' || c == '?') else {
        return (rest, None);
    };
    let (authority, after) = rest.split_at(pos);

    let tail = if let Some(body) = after.strip_prefix("/?").or_else(|| after.strip_prefix('?')) {
        Some(Tail {
            body,
            separator: '&',
        })
    } else if let Some(body) = after.strip_prefix("/;") {
        Some(Tail {
            body,
            separator: ';',
        })
    } else {
        if after.len() > 1 {
            debug!(path = after, "Ignoring URL path without parameters");
        }
        None
    };

    (authority, tail)
}

fn split_host_port(authority: &str) -> (&str, &str) {
    // Bracketed IPv6 literal, e.g. [::1]:2222
    if authority.starts_with('[') {
        if let Some(end) = authority.find(']') {
            let (host, after) = authority.split_at(end + 1);
            return (host, after.strip_prefix(':').unwrap_or(after));
        }
    }

    match authority.rfind(':') {
        Some(colon) => (&authority[..colon], &authority[colon + 1..]),
        None => (authority, ""),
    }
}

fn parse_pair(segment: &str) -> ConnectionResult<(String, String)> {
    let mut parts = segment.split('=');
    let key = parts.next().unwrap_or_default();
    let (Some(value), None) = (parts.next(), parts.next()) else {
        return Err(invalid_parameter(key));
    };
    if key.is_empty() {
        return Err(invalid_parameter(key));
    }

    let key = decode_component(key, key)?;
    let value = decode_component(value, &key)?;
    Ok((key, value))
}

/// Only the key is reported; the value may hold a credential.
fn invalid_parameter(key: &str) -> ConnectionError {
    let key = if key.is_empty() { "<empty>" } else { key };
    ConnectionError::InvalidParameter(key.to_string())
}

/// Percent-decode a key or value. `label` names the parameter in errors so
/// that values are never echoed back.
fn decode_component(raw: &str, label: &str) -> ConnectionResult<String> {
    let bytes = raw.as_bytes();
    let mut from = 0;
    while let Some(offset) = raw[from..].find('%') {
        let at = from + offset;
        let escape = bytes.get(at + 1..at + 3);
        if !matches!(escape, Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()) {
            return Err(ConnectionError::InvalidEncoding {
                segment: label.to_string(),
                message: format!("malformed escape at byte {}", at),
            });
        }
        from = at + 3;
    }

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|e| ConnectionError::InvalidEncoding {
            segment: label.to_string(),
            message: e.to_string(),
        })
}

/// Whether `host` reads back unchanged when written into the authority.
fn authority_holds_host(host: &str, followed_by_port: bool) -> bool {
    if host.contains(['/', '?', ';', '&']) {
        return false;
    }
    if host.starts_with('[') {
        return host.find(']') == Some(host.len() - 1);
    }
    // without a port after it, the last colon would be read as the port separator
    followed_by_port || !host.contains(':')
}

fn encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", encode_component(key), encode_component(value))
}

/// Percent-encode a key or value for use in a parameter tail.
pub(crate) fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

fn canonical_key(key: &str) -> Cow<'_, str> {
    match ConnectionProperty::from_key(key).filter(ConnectionProperty::is_reserved) {
        Some(reserved) => Cow::Borrowed(reserved.name()),
        None => Cow::Borrowed(key),
    }
}

fn is_reserved(key: &str) -> bool {
    ConnectionProperty::from_key(key).is_some_and(|p| p.is_reserved())
}
