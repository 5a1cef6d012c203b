//! Request descriptions: what an endpoint call wants from the wire.
//!
//! Endpoint wrappers build a [`RequestSpec`] from typed parameters and hand
//! it to the executor. A spec is transient, constructed per call and never
//! persisted. Query parameters keep their construction order, since some
//! provider endpoints are order-sensitive.

use reqwest::{Method, Url};
use serde_json::Value;

use crate::{Result, error::Error};

#[derive(Debug, Clone)]
enum Target {
    /// A path relative to the client's API base URL, e.g. `/artists/{id}`.
    Path(String),
    /// A complete URL, used verbatim. Provider-issued paging links
    /// (`next`/`previous`) arrive in this form.
    Absolute(String),
}

/// One HTTP request an endpoint wrapper wants issued.
///
/// Built fluently:
///
/// ```
/// use spotikit::request::RequestSpec;
///
/// let spec = RequestSpec::get("/artists/4NHQUGzhtTLFvgF5SZesLK/albums")
///     .query("include_groups", "album,single")
///     .query("limit", 20)
///     .scopes(&[]);
/// ```
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    target: Target,
    query: Vec<(String, String)>,
    body: Option<Value>,
    required_scopes: Vec<&'static str>,
}

impl RequestSpec {
    /// Creates a spec for `method` against a path relative to the API base
    /// URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        RequestSpec {
            method,
            target: Target::Path(path.into()),
            query: Vec::new(),
            body: None,
            required_scopes: Vec::new(),
        }
    }

    /// A GET against a relative path.
    pub fn get(path: impl Into<String>) -> Self {
        RequestSpec::new(Method::GET, path)
    }

    /// A POST against a relative path.
    pub fn post(path: impl Into<String>) -> Self {
        RequestSpec::new(Method::POST, path)
    }

    /// A PUT against a relative path.
    pub fn put(path: impl Into<String>) -> Self {
        RequestSpec::new(Method::PUT, path)
    }

    /// A DELETE against a relative path.
    pub fn delete(path: impl Into<String>) -> Self {
        RequestSpec::new(Method::DELETE, path)
    }

    /// A GET against a complete URL, bypassing the API base. Used to follow
    /// provider-issued paging links as-is.
    pub fn get_absolute(url: impl Into<String>) -> Self {
        RequestSpec {
            method: Method::GET,
            target: Target::Absolute(url.into()),
            query: Vec::new(),
            body: None,
            required_scopes: Vec::new(),
        }
    }

    /// Appends one query parameter. Parameters are encoded in the order
    /// they were added.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends one query parameter when a value is present; a `None` leaves
    /// the spec untouched.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Attaches a JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Declares the OAuth scopes this endpoint documents as required. The
    /// executor checks them advisorily; the provider stays authoritative.
    pub fn scopes(mut self, scopes: &[&'static str]) -> Self {
        self.required_scopes = scopes.to_vec();
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The query parameters in construction order.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// The JSON body, if one was attached.
    pub fn request_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The scopes declared for this endpoint.
    pub fn required_scopes(&self) -> &[&'static str] {
        &self.required_scopes
    }

    /// Whether this spec targets a complete URL rather than a relative
    /// path.
    pub fn is_absolute(&self) -> bool {
        matches!(self.target, Target::Absolute(_))
    }

    /// Assembles the full request URL against `base`, encoding the query
    /// parameters in construction order. Absolute targets ignore `base`.
    pub fn url(&self, base: &str) -> Result<Url> {
        let url = match &self.target {
            // parse_with_params serializes a `?` even for an empty pair
            // list, so query-less paths parse the joined string directly.
            Target::Path(path) if self.query.is_empty() => Url::parse(&format!("{base}{path}")),
            Target::Path(path) => Url::parse_with_params(&format!("{base}{path}"), &self.query),
            Target::Absolute(absolute) => Url::parse(absolute),
        };
        url.map_err(|e| Error::Validation(format!("invalid request URL: {e}")))
    }
}
