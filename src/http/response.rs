//! Demo response variants.
//!
//! Each matched branch produces its own record type. [`DemoResponse`] closes
//! them into one union and serializes as the flat JSON object of whichever
//! variant it holds.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const CREATED: StatusCode = StatusCode(201);

    /// Check if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render a timestamp the way `Date.prototype.toISOString` does.
pub fn iso8601(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&iso8601(ts))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: StatusCode,
    pub message: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub framework: String,
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsersResponse {
    pub status: StatusCode,
    pub message: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub users: Vec<User>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductsResponse {
    pub status: StatusCode,
    pub message: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub products: Vec<Product>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCreatedResponse {
    pub status: StatusCode,
    pub message: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub product: Product,
}

/// Fallback response echoing what was asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericResponse {
    pub status: StatusCode,
    pub message: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub tip: String,
    pub user_agent: String,
    pub method: String,
    pub url: String,
}

/// Response produced by a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DemoResponse {
    Health(HealthResponse),
    Users(UsersResponse),
    Products(ProductsResponse),
    ProductCreated(ProductCreatedResponse),
    Generic(GenericResponse),
}

impl DemoResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            DemoResponse::Health(r) => r.status,
            DemoResponse::Users(r) => r.status,
            DemoResponse::Products(r) => r.status,
            DemoResponse::ProductCreated(r) => r.status,
            DemoResponse::Generic(r) => r.status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DemoResponse::Health(r) => &r.message,
            DemoResponse::Users(r) => &r.message,
            DemoResponse::Products(r) => &r.message,
            DemoResponse::ProductCreated(r) => &r.message,
            DemoResponse::Generic(r) => &r.message,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            DemoResponse::Health(r) => r.timestamp,
            DemoResponse::Users(r) => r.timestamp,
            DemoResponse::Products(r) => r.timestamp,
            DemoResponse::ProductCreated(r) => r.timestamp,
            DemoResponse::Generic(r) => r.timestamp,
        }
    }

    /// Variant name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            DemoResponse::Health(_) => "health",
            DemoResponse::Users(_) => "users",
            DemoResponse::Products(_) => "products",
            DemoResponse::ProductCreated(_) => "product_created",
            DemoResponse::Generic(_) => "generic",
        }
    }

    /// Serialize to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // Every field is a string, number or list of plain records.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// The same response with its timestamp replaced.
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        match &mut self {
            DemoResponse::Health(r) => r.timestamp = at,
            DemoResponse::Users(r) => r.timestamp = at,
            DemoResponse::Products(r) => r.timestamp = at,
            DemoResponse::ProductCreated(r) => r.timestamp = at,
            DemoResponse::Generic(r) => r.timestamp = at,
        }
        self
    }
}
