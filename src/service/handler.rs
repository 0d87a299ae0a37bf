//! Demo service handle and error type.

use crate::http::{DemoRequest, DemoResponse};
use crate::service::dispatch::{Backend, Dispatcher, Variant};
use std::collections::HashMap;
use tracing::debug;

/// Environment mapping passed alongside each request.
pub type Env = HashMap<String, String>;

/// A named service answering demo requests.
///
/// Its backend is fixed when the owning factory builds it.
#[derive(Debug, Clone)]
pub struct Service {
    name: String,
    dispatcher: Dispatcher,
}

impl Service {
    pub(crate) fn new(name: impl Into<String>, variant: Variant, backend: Backend) -> Self {
        Self {
            name: name.into(),
            dispatcher: Dispatcher::new(variant, backend),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> Backend {
        self.dispatcher.backend()
    }

    pub fn variant(&self) -> Variant {
        self.dispatcher.variant()
    }

    /// Handle one request.
    pub fn handle_request(&self, request: &DemoRequest, env: &Env) -> DemoResponse {
        if self.backend() == Backend::Simulated {
            println!("🔄 Handling {} {}", request.method, request.url);
        }
        debug!(
            service = %self.name,
            backend = %self.backend(),
            "Dispatching {} {}",
            request.method,
            request.url
        );
        self.dispatcher.dispatch(request, env)
    }
}

/// Demo error type.
#[derive(Debug)]
pub enum DemoError {
    /// The optional framework backend could not be obtained.
    DependencyUnavailable(String),
    /// An environment variable held a value that could not be parsed.
    Config { key: String, value: String, reason: String },
    /// Console I/O failed.
    Io(std::io::Error),
}

impl DemoError {
    pub fn dependency_unavailable(message: impl Into<String>) -> Self {
        DemoError::DependencyUnavailable(message.into())
    }

    pub fn config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DemoError::Config {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoError::DependencyUnavailable(message) => {
                write!(f, "dependency unavailable: {}", message)
            }
            DemoError::Config { key, value, reason } => {
                write!(f, "invalid {}={:?}: {}", key, value, reason)
            }
            DemoError::Io(err) => write!(f, "console i/o failed: {}", err),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DemoError {
    fn from(err: std::io::Error) -> Self {
        DemoError::Io(err)
    }
}
