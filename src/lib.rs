//! # clodo-demo
//!
//! A console demo of a Clodo Framework service. It narrates a simulated
//! install, builds one service and feeds it a handful of canned edge
//! requests. There is no listener: every request is a literal value handed
//! straight to the service.
//!
//! ## Dispatch
//!
//! A service answers through a [`Dispatcher`](service::Dispatcher), which
//! checks an ordered branch table and picks the first match:
//!
//! ```text
//! GET  *"/api/health"*   -> HealthResponse          (all variants)
//! GET  *"/api/users"*    -> UsersResponse           (enhanced, live)
//! GET  "/api/products"   -> ProductsResponse        (live)
//! POST "/api/products"   -> ProductCreatedResponse  (live)
//! anything else          -> GenericResponse
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use clodo_demo::prelude::*;
//!
//! let service = SimulatedFactory.create("demo", Variant::Live);
//! let response = service.handle_request(&DemoRequest::get("/api/health"), &Env::new());
//!
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(response.to_json()["environment"], "development");
//! ```
//!
//! ## Backends
//!
//! The host decides up front which [`ServiceFactory`](service::ServiceFactory)
//! to use. Asking for the framework backend in a build without the
//! `framework` feature falls back to the simulated one with a warning.

pub mod http;
pub mod runtime;
pub mod service;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::http::{DemoRequest, DemoResponse, Method, StatusCode};
    pub use crate::runtime::{DemoConfig, Menu};
    pub use crate::service::{
        load_framework, select_factory, Backend, DemoError, Dispatcher, Env, FrameworkFactory,
        Service, ServiceFactory, SimulatedFactory, Variant,
    };
}

pub use http::{DemoRequest, DemoResponse};
pub use runtime::DemoConfig;
pub use service::{DemoError, Dispatcher, Service};
