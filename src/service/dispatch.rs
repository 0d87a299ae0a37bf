//! Priority-ordered request dispatch.
//!
//! A dispatcher walks its branch table top to bottom and answers with the
//! first branch whose method and URL rule match. Requests that match nothing
//! land on the generic greeting, so dispatch never fails and never answers
//! with a 4xx or 5xx status.

use crate::http::{
    DemoRequest, DemoResponse, GenericResponse, HealthResponse, Method, Product,
    ProductCreatedResponse, ProductsResponse, StatusCode, User, UsersResponse,
};
use crate::service::handler::Env;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

/// Environment key echoed by the health branch.
pub const NODE_ENV: &str = "NODE_ENV";
/// Value used when `NODE_ENV` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";
/// `userAgent` echoed when the request has no `user-agent` header.
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// Which flavour of the demo service is running. Each one enables a
/// different slice of the branch table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Health check and the generic greeting.
    Basic,
    /// Adds the user listing.
    Enhanced,
    /// Adds the product catalog and product creation.
    #[default]
    Live,
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Variant::Basic),
            "enhanced" => Ok(Variant::Enhanced),
            "live" => Ok(Variant::Live),
            other => Err(format!("unknown variant '{}'", other)),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Basic => write!(f, "basic"),
            Variant::Enhanced => write!(f, "enhanced"),
            Variant::Live => write!(f, "live"),
        }
    }
}

/// Backend a service was built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The Clodo Framework itself.
    #[default]
    Framework,
    /// Local stand-in used when the framework is missing.
    Simulated,
}

impl Backend {
    fn greeting(self) -> &'static str {
        match self {
            Backend::Framework => "Hello from Clodo Framework on the Edge!",
            Backend::Simulated => "Hello from Clodo Framework (simulated)!",
        }
    }

    fn tip(self) -> &'static str {
        match self {
            Backend::Framework => "Try editing this message or add new endpoints!",
            Backend::Simulated => "Try editing this message!",
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "framework" | "real" => Ok(Backend::Framework),
            "simulated" | "simulation" | "mock" => Ok(Backend::Simulated),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Framework => write!(f, "framework"),
            Backend::Simulated => write!(f, "simulated"),
        }
    }
}

/// How a branch tests the request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRule {
    /// URL contains the needle anywhere.
    Contains(&'static str),
    /// URL equals the value exactly.
    Exact(&'static str),
}

impl UrlRule {
    pub fn matches(&self, url: &str) -> bool {
        match self {
            UrlRule::Contains(needle) => url.contains(needle),
            UrlRule::Exact(value) => url == *value,
        }
    }
}

/// Response shape a branch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Health,
    Users,
    Products,
    CreateProduct,
}

/// One matching rule and the response it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub method: Method,
    pub rule: UrlRule,
    pub kind: BranchKind,
}

impl Branch {
    pub fn matches(&self, request: &DemoRequest) -> bool {
        request.method == self.method && self.rule.matches(&request.url)
    }
}

/// The active branch table for a variant, highest priority first.
///
/// The generic greeting is not listed; it answers whenever nothing here matches.
pub fn branches_for(variant: Variant) -> Vec<Branch> {
    let mut table = vec![Branch {
        method: Method::Get,
        rule: UrlRule::Contains("/api/health"),
        kind: BranchKind::Health,
    }];

    if matches!(variant, Variant::Enhanced | Variant::Live) {
        table.push(Branch {
            method: Method::Get,
            rule: UrlRule::Contains("/api/users"),
            kind: BranchKind::Users,
        });
    }

    if variant == Variant::Live {
        table.push(Branch {
            method: Method::Get,
            rule: UrlRule::Exact("/api/products"),
            kind: BranchKind::Products,
        });
        table.push(Branch {
            method: Method::Post,
            rule: UrlRule::Exact("/api/products"),
            kind: BranchKind::CreateProduct,
        });
    }

    table
}

/// Request dispatcher bound to one variant and backend.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    variant: Variant,
    backend: Backend,
    branches: Vec<Branch>,
}

impl Dispatcher {
    pub fn new(variant: Variant, backend: Backend) -> Self {
        Self {
            variant,
            backend,
            branches: branches_for(variant),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Dispatch a request, stamping the response with the current time.
    pub fn dispatch(&self, request: &DemoRequest, env: &Env) -> DemoResponse {
        self.dispatch_at(request, env, Utc::now())
    }

    /// Dispatch a request with an explicit response timestamp.
    pub fn dispatch_at(
        &self,
        request: &DemoRequest,
        env: &Env,
        now: DateTime<Utc>,
    ) -> DemoResponse {
        let kind = self
            .branches
            .iter()
            .find(|branch| branch.matches(request))
            .map(|branch| branch.kind);

        let response = match kind {
            Some(BranchKind::Health) => health(env, now),
            Some(BranchKind::Users) => users(now),
            Some(BranchKind::Products) => products(now),
            Some(BranchKind::CreateProduct) => created_product(now),
            None => self.generic(request, now),
        };

        info!(
            kind = response.kind(),
            status = response.status().0,
            "📤 Response: {}",
            response.to_json()
        );
        response
    }

    fn generic(&self, request: &DemoRequest, now: DateTime<Utc>) -> DemoResponse {
        let user_agent = request
            .get_header("user-agent")
            .cloned()
            .unwrap_or_else(|| UNKNOWN_USER_AGENT.to_string());

        DemoResponse::Generic(GenericResponse {
            status: StatusCode::OK,
            message: self.backend.greeting().to_string(),
            timestamp: now,
            tip: self.backend.tip().to_string(),
            user_agent,
            method: request.method.to_string(),
            url: request.url.clone(),
        })
    }
}

fn health(env: &Env, now: DateTime<Utc>) -> DemoResponse {
    let environment = env
        .get(NODE_ENV)
        .cloned()
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

    DemoResponse::Health(HealthResponse {
        status: StatusCode::OK,
        message: "Service is healthy!".to_string(),
        timestamp: now,
        framework: "Clodo Framework".to_string(),
        environment,
    })
}

/// The fixed user listing.
pub fn sample_users() -> Vec<User> {
    [
        (1, "Alice Johnson", "alice@example.com"),
        (2, "Bob Smith", "bob@example.com"),
        (3, "Carol White", "carol@example.com"),
    ]
    .into_iter()
    .map(|(id, name, email)| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
    })
    .collect()
}

/// The fixed product catalog.
pub fn sample_products() -> Vec<Product> {
    [(1, "Laptop", 999.99), (2, "Mouse", 29.99), (3, "Keyboard", 79.99)]
        .into_iter()
        .map(|(id, name, price)| Product {
            id,
            name: name.to_string(),
            price,
        })
        .collect()
}

fn users(now: DateTime<Utc>) -> DemoResponse {
    let users = sample_users();
    DemoResponse::Users(UsersResponse {
        status: StatusCode::OK,
        message: "Users retrieved successfully".to_string(),
        timestamp: now,
        count: users.len(),
        users,
    })
}

fn products(now: DateTime<Utc>) -> DemoResponse {
    let products = sample_products();
    DemoResponse::Products(ProductsResponse {
        status: StatusCode::OK,
        message: "Products retrieved successfully".to_string(),
        timestamp: now,
        count: products.len(),
        products,
    })
}

fn created_product(now: DateTime<Utc>) -> DemoResponse {
    DemoResponse::ProductCreated(ProductCreatedResponse {
        status: StatusCode::CREATED,
        message: "Product created successfully".to_string(),
        timestamp: now,
        product: Product {
            id: 4,
            name: "Monitor".to_string(),
            price: 249.99,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(key: &str, value: &str) -> Env {
        let mut env = Env::new();
        env.insert(key.to_string(), value.to_string());
        env
    }

    #[test]
    fn test_health_defaults_environment() {
        let dispatcher = Dispatcher::new(Variant::Basic, Backend::Framework);
        let response = dispatcher.dispatch(&DemoRequest::get("/api/health"), &Env::new());

        match response {
            DemoResponse::Health(health) => {
                assert_eq!(health.status, StatusCode::OK);
                assert_eq!(health.environment, "development");
                assert_eq!(health.framework, "Clodo Framework");
            }
            other => panic!("expected health response, got {:?}", other),
        }
    }

    #[test]
    fn test_health_echoes_node_env() {
        let dispatcher = Dispatcher::new(Variant::Live, Backend::Framework);
        let env = env_with(NODE_ENV, "demo");
        let response = dispatcher.dispatch(&DemoRequest::get("/v1/api/health?full=1"), &env);

        match response {
            DemoResponse::Health(health) => assert_eq!(health.environment, "demo"),
            other => panic!("expected health response, got {:?}", other),
        }
    }

    #[test]
    fn test_health_requires_get() {
        let dispatcher = Dispatcher::new(Variant::Live, Backend::Framework);
        let response = dispatcher.dispatch(&DemoRequest::post("/api/health"), &Env::new());
        assert_eq!(response.kind(), "generic");
    }

    #[test]
    fn test_health_wins_over_users() {
        let dispatcher = Dispatcher::new(Variant::Live, Backend::Framework);
        let response =
            dispatcher.dispatch(&DemoRequest::get("/api/users/api/health"), &Env::new());
        assert_eq!(response.kind(), "health");
    }

    #[test]
    fn test_branch_table_per_variant() {
        assert_eq!(branches_for(Variant::Basic).len(), 1);
        assert_eq!(branches_for(Variant::Enhanced).len(), 2);

        let live: Vec<BranchKind> = branches_for(Variant::Live)
            .into_iter()
            .map(|b| b.kind)
            .collect();
        assert_eq!(
            live,
            vec![
                BranchKind::Health,
                BranchKind::Users,
                BranchKind::Products,
                BranchKind::CreateProduct
            ]
        );
    }

    #[test]
    fn test_users_only_in_enhanced_and_live() {
        let request = DemoRequest::get("/api/users").header("user-agent", "X");

        let basic = Dispatcher::new(Variant::Basic, Backend::Framework);
        assert_eq!(basic.dispatch(&request, &Env::new()).kind(), "generic");

        let enhanced = Dispatcher::new(Variant::Enhanced, Backend::Framework);
        match enhanced.dispatch(&request, &Env::new()) {
            DemoResponse::Users(users) => {
                assert_eq!(users.users.len(), 3);
                assert_eq!(users.count, 3);
            }
            other => panic!("expected users response, got {:?}", other),
        }
    }

    #[test]
    fn test_products_require_exact_url() {
        let dispatcher = Dispatcher::new(Variant::Live, Backend::Framework);

        let listing = dispatcher.dispatch(&DemoRequest::get("/api/products"), &Env::new());
        match listing {
            DemoResponse::Products(products) => assert_eq!(products.count, 3),
            other => panic!("expected products response, got {:?}", other),
        }

        let item = dispatcher.dispatch(&DemoRequest::get("/api/products/1"), &Env::new());
        assert_eq!(item.kind(), "generic");

        let enhanced = Dispatcher::new(Variant::Enhanced, Backend::Framework);
        let listing = enhanced.dispatch(&DemoRequest::get("/api/products"), &Env::new());
        assert_eq!(listing.kind(), "generic");
    }

    #[test]
    fn test_post_products_returns_created() {
        let dispatcher = Dispatcher::new(Variant::Live, Backend::Framework);
        let request = DemoRequest::post("/api/products").body("{\"name\":\"Monitor\"}");
        let response = dispatcher.dispatch(&request, &Env::new());

        assert_eq!(response.status(), StatusCode::CREATED);
        match response {
            DemoResponse::ProductCreated(created) => assert_eq!(created.product.id, 4),
            other => panic!("expected created response, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_echoes_request() {
        let dispatcher = Dispatcher::new(Variant::Live, Backend::Framework);
        let response = dispatcher.dispatch(&DemoRequest::get("/test"), &Env::new());

        match response {
            DemoResponse::Generic(generic) => {
                assert_eq!(generic.status, StatusCode::OK);
                assert_eq!(generic.method, "GET");
                assert_eq!(generic.url, "/test");
                assert_eq!(generic.user_agent, "Unknown");
                assert_eq!(generic.message, "Hello from Clodo Framework on the Edge!");
            }
            other => panic!("expected generic response, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_method_and_empty_url_stay_ok() {
        let dispatcher = Dispatcher::new(Variant::Live, Backend::Simulated);
        let request = DemoRequest::new("BREW", "").header("User-Agent", "teapot/1.0");

        match dispatcher.dispatch(&request, &Env::new()) {
            DemoResponse::Generic(generic) => {
                assert_eq!(generic.status, StatusCode::OK);
                assert_eq!(generic.method, "BREW");
                assert_eq!(generic.url, "");
                assert_eq!(generic.user_agent, "teapot/1.0");
                assert_eq!(generic.message, "Hello from Clodo Framework (simulated)!");
            }
            other => panic!("expected generic response, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_is_pure_apart_from_timestamp() {
        let dispatcher = Dispatcher::new(Variant::Live, Backend::Framework);
        let request = DemoRequest::get("/api/demo").header("user-agent", "StackBlitz/1.0");
        let env = env_with(NODE_ENV, "demo");
        let now = Utc::now();

        let first = dispatcher.dispatch_at(&request, &env, now);
        let second = dispatcher.dispatch_at(&request, &env, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_variant_and_backend_parse() {
        assert_eq!("Enhanced".parse::<Variant>(), Ok(Variant::Enhanced));
        assert!("bogus".parse::<Variant>().is_err());
        assert_eq!("mock".parse::<Backend>(), Ok(Backend::Simulated));
        assert_eq!(Backend::Simulated.to_string(), "simulated");
    }
}
